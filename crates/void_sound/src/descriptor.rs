//! Sound capability descriptors attached to bodies
//!
//! A descriptor holds up to three independent role entries. Each entry names
//! the factory that produces the body's audio node for one chain; receiver
//! entries also carry the hooks invoked as sources move in and out of range.

use crate::events::{HookData, PairEventKind};
use crate::node::NodeRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Role a body plays in the sound graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Originates a signal
    Source,
    /// Effect interposed between sources and destinations
    Transform,
    /// Final output point
    Destination,
}

impl Role {
    /// All roles, in classification order
    pub const ALL: [Role; 3] = [Role::Source, Role::Transform, Role::Destination];

    /// Config key of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Source => "source",
            Role::Transform => "transform",
            Role::Destination => "destination",
        }
    }

    /// Whether bodies in this role receive hooks from sources
    pub fn is_receiver(&self) -> bool {
        !matches!(self, Role::Source)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-argument audio node factory
#[derive(Clone)]
pub struct NodeFactory(Arc<dyn Fn() -> NodeRef + Send + Sync>);

impl NodeFactory {
    /// Wrap a closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> NodeRef + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Produce a fresh node
    pub fn create(&self) -> NodeRef {
        (self.0)()
    }
}

impl fmt::Debug for NodeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NodeFactory(..)")
    }
}

/// The `audio_node` slot of a role entry
#[derive(Debug, Clone)]
pub enum FactorySlot {
    /// A usable factory
    Factory(NodeFactory),
    /// No factory given
    Missing,
    /// Declared by name, but the name did not resolve
    Unresolved(String),
}

impl FactorySlot {
    /// The factory, if the slot holds one
    pub fn factory(&self) -> Option<&NodeFactory> {
        match self {
            Self::Factory(factory) => Some(factory),
            _ => None,
        }
    }

    /// What the slot holds, for diagnostics
    pub fn describe(&self) -> String {
        match self {
            Self::Factory(_) => "factory".to_string(),
            Self::Missing => "none".to_string(),
            Self::Unresolved(name) => format!("unresolved name '{}'", name),
        }
    }
}

impl Default for FactorySlot {
    fn default() -> Self {
        Self::Missing
    }
}

impl From<NodeFactory> for FactorySlot {
    fn from(factory: NodeFactory) -> Self {
        Self::Factory(factory)
    }
}

/// Hook invoked on a receiver
pub type Hook = Arc<dyn Fn(&HookData<'_>) + Send + Sync>;

fn hook<F>(f: F) -> Hook
where
    F: Fn(&HookData<'_>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// `source` role entry
#[derive(Debug, Clone, Default)]
pub struct SourceEntry {
    /// Node factory
    pub audio_node: FactorySlot,
}

impl SourceEntry {
    /// Create a source entry
    pub fn new(audio_node: impl Into<FactorySlot>) -> Self {
        Self {
            audio_node: audio_node.into(),
        }
    }
}

/// `transform` role entry
#[derive(Clone, Default)]
pub struct TransformEntry {
    /// Node factory
    pub audio_node: FactorySlot,
    /// Called on every step a source stays in range
    pub on_update_concentricity: Option<Hook>,
}

impl TransformEntry {
    /// Create a transform entry
    pub fn new(audio_node: impl Into<FactorySlot>) -> Self {
        Self {
            audio_node: audio_node.into(),
            on_update_concentricity: None,
        }
    }

    /// Set update callback
    pub fn on_update_concentricity<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookData<'_>) + Send + Sync + 'static,
    {
        self.on_update_concentricity = Some(hook(f));
        self
    }

    /// Hook for an event kind
    pub fn hook(&self, kind: PairEventKind) -> Option<&Hook> {
        match kind {
            PairEventKind::Active => self.on_update_concentricity.as_ref(),
            PairEventKind::Enter | PairEventKind::Exit => None,
        }
    }
}

/// `destination` role entry
#[derive(Clone, Default)]
pub struct DestinationEntry {
    /// Node factory
    pub audio_node: FactorySlot,
    /// Called when a source comes into range
    pub on_enter_range: Option<Hook>,
    /// Called on every step a source stays in range
    pub on_update_concentricity: Option<Hook>,
    /// Called when a source leaves range
    pub on_leave_range: Option<Hook>,
}

impl DestinationEntry {
    /// Create a destination entry
    pub fn new(audio_node: impl Into<FactorySlot>) -> Self {
        Self {
            audio_node: audio_node.into(),
            on_enter_range: None,
            on_update_concentricity: None,
            on_leave_range: None,
        }
    }

    /// Set enter callback
    pub fn on_enter_range<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookData<'_>) + Send + Sync + 'static,
    {
        self.on_enter_range = Some(hook(f));
        self
    }

    /// Set update callback
    pub fn on_update_concentricity<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookData<'_>) + Send + Sync + 'static,
    {
        self.on_update_concentricity = Some(hook(f));
        self
    }

    /// Set leave callback
    pub fn on_leave_range<F>(mut self, f: F) -> Self
    where
        F: Fn(&HookData<'_>) + Send + Sync + 'static,
    {
        self.on_leave_range = Some(hook(f));
        self
    }

    /// Hook for an event kind
    pub fn hook(&self, kind: PairEventKind) -> Option<&Hook> {
        match kind {
            PairEventKind::Enter => self.on_enter_range.as_ref(),
            PairEventKind::Active => self.on_update_concentricity.as_ref(),
            PairEventKind::Exit => self.on_leave_range.as_ref(),
        }
    }
}

/// Sound capability descriptor
#[derive(Debug, Clone, Default)]
pub struct SoundDescriptor {
    /// Source role
    pub source: Option<SourceEntry>,
    /// Transform role
    pub transform: Option<TransformEntry>,
    /// Destination role
    pub destination: Option<DestinationEntry>,
    /// Explicit proximity radius (computed from the outline if absent)
    pub radius: Option<f32>,
}

impl SoundDescriptor {
    /// Create an empty descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor with only a source role
    pub fn source(factory: NodeFactory) -> Self {
        Self::new().with_source(SourceEntry::new(factory))
    }

    /// Set source entry
    pub fn with_source(mut self, entry: SourceEntry) -> Self {
        self.source = Some(entry);
        self
    }

    /// Set transform entry
    pub fn with_transform(mut self, entry: TransformEntry) -> Self {
        self.transform = Some(entry);
        self
    }

    /// Set destination entry
    pub fn with_destination(mut self, entry: DestinationEntry) -> Self {
        self.destination = Some(entry);
        self
    }

    /// Set explicit radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Check if an entry exists for the role (valid or not)
    pub fn has_role(&self, role: Role) -> bool {
        match role {
            Role::Source => self.source.is_some(),
            Role::Transform => self.transform.is_some(),
            Role::Destination => self.destination.is_some(),
        }
    }

    /// Factory slot of the role entry, if the entry exists
    pub fn factory_slot(&self, role: Role) -> Option<&FactorySlot> {
        match role {
            Role::Source => self.source.as_ref().map(|e| &e.audio_node),
            Role::Transform => self.transform.as_ref().map(|e| &e.audio_node),
            Role::Destination => self.destination.as_ref().map(|e| &e.audio_node),
        }
    }

    /// Usable factory of the role entry
    pub fn factory(&self, role: Role) -> Option<&NodeFactory> {
        self.factory_slot(role).and_then(FactorySlot::factory)
    }

    /// Hook a receiver role exposes for an event kind
    pub fn receiver_hook(&self, role: Role, kind: PairEventKind) -> Option<&Hook> {
        match role {
            Role::Source => None,
            Role::Transform => self.transform.as_ref().and_then(|e| e.hook(kind)),
            Role::Destination => self.destination.as_ref().and_then(|e| e.hook(kind)),
        }
    }
}

// Manual Debug implementations (skip hooks)
impl fmt::Debug for TransformEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformEntry")
            .field("audio_node", &self.audio_node)
            .field("on_update_concentricity", &self.on_update_concentricity.is_some())
            .finish()
    }
}

impl fmt::Debug for DestinationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationEntry")
            .field("audio_node", &self.audio_node)
            .field("on_enter_range", &self.on_enter_range.is_some())
            .field("on_update_concentricity", &self.on_update_concentricity.is_some())
            .field("on_leave_range", &self.on_leave_range.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{mock_factory, NodeLog};

    #[test]
    fn test_factory_slot_describe() {
        let log = NodeLog::default();
        assert_eq!(FactorySlot::from(mock_factory("a", &log)).describe(), "factory");
        assert_eq!(FactorySlot::Missing.describe(), "none");
        assert_eq!(
            FactorySlot::Unresolved("reverb".into()).describe(),
            "unresolved name 'reverb'"
        );
    }

    #[test]
    fn test_roles_are_independent() {
        let log = NodeLog::default();
        let sound = SoundDescriptor::source(mock_factory("osc", &log))
            .with_destination(DestinationEntry::new(FactorySlot::Missing));

        assert!(sound.has_role(Role::Source));
        assert!(!sound.has_role(Role::Transform));
        assert!(sound.has_role(Role::Destination));
        assert!(sound.factory(Role::Source).is_some());
        assert!(sound.factory(Role::Destination).is_none());
        assert!(sound.factory_slot(Role::Transform).is_none());
    }

    #[test]
    fn test_receiver_hooks_by_kind() {
        let log = NodeLog::default();
        let sound = SoundDescriptor::new()
            .with_transform(TransformEntry::new(mock_factory("fx", &log)).on_update_concentricity(|_| {}))
            .with_destination(DestinationEntry::new(mock_factory("out", &log)).on_leave_range(|_| {}));

        assert!(sound.receiver_hook(Role::Transform, PairEventKind::Active).is_some());
        assert!(sound.receiver_hook(Role::Transform, PairEventKind::Enter).is_none());
        assert!(sound.receiver_hook(Role::Destination, PairEventKind::Exit).is_some());
        assert!(sound.receiver_hook(Role::Destination, PairEventKind::Enter).is_none());
        assert!(sound.receiver_hook(Role::Source, PairEventKind::Active).is_none());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Transform.to_string(), "transform");
        assert!(Role::Destination.is_receiver());
        assert!(!Role::Source.is_receiver());
    }
}
