//! Proximity events and hook payloads

use crate::body::SoundBody;
use crate::descriptor::Role;
use crate::node::NodeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a pairwise overlap, as reported by the physics host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairEventKind {
    /// Two bodies started overlapping this step
    Enter,
    /// Two bodies are still overlapping (every step)
    Active,
    /// Two bodies stopped overlapping this step
    Exit,
}

impl PairEventKind {
    /// Delivery order within one physics step
    pub const ALL: [PairEventKind; 3] = [Self::Enter, Self::Active, Self::Exit];

    /// Name of the receiver hook this phase invokes
    pub fn hook_name(&self) -> &'static str {
        match self {
            Self::Enter => "on_enter_range",
            Self::Active => "on_update_concentricity",
            Self::Exit => "on_leave_range",
        }
    }

    /// Whether hooks for this phase get a measured concentricity (exit is always 0)
    pub fn measures_concentricity(&self) -> bool {
        !matches!(self, Self::Exit)
    }

    /// Check if this is an enter event
    pub fn is_enter(&self) -> bool {
        *self == Self::Enter
    }

    /// Check if this is an exit event
    pub fn is_exit(&self) -> bool {
        *self == Self::Exit
    }
}

/// The receiving body of a hook, keyed by the role it receives in
#[derive(Clone, Copy)]
pub enum Receiver<'a> {
    /// Receiving as a transform
    Transform(&'a dyn SoundBody),
    /// Receiving as a destination
    Destination(&'a dyn SoundBody),
}

impl<'a> Receiver<'a> {
    /// Wrap a body in the given receiver role.
    ///
    /// Returns `None` for [`Role::Source`], which never receives.
    pub fn new(role: Role, body: &'a dyn SoundBody) -> Option<Self> {
        match role {
            Role::Source => None,
            Role::Transform => Some(Self::Transform(body)),
            Role::Destination => Some(Self::Destination(body)),
        }
    }

    /// The receiving body
    pub fn body(&self) -> &'a dyn SoundBody {
        match *self {
            Self::Transform(body) | Self::Destination(body) => body,
        }
    }

    /// Role the body receives in
    pub fn role(&self) -> Role {
        match self {
            Self::Transform(_) => Role::Transform,
            Self::Destination(_) => Role::Destination,
        }
    }
}

/// Data passed to a receiver hook
pub struct HookData<'a> {
    /// Event phase that triggered the hook
    pub kind: PairEventKind,
    /// Closeness in `[0, 1]`: 1 with coincident centres, 0 at or past the combined radius
    pub concentricity: f32,
    /// The source body
    pub source: &'a dyn SoundBody,
    /// The receiver's node within the source's chain
    pub audio_node: &'a NodeRef,
    /// The receiving body
    pub receiver: Receiver<'a>,
}

impl<'a> HookData<'a> {
    /// Receiving body, if it receives as a transform
    pub fn transform(&self) -> Option<&'a dyn SoundBody> {
        match self.receiver {
            Receiver::Transform(body) => Some(body),
            Receiver::Destination(_) => None,
        }
    }

    /// Receiving body, if it receives as a destination
    pub fn destination(&self) -> Option<&'a dyn SoundBody> {
        match self.receiver {
            Receiver::Destination(body) => Some(body),
            Receiver::Transform(_) => None,
        }
    }

    /// Set a parameter on the chain node
    pub fn set_parameter(&self, name: &str, value: f32) {
        self.audio_node.lock().set_parameter(name, value);
    }
}

impl fmt::Debug for HookData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookData")
            .field("kind", &self.kind)
            .field("concentricity", &self.concentricity)
            .field("source", &self.source.id())
            .field(self.receiver.role().as_str(), &self.receiver.body().id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Body, BodyId};
    use crate::node::node_ref;
    use crate::test_util::{MockNode, NodeLog};

    #[test]
    fn test_hook_names() {
        assert_eq!(PairEventKind::Enter.hook_name(), "on_enter_range");
        assert_eq!(PairEventKind::Active.hook_name(), "on_update_concentricity");
        assert_eq!(PairEventKind::Exit.hook_name(), "on_leave_range");
        assert!(PairEventKind::Active.measures_concentricity());
        assert!(!PairEventKind::Exit.measures_concentricity());
    }

    #[test]
    fn test_receiver_keys() {
        let body = Body::new(4, "filter");
        assert!(Receiver::new(Role::Source, &body).is_none());

        let receiver = Receiver::new(Role::Transform, &body).unwrap();
        assert_eq!(receiver.role(), Role::Transform);
        assert_eq!(receiver.body().id(), BodyId(4));
    }

    #[test]
    fn test_hook_data_accessors() {
        let log = NodeLog::default();
        let node = node_ref(MockNode::new("gain", &log));
        let source = Body::new(1, "src");
        let dest = Body::new(2, "dst");

        let data = HookData {
            kind: PairEventKind::Active,
            concentricity: 0.25,
            source: &source,
            audio_node: &node,
            receiver: Receiver::Destination(&dest),
        };

        assert!(data.transform().is_none());
        assert_eq!(data.destination().map(|b| b.id()), Some(BodyId(2)));

        data.set_parameter("gain", 0.25);
        assert_eq!(log.parameters(), vec![("gain".to_string(), "gain".to_string(), 0.25)]);
    }
}
