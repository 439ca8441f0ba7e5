//! Physics body view consumed by the sound system

use crate::descriptor::SoundDescriptor;
use serde::{Deserialize, Serialize};
use void_math::Vec2;

/// Stable identity of a physics body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl BodyId {
    /// Get the raw id
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the sound system needs to know about a physics body.
///
/// The physics host owns its bodies; the sound system only borrows them for
/// the duration of a rebuild or an event dispatch.
pub trait SoundBody {
    /// Stable identity
    fn id(&self) -> BodyId;

    /// Human-readable label, used in diagnostics
    fn label(&self) -> &str;

    /// World-space position of the body's centre
    fn position(&self) -> Vec2;

    /// World-space outline vertices, in order
    fn vertices(&self) -> &[Vec2];

    /// Sound capability descriptor, if the body takes part in the sound graph
    fn sound(&self) -> Option<&SoundDescriptor>;
}

/// Plain body record for hosts without their own body type
#[derive(Debug)]
pub struct Body {
    /// Body identity
    pub id: BodyId,
    /// Display label
    pub label: String,
    /// Centre position
    pub position: Vec2,
    /// Outline in world space
    pub vertices: Vec<Vec2>,
    /// Attached sound descriptor
    pub sound: Option<SoundDescriptor>,
}

impl Body {
    /// Create a body with an empty outline at the origin
    pub fn new(id: u64, label: impl Into<String>) -> Self {
        Self {
            id: BodyId(id),
            label: label.into(),
            position: Vec2::ZERO,
            vertices: Vec::new(),
            sound: None,
        }
    }

    /// Set position, translating the outline along with it
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position);
        self
    }

    /// Set the outline directly (world space)
    pub fn with_vertices(mut self, vertices: Vec<Vec2>) -> Self {
        self.vertices = vertices;
        self
    }

    /// Attach a sound descriptor
    pub fn with_sound(mut self, sound: SoundDescriptor) -> Self {
        self.sound = Some(sound);
        self
    }

    /// Move the body, translating the outline along with it
    pub fn set_position(&mut self, position: Vec2) {
        let delta = position - self.position;
        for v in &mut self.vertices {
            *v += delta;
        }
        self.position = position;
    }
}

impl SoundBody for Body {
    fn id(&self) -> BodyId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    fn sound(&self) -> Option<&SoundDescriptor> {
        self.sound.as_ref()
    }
}
