//! Void Sound - Proximity Audio Graph
//!
//! This crate turns physics bodies into a positional audio graph. Bodies
//! carry a [`SoundDescriptor`] declaring up to three roles:
//!
//! - **source**: originates a signal
//! - **transform**: an effect every source signal passes through
//! - **destination**: an output point
//!
//! One chain `source -> transforms... -> destination` is built for every
//! (source, destination) pair, and rebuilt whenever bodies are added or
//! removed. Overlap events from the physics host are routed to receiver
//! hooks together with a concentricity value in `[0, 1]`.
//!
//! # Features
//!
//! - Role classification with per-role validation warnings
//! - Chain building with teardown on every rebuild
//! - Enter / update / leave hooks with concentricity
//! - Named factories and JSON descriptors
//!
//! # Example
//!
//! ```ignore
//! use void_sound::prelude::*;
//!
//! let speaker = SoundDescriptor::new().with_destination(
//!     DestinationEntry::new(gain_factory)
//!         .on_update_concentricity(|data| data.set_parameter("gain", data.concentricity)),
//! );
//!
//! let mut world = SoundWorld::default();
//! world.add_body(Body::new(1, "radio").with_sound(SoundDescriptor::source(osc_factory)));
//! world.add_body(Body::new(2, "speaker").with_sound(speaker));
//! world.step(&StepEvents::new().with_active(BodyId(1), BodyId(2)));
//! ```

pub mod body;
pub mod classify;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod events;
pub mod geometry;
pub mod graph;
pub mod node;
pub mod registry;
pub mod router;
pub mod system;
pub mod world;

#[cfg(test)]
mod test_util;

pub mod prelude {
    pub use crate::body::{Body, BodyId, SoundBody};
    pub use crate::classify::{classify, validate_role, Classification, RoleSets};
    pub use crate::config::{RadiusMode, SoundSettings};
    pub use crate::descriptor::{
        DestinationEntry, FactorySlot, Hook, NodeFactory, Role, SoundDescriptor, SourceEntry,
        TransformEntry,
    };
    pub use crate::error::{Result, SoundError, SoundWarning};
    pub use crate::events::{HookData, PairEventKind, Receiver};
    pub use crate::geometry::{concentricity, concentricity_between, outline_radius, resolve_radius};
    pub use crate::graph::{ChainLink, RebuildReport, SoundChain, SoundGraph};
    pub use crate::node::{chain, node_ref, same_node, AudioNode, NodeRef};
    pub use crate::registry::{DescriptorConfig, NodeRegistry, RoleConfig};
    pub use crate::router::{BodyPair, DispatchReport, ProximityRouter};
    pub use crate::system::{ProximityListener, SoundSystem};
    pub use crate::world::{SoundWorld, StepEvents};
}

pub use prelude::*;
