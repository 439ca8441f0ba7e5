//! # void_math - 2D Math Primitives
//!
//! Vector and polygon helpers for the planar physics bodies the sound
//! system works with.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod vector;
#[cfg(feature = "std")]
pub mod polygon;

pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
}

pub mod prelude {
    pub use crate::vector::Vec2;
    #[cfg(feature = "std")]
    pub use crate::polygon::{avg_vertex_distance, distance, max_vertex_distance};
}
