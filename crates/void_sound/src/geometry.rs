//! Proximity geometry: radii and concentricity

use crate::body::SoundBody;
use crate::config::{RadiusMode, SoundSettings};
use void_math::{polygon, Vec2};

/// Radius derived from a body's outline, ignoring any explicit radius.
///
/// Bodies without vertices get `settings.fallback_radius`.
pub fn outline_radius(position: Vec2, vertices: &[Vec2], settings: &SoundSettings) -> f32 {
    if vertices.is_empty() {
        return settings.fallback_radius;
    }
    match settings.radius_mode {
        RadiusMode::AverageVertexDistance => polygon::avg_vertex_distance(position, vertices)
            .unwrap_or(settings.fallback_radius),
        RadiusMode::MaxVertexDistance => polygon::max_vertex_distance(position, vertices),
    }
}

/// Proximity radius of a body: the explicit descriptor radius if set,
/// otherwise derived from the outline.
pub fn resolve_radius<B: SoundBody + ?Sized>(body: &B, settings: &SoundSettings) -> f32 {
    body.sound()
        .and_then(|sound| sound.radius)
        .unwrap_or_else(|| outline_radius(body.position(), body.vertices(), settings))
}

/// Closeness of two bodies in `[0, 1]`.
///
/// `1 - min(distance / (radius_a + radius_b), 1)`. Bodies with no combined
/// reach are never close.
pub fn concentricity(distance: f32, radius_a: f32, radius_b: f32) -> f32 {
    let max_distance = radius_a + radius_b;
    if max_distance.is_nan() || max_distance <= 0.0 || distance.is_nan() {
        return 0.0;
    }
    1.0 - (distance / max_distance).min(1.0)
}

/// Concentricity between two positioned bodies with known radii
pub fn concentricity_between(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> f32 {
    concentricity(polygon::distance(a, b), radius_a, radius_b)
}
