//! Polygon outline measurements
//!
//! Outlines are ordered vertex lists in world space, measured against the
//! polygon's reference position (usually its centre of mass).

use crate::vector::Vec2;

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Mean distance from `center` to each vertex.
///
/// Returns `None` for an empty outline.
pub fn avg_vertex_distance(center: Vec2, vertices: &[Vec2]) -> Option<f32> {
    if vertices.is_empty() {
        return None;
    }
    let total: f32 = vertices.iter().map(|v| center.distance(*v)).sum();
    Some(total / vertices.len() as f32)
}

/// Largest distance from `center` to any vertex (0 for an empty outline)
pub fn max_vertex_distance(center: Vec2, vertices: &[Vec2]) -> f32 {
    vertices
        .iter()
        .map(|v| center.distance(*v))
        .fold(0.0f32, f32::max)
}

/// Regular polygon with `sides` vertices on a circle of `radius` around `center`
pub fn regular_polygon(center: Vec2, sides: usize, radius: f32) -> Vec<Vec2> {
    let step = crate::consts::TAU / sides.max(1) as f32;
    (0..sides)
        .map(|i| center + Vec2::from_angle(step * i as f32, radius))
        .collect()
}

/// Axis-aligned rectangle outline centred on `center`
pub fn rectangle(center: Vec2, width: f32, height: f32) -> Vec<Vec2> {
    let hw = width / 2.0;
    let hh = height / 2.0;
    vec![
        center + Vec2::new(-hw, -hh),
        center + Vec2::new(hw, -hh),
        center + Vec2::new(hw, hh),
        center + Vec2::new(-hw, hh),
    ]
}
