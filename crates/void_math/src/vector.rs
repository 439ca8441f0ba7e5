//! 2D vector type used for body positions and outlines

use core::ops::{Add, AddAssign, Div, Mul, Sub};

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point on a circle of `radius` around the origin at `angle` radians
    #[inline]
    pub fn from_angle(angle: f32, radius: f32) -> Self {
        Self::new(angle.cos() * radius, angle.sin() * radius)
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Euclidean distance between two points
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }
}

impl From<(f32, f32)> for Vec2 {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline] fn add(self, rhs: Self) -> Self { Self::new(self.x + rhs.x, self.y + rhs.y) }
}
impl Sub for Vec2 {
    type Output = Self;
    #[inline] fn sub(self, rhs: Self) -> Self { Self::new(self.x - rhs.x, self.y - rhs.y) }
}
impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline] fn mul(self, rhs: f32) -> Self { Self::new(self.x * rhs, self.y * rhs) }
}
impl Div<f32> for Vec2 {
    type Output = Self;
    #[inline] fn div(self, rhs: f32) -> Self { Self::new(self.x / rhs, self.y / rhs) }
}
impl AddAssign for Vec2 {
    #[inline] fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::from((4.0, 5.0));
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_vec2_from_angle() {
        let v = Vec2::from_angle(core::f32::consts::FRAC_PI_2, 2.0);
        assert!((v - Vec2::new(0.0, 2.0)).length() < 1e-6);
    }

    #[test]
    fn test_vec2_ops() {
        let mut v = Vec2::new(2.0, 4.0) * 0.5;
        v += Vec2::new(1.0, 1.0);
        assert_eq!(v / 2.0, Vec2::new(1.0, 1.5));
    }
}
