//! Single-precision sibling of [`Vec3`](crate::vec3::Vec3).
//!
//! Carries the narrower op set the f32 vertex path needs; the f64 type
//! is the full-featured one.

use std::fmt;

use crate::pool::Pool;

/// A mutable 3D vector of `f32` components.
///
/// Same contract as `Vec3`: mutators chain, zero-length normalize
/// yields non-finite components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3f {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(a: f32) -> Self {
        Self { x: a, y: a, z: a }
    }

    /// Pool of zeroed vectors; released instances are re-zeroed.
    pub fn pool() -> Pool<Self> {
        Pool::with_recycler(Pool::<Self>::DEFAULT_CAPACITY, Self::default, |v| {
            v.set_splat(0.0);
        })
    }

    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    #[inline]
    pub fn set_splat(&mut self, a: f32) -> &mut Self {
        self.set(a, a, a)
    }

    #[inline]
    pub fn add(&mut self, v: Vec3f) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
        self
    }

    #[inline]
    pub fn sub(&mut self, v: Vec3f) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self.z -= v.z;
        self
    }

    #[inline]
    pub fn scale(&mut self, s: f32) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self.z *= s;
        self
    }

    /// Flips the sign of the selected components.
    #[inline]
    pub fn flip(&mut self, x: bool, y: bool, z: bool) -> &mut Self {
        if x {
            self.x = -self.x;
        }
        if y {
            self.y = -self.y;
        }
        if z {
            self.z = -self.z;
        }
        self
    }

    /// Right-handed cross product, in place; components are buffered.
    pub fn cross(&mut self, v: Vec3f) -> &mut Self {
        let x = self.y * v.z - self.z * v.y;
        let y = self.z * v.x - self.x * v.z;
        self.z = self.x * v.y - self.y * v.x;
        self.y = y;
        self.x = x;
        self
    }

    /// Scales to unit length; unguarded against zero length.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let inv = 1.0 / self.length();
        self.scale(inv)
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn non_zero(&self) -> bool {
        self.x != 0.0 || self.y != 0.0 || self.z != 0.0
    }
}

impl fmt::Display for Vec3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_right_handed() {
        let mut x = Vec3f::new(1.0, 0.0, 0.0);
        x.cross(Vec3f::new(0.0, 1.0, 0.0));
        assert_eq!(x, Vec3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn normalize_zero_is_non_finite() {
        let mut v = Vec3f::ZERO;
        v.normalize();
        assert!(!v.x.is_finite());
        assert!(!v.y.is_finite());
        assert!(!v.z.is_finite());
    }

    #[test]
    fn flip_selected_components() {
        let mut v = Vec3f::new(1.0, 2.0, 3.0);
        v.flip(true, false, true);
        assert_eq!(v, Vec3f::new(-1.0, 2.0, -3.0));
    }

    #[test]
    fn chained_mutators() {
        let mut v = Vec3f::splat(1.0);
        v.add(Vec3f::new(1.0, 0.0, -1.0)).scale(0.5);
        assert_eq!(v, Vec3f::new(1.0, 0.5, 0.0));
    }
}
