//! Double-precision 3-component vector with in-place arithmetic.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use thiserror::Error;

use crate::pool::Pool;

/// Failed to parse the `(x, y, z)` text form of a vector.
#[derive(Debug, Error, PartialEq)]
pub enum ParseVecError {
    #[error("expected `(x, y, z)`, got `{0}`")]
    Format(String),
    #[error("bad vector component: {0}")]
    Component(#[from] ParseFloatError),
}

/// A mutable 3D vector of `f64` components.
///
/// Mutators return `&mut Self` so transform sequences chain. Degenerate
/// inputs are not guarded: normalizing a zero-length vector produces
/// non-finite components per IEEE-754 division, and `angle` feeds the
/// raw normalized dot product to `acos` without clamping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `a`.
    #[inline]
    pub const fn splat(a: f64) -> Self {
        Self { x: a, y: a, z: a }
    }

    /// Pool of zeroed vectors; released instances are re-zeroed.
    pub fn pool() -> Pool<Self> {
        Pool::with_recycler(Pool::<Self>::DEFAULT_CAPACITY, Self::default, |v| {
            v.set_splat(0.0);
        })
    }

    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    #[inline]
    pub fn set_splat(&mut self, a: f64) -> &mut Self {
        self.set(a, a, a)
    }

    #[inline]
    pub fn add(&mut self, v: Vec3) -> &mut Self {
        self.add_xyz(v.x, v.y, v.z)
    }

    #[inline]
    pub fn add_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x += x;
        self.y += y;
        self.z += z;
        self
    }

    #[inline]
    pub fn sub(&mut self, v: Vec3) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self.z -= v.z;
        self
    }

    /// Uniform scale.
    #[inline]
    pub fn scale(&mut self, s: f64) -> &mut Self {
        self.scale_xyz(s, s, s)
    }

    /// Per-axis scale.
    #[inline]
    pub fn scale_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x *= x;
        self.y *= y;
        self.z *= z;
        self
    }

    #[inline]
    pub fn scale_vec(&mut self, v: Vec3) -> &mut Self {
        self.scale_xyz(v.x, v.y, v.z)
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

    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        self.flip(true, true, true)
    }

    /// Scales to unit length. A zero-length input yields non-finite
    /// components, not an error.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let inv = 1.0 / self.length();
        self.scale(inv)
    }

    /// Right-handed cross product, in place. Components are buffered,
    /// so `a.cross(a_copy)` and friends are safe.
    pub fn cross(&mut self, v: Vec3) -> &mut Self {
        let x = self.y * v.z - self.z * v.y;
        let y = self.z * v.x - self.x * v.z;
        self.z = self.x * v.y - self.y * v.x;
        self.y = y;
        self.x = x;
        self
    }

    #[inline]
    pub fn dot(&self, v: Vec3) -> f64 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn non_zero(&self) -> bool {
        self.x != 0.0 || self.y != 0.0 || self.z != 0.0
    }

    /// Angle to `v` in radians, both vectors sharing an origin.
    ///
    /// The normalized dot product is not clamped; rounding that pushes
    /// it outside `[-1, 1]` propagates as NaN.
    #[inline]
    pub fn angle(&self, v: Vec3) -> f64 {
        (self.dot(v) / self.length() / v.length()).acos()
    }

    /// Solid angle subtended by this vector, `v1` and `v2` from a
    /// common origin, via the spherical-excess half-angle tangent
    /// product (l'Huilier).
    pub fn solid_angle(&self, v1: Vec3, v2: Vec3) -> f64 {
        let a = self.angle(v1);
        let b = self.angle(v2);
        let c = v1.angle(v2);
        let s = (a + b + c) / 2.0;

        4.0 * ((s / 2.0).tan()
            * ((s - a) / 2.0).tan()
            * ((s - b) / 2.0).tan()
            * ((s - c) / 2.0).tan())
        .sqrt()
        .atan()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    fn add(self, v: Vec3) -> Vec3 {
        Vec3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, v: Vec3) {
        self.add(v);
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, v: Vec3) -> Vec3 {
        Vec3::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl std::ops::SubAssign for Vec3 {
    fn sub_assign(&mut self, v: Vec3) {
        self.sub(v);
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl std::ops::MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, s: f64) {
        self.scale(s);
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl FromStr for Vec3 {
    type Err = ParseVecError;

    /// Parses the `Display` form back: `(x, y, z)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .ok_or_else(|| ParseVecError::Format(s.to_owned()))?;

        let mut parts = inner.split(',');
        let x = parts
            .next()
            .ok_or_else(|| ParseVecError::Format(s.to_owned()))?
            .trim()
            .parse()?;
        let y = parts
            .next()
            .ok_or_else(|| ParseVecError::Format(s.to_owned()))?
            .trim()
            .parse()?;
        let z = parts
            .next()
            .ok_or_else(|| ParseVecError::Format(s.to_owned()))?
            .trim()
            .parse()?;
        if parts.next().is_some() {
            return Err(ParseVecError::Format(s.to_owned()));
        }
        Ok(Self::new(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPS: f64 = 1e-12;

    #[test]
    fn chained_mutators() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v.add_xyz(1.0, 1.0, 1.0).scale(2.0).flip(false, true, false);
        assert_eq!(v, Vec3::new(4.0, -6.0, 8.0));
    }

    #[test]
    fn operators_match_mutators() {
        let a = Vec3::new(1.0, -2.0, 0.5);
        let b = Vec3::new(0.25, 4.0, -1.0);

        let mut m = a;
        m.add(b);
        assert_eq!(a + b, m);

        let mut m = a;
        m.sub(b);
        assert_eq!(a - b, m);

        let mut m = a;
        m.scale(3.0);
        assert_eq!(a * 3.0, m);

        let mut m = a;
        m.negate();
        assert_eq!(-a, m);
    }

    #[test]
    fn cross_is_perpendicular_to_operands() {
        let u = Vec3::new(1.0, 2.0, 3.0);
        let v = Vec3::new(4.0, -5.0, 6.0);
        let mut c = u;
        c.cross(v);
        assert!(c.dot(u).abs() < EPS);
        assert!(c.dot(v).abs() < EPS);
    }

    #[test]
    fn cross_right_handed() {
        let mut x = Vec3::new(1.0, 0.0, 0.0);
        x.cross(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(x, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn cross_with_itself_is_zero() {
        let mut v = Vec3::new(0.3, -0.7, 2.0);
        let copy = v;
        v.cross(copy);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn normalize_zero_vector_is_non_finite() {
        let mut v = Vec3::ZERO;
        v.normalize();
        assert!(!v.x.is_finite());
        assert!(!v.y.is_finite());
        assert!(!v.z.is_finite());
    }

    #[test]
    fn normalize_unit_length() {
        let mut v = Vec3::new(3.0, 0.0, 4.0);
        v.normalize();
        assert!((v.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn angle_between_axes() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let d = Vec3::new(1.0, 1.0, 0.0);
        assert!((x.angle(y) - FRAC_PI_2).abs() < EPS);
        assert!((x.angle(d) - FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn angle_acos_domain_is_not_clamped() {
        // Rounding pushes the normalized dot of (nearly) parallel
        // vectors just past 1; acos then yields NaN rather than 0.
        let v = Vec3::new(1.0, 1.0, 1.0);
        assert!(v.dot(v) / v.length() / v.length() > 1.0);
        assert!(v.angle(v).is_nan());
    }

    #[test]
    fn solid_angle_of_octant() {
        // Three orthonormal vectors subtend one eighth of the sphere.
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);
        assert!((x.solid_angle(y, z) - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn display_parse_round_trip() {
        let v = Vec3::new(1.5, -2.25, 3.0);
        let back: Vec3 = v.to_string().parse().unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn parse_accepts_spaced_and_tight_forms() {
        assert_eq!(
            "(1, 2.5, -3)".parse::<Vec3>().unwrap(),
            Vec3::new(1.0, 2.5, -3.0)
        );
        assert_eq!(
            "(1,2.5,-3)".parse::<Vec3>().unwrap(),
            Vec3::new(1.0, 2.5, -3.0)
        );
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(matches!(
            "1, 2, 3".parse::<Vec3>(),
            Err(ParseVecError::Format(_))
        ));
        assert!(matches!(
            "(1, 2)".parse::<Vec3>(),
            Err(ParseVecError::Format(_))
        ));
        assert!(matches!(
            "(1, 2, 3, 4)".parse::<Vec3>(),
            Err(ParseVecError::Format(_))
        ));
        assert!(matches!(
            "(a, 2, 3)".parse::<Vec3>(),
            Err(ParseVecError::Component(_))
        ));
    }

    #[test]
    fn non_zero_query() {
        assert!(!Vec3::ZERO.non_zero());
        assert!(Vec3::new(0.0, 0.0, 1e-300).non_zero());
    }
}
