//! Affine coordinate-frame tracker mirroring immediate-mode transform
//! stacks, without a general 4x4 matrix representation.

use std::fmt;

use crate::pool::Pool;
use crate::vec3::Vec3;
use crate::vec3f::Vec3f;

/// Axis selector for the per-axis rotate/scale/translate entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Selects one of the two 3x3 basis blocks of a [`CoordSystem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Basis {
    /// The committed rotation + scale of the frame.
    Main,
    /// The rotation-in-progress scratch block.
    Staging,
}

// Flat state layout: basis-X/Y/Z, offset, staging basis-X/Y/Z.
const NORM_X: usize = 0;
const NORM_Y: usize = 3;
const NORM_Z: usize = 6;
const OFFSET: usize = 9;
const SUBR_X: usize = 12;
const SUBR_Y: usize = 15;
const SUBR_Z: usize = 18;
const VEC_LEN: usize = 21;

/// Tracks a local coordinate frame (rotation + scale + translation)
/// through a sequence of relative transform operations.
///
/// Local rotations accumulate in a staging basis and only take effect
/// once [`submit_rot`](Self::submit_rot) merges them into the main
/// basis. Issuing a local translation or an `apply` while a rotation is
/// still staged computes against the stale basis; that is the contract
/// of the immediate-mode stacks this type mirrors and is not detected
/// at runtime.
///
/// Basis vectors are not kept orthonormal: `scale` stretches them on
/// purpose.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordSystem {
    vec: [f64; VEC_LEN],
}

impl CoordSystem {
    /// Identity frame at the origin.
    pub fn new() -> Self {
        let mut sys = Self {
            vec: [0.0; VEC_LEN],
        };
        sys.set_default();
        sys
    }

    /// Pool of identity frames; released instances are reset.
    pub fn pool() -> Pool<Self> {
        Pool::with_recycler(Pool::<Self>::DEFAULT_CAPACITY, Self::new, |sys| {
            sys.set_default();
        })
    }

    /// Zero offset, identity main and staging bases.
    pub fn set_default(&mut self) -> &mut Self {
        self.vec[OFFSET] = 0.0;
        self.vec[OFFSET + 1] = 0.0;
        self.vec[OFFSET + 2] = 0.0;
        self.load_identity(Basis::Main);
        self.load_identity(Basis::Staging)
    }

    /// Loads the identity matrix into the selected basis block.
    pub fn load_identity(&mut self, basis: Basis) -> &mut Self {
        let base = match basis {
            Basis::Main => NORM_X,
            Basis::Staging => SUBR_X,
        };
        for row in 0..3 {
            for col in 0..3 {
                self.vec[base + 3 * row + col] = if row == col { 1.0 } else { 0.0 };
            }
        }
        self
    }

    /// Translates in the current rotated/scaled frame:
    /// offset += x * basis-X + y * basis-Y + z * basis-Z.
    pub fn translate_local(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.translate_axis(x, Axis::X);
        self.translate_axis(y, Axis::Y);
        self.translate_axis(z, Axis::Z)
    }

    pub fn translate_local_vec(&mut self, v: Vec3) -> &mut Self {
        self.translate_local(v.x, v.y, v.z)
    }

    /// Translates along a single basis vector of the current frame.
    pub fn translate_axis(&mut self, amount: f64, axis: Axis) -> &mut Self {
        let base = Self::basis_base(axis);
        self.vec[OFFSET] += amount * self.vec[base];
        self.vec[OFFSET + 1] += amount * self.vec[base + 1];
        self.vec[OFFSET + 2] += amount * self.vec[base + 2];
        self
    }

    /// Translates in parent/world axes, bypassing rotation and scale.
    pub fn translate_global(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.vec[OFFSET] += x;
        self.vec[OFFSET + 1] += y;
        self.vec[OFFSET + 2] += z;
        self
    }

    pub fn translate_global_vec(&mut self, v: Vec3) -> &mut Self {
        self.translate_global(v.x, v.y, v.z)
    }

    /// Stages rotations about X, then Z, then Y (degrees).
    ///
    /// The fixed X-Z-Y order mirrors immediate-mode stacks, where the
    /// last rotation issued is the first applied to vertices. Staged
    /// rotations take effect on [`submit_rot`](Self::submit_rot).
    pub fn rotate_local(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.rotate_local_axis(x, Axis::X);
        self.rotate_local_axis(z, Axis::Z);
        self.rotate_local_axis(y, Axis::Y)
    }

    pub fn rotate_local_vec(&mut self, v: Vec3) -> &mut Self {
        self.rotate_local(v.x, v.y, v.z)
    }

    /// Rotates the staging basis about one axis by `degrees`.
    pub fn rotate_local_axis(&mut self, degrees: f64, along: Axis) -> &mut Self {
        self.rotate_block(degrees, along, SUBR_X);
        self.rotate_block(degrees, along, SUBR_Y);
        self.rotate_block(degrees, along, SUBR_Z);
        self
    }

    /// Merges the staging basis into the main basis and resets staging
    /// to identity. A no-op when nothing is staged.
    ///
    /// Must run before the next local translation or `apply` for staged
    /// rotations to take effect.
    pub fn submit_rot(&mut self) -> &mut Self {
        self.submit_block(SUBR_X);
        self.submit_block(SUBR_Y);
        self.submit_block(SUBR_Z);
        self.copy_block(SUBR_X, NORM_X);
        self.copy_block(SUBR_Y, NORM_Y);
        self.copy_block(SUBR_Z, NORM_Z);
        self.load_identity(Basis::Staging)
    }

    /// Rotates the main basis directly (X, then Z, then Y, degrees),
    /// bypassing the staging block. No `submit_rot` needed.
    pub fn rotate_global(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.rotate_global_axis(x, Axis::X);
        self.rotate_global_axis(z, Axis::Z);
        self.rotate_global_axis(y, Axis::Y)
    }

    pub fn rotate_global_vec(&mut self, v: Vec3) -> &mut Self {
        self.rotate_global(v.x, v.y, v.z)
    }

    /// Rotates the main basis about one axis by `degrees`.
    pub fn rotate_global_axis(&mut self, degrees: f64, along: Axis) -> &mut Self {
        self.rotate_block(degrees, along, NORM_X);
        self.rotate_block(degrees, along, NORM_Y);
        self.rotate_block(degrees, along, NORM_Z);
        self
    }

    /// Scales the frame per axis by stretching the basis vectors.
    pub fn scale(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.scale_axis(x, Axis::X);
        self.scale_axis(y, Axis::Y);
        self.scale_axis(z, Axis::Z)
    }

    pub fn scale_axis(&mut self, amount: f64, axis: Axis) -> &mut Self {
        let base = Self::basis_base(axis);
        self.vec[base] *= amount;
        self.vec[base + 1] *= amount;
        self.vec[base + 2] *= amount;
        self
    }

    /// Full transform: rotation + scale + offset.
    pub fn apply(&self, raw: Vec3) -> Vec3 {
        Vec3::new(
            raw.x * self.vec[NORM_X] + raw.y * self.vec[NORM_Y] + raw.z * self.vec[NORM_Z]
                + self.vec[OFFSET],
            raw.x * self.vec[NORM_X + 1]
                + raw.y * self.vec[NORM_Y + 1]
                + raw.z * self.vec[NORM_Z + 1]
                + self.vec[OFFSET + 1],
            raw.x * self.vec[NORM_X + 2]
                + raw.y * self.vec[NORM_Y + 2]
                + raw.z * self.vec[NORM_Z + 2]
                + self.vec[OFFSET + 2],
        )
    }

    /// f32 fast path of [`apply`](Self::apply) for vertex streams;
    /// computes in f64 and narrows once.
    pub fn apply_f32(&self, raw: Vec3f) -> Vec3f {
        let v = self.apply(Vec3::new(raw.x as f64, raw.y as f64, raw.z as f64));
        Vec3f::new(v.x as f32, v.y as f32, v.z as f32)
    }

    /// Rotation + scale only, offset omitted.
    pub fn apply_rotation(&self, raw: Vec3) -> Vec3 {
        Vec3::new(
            raw.x * self.vec[NORM_X] + raw.y * self.vec[NORM_Y] + raw.z * self.vec[NORM_Z],
            raw.x * self.vec[NORM_X + 1]
                + raw.y * self.vec[NORM_Y + 1]
                + raw.z * self.vec[NORM_Z + 1],
            raw.x * self.vec[NORM_X + 2]
                + raw.y * self.vec[NORM_Y + 2]
                + raw.z * self.vec[NORM_Z + 2],
        )
    }

    /// Re-expresses `child` in this frame: child basis vectors are
    /// rotated/scaled by this system, the child offset gets the full
    /// transform. Used to chain hierarchical part frames.
    ///
    /// The destination's staging basis is left untouched; compose both
    /// systems only after their rotations are submitted.
    pub fn compose(&self, child: &CoordSystem, dst: &mut CoordSystem) {
        dst.set_basis(Axis::X, self.apply_rotation(child.basis(Axis::X)));
        dst.set_basis(Axis::Y, self.apply_rotation(child.basis(Axis::Y)));
        dst.set_basis(Axis::Z, self.apply_rotation(child.basis(Axis::Z)));
        dst.set_offset(self.apply(child.offset()));
    }

    /// Extracts the frame's y/z/x angles in degrees, un-rotating the
    /// basis by each angle as it is extracted: the query destroys the
    /// frame's rotation. Clone the system first to keep using it.
    ///
    /// Feeding the extracted angles back through
    /// [`rotate_global`](Self::rotate_global) reproduces the original
    /// orientation.
    pub fn take_euler_angles(&mut self) -> Vec3 {
        let mut out = Vec3::ZERO;

        let cos = self.vec[NORM_X];
        let mut ang = (-self.vec[NORM_X + 2] / cos).atan().to_degrees();
        // atan covers half a turn; a negative cosine means the other half.
        if cos < 0.0 {
            ang += 180.0;
        }
        self.rotate_global_axis(-ang, Axis::Y);
        out.y = ang;

        let cos = self.vec[NORM_X];
        let mut ang = (self.vec[NORM_X + 1] / cos).atan().to_degrees();
        if cos < 0.0 {
            ang += 180.0;
        }
        self.rotate_global_axis(-ang, Axis::Z);
        out.z = ang;

        let cos = self.vec[NORM_Y + 1];
        let mut ang = (self.vec[NORM_Y + 2] / cos).atan().to_degrees();
        if cos < 0.0 {
            ang += 180.0;
        }
        out.x = ang;
        out
    }

    /// Extracts yaw (y) and pitch (z) in degrees from basis-X, with
    /// explicit +/-90 results where the cosine component is zero.
    /// Consumes basis-X in the process; basis-Y/Z need not be set and
    /// basis-X must not be trusted afterwards.
    pub fn take_view_angles(&mut self) -> Vec3 {
        let mut out = Vec3::ZERO;

        let sin = self.vec[NORM_X + 2];
        let cos = self.vec[NORM_X];
        let mut ang = if cos != 0.0 {
            (-sin / cos).atan().to_degrees()
        } else if sin > 0.0 {
            -90.0
        } else if sin < 0.0 {
            90.0
        } else {
            0.0
        };
        if cos < 0.0 {
            ang += 180.0;
        }
        self.rotate_global_axis(-ang, Axis::Y);
        out.y = ang;

        // After the yaw removal the cosine can only be positive or zero.
        let cos = self.vec[NORM_X];
        out.z = if cos != 0.0 {
            (self.vec[NORM_X + 1] / cos).atan().to_degrees()
        } else if self.vec[NORM_X + 1] > 0.0 {
            90.0
        } else {
            -90.0
        };
        out
    }

    /// Roll angle in degrees read from basis-Y. Pure query; basis-X and
    /// basis-Z need not be set.
    pub fn camera_roll(&self) -> f64 {
        let sin = self.vec[NORM_Y + 2];
        let cos = self.vec[NORM_Y + 1];
        let ang = if cos != 0.0 {
            (sin / cos).atan().to_degrees()
        } else if sin > 0.0 {
            90.0
        } else if sin < 0.0 {
            -90.0
        } else {
            0.0
        };
        if cos < 0.0 { ang + 180.0 } else { ang }
    }

    /// Copy of the selected main basis vector.
    pub fn basis(&self, axis: Axis) -> Vec3 {
        let base = Self::basis_base(axis);
        Vec3::new(self.vec[base], self.vec[base + 1], self.vec[base + 2])
    }

    pub fn set_basis(&mut self, axis: Axis, v: Vec3) -> &mut Self {
        let base = Self::basis_base(axis);
        self.vec[base] = v.x;
        self.vec[base + 1] = v.y;
        self.vec[base + 2] = v.z;
        self
    }

    /// Copy of the accumulated global translation.
    pub fn offset(&self) -> Vec3 {
        Vec3::new(self.vec[OFFSET], self.vec[OFFSET + 1], self.vec[OFFSET + 2])
    }

    pub fn set_offset(&mut self, v: Vec3) -> &mut Self {
        self.vec[OFFSET] = v.x;
        self.vec[OFFSET + 1] = v.y;
        self.vec[OFFSET + 2] = v.z;
        self
    }

    const fn basis_base(axis: Axis) -> usize {
        match axis {
            Axis::X => NORM_X,
            Axis::Y => NORM_Y,
            Axis::Z => NORM_Z,
        }
    }

    // Standard counter-clockwise rotation of one stored vector about
    // the named axis, in the plane orthogonal to it.
    fn rotate_block(&mut self, degrees: f64, along: Axis, base: usize) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        match along {
            Axis::X => {
                let y = self.vec[base + 1] * cos - self.vec[base + 2] * sin;
                self.vec[base + 2] = self.vec[base + 1] * sin + self.vec[base + 2] * cos;
                self.vec[base + 1] = y;
            }
            Axis::Y => {
                let x = self.vec[base + 2] * sin + self.vec[base] * cos;
                self.vec[base + 2] = self.vec[base + 2] * cos - self.vec[base] * sin;
                self.vec[base] = x;
            }
            Axis::Z => {
                let x = self.vec[base] * cos - self.vec[base + 1] * sin;
                self.vec[base + 1] = self.vec[base] * sin + self.vec[base + 1] * cos;
                self.vec[base] = x;
            }
        }
    }

    // Re-expresses one staging vector through the main basis.
    fn submit_block(&mut self, base: usize) {
        let x = self.vec[base] * self.vec[NORM_X]
            + self.vec[base + 1] * self.vec[NORM_Y]
            + self.vec[base + 2] * self.vec[NORM_Z];
        let y = self.vec[base] * self.vec[NORM_X + 1]
            + self.vec[base + 1] * self.vec[NORM_Y + 1]
            + self.vec[base + 2] * self.vec[NORM_Z + 1];
        self.vec[base + 2] = self.vec[base] * self.vec[NORM_X + 2]
            + self.vec[base + 1] * self.vec[NORM_Y + 2]
            + self.vec[base + 2] * self.vec[NORM_Z + 2];
        self.vec[base + 1] = y;
        self.vec[base] = x;
    }

    fn copy_block(&mut self, from: usize, to: usize) {
        for i in 0..3 {
            self.vec[to + i] = self.vec[from + i];
        }
    }
}

impl Default for CoordSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CoordSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "coord system [norx{} nory{} norz{} offs{}]",
            self.basis(Axis::X),
            self.basis(Axis::Y),
            self.basis(Axis::Z),
            self.offset(),
        )
    }
}
