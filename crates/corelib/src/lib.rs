//! Core types: pooled vectors and the coordinate-frame tracker.
//!
//! The engine tracks a local frame (rotation + scale + translation)
//! through relative transform operations, matching the order-dependent
//! composition of immediate-mode transform stacks. Vectors and frames
//! can be borrowed from bounded [`pool::Pool`]s to keep per-vertex
//! loops allocation-free.

pub mod coord;
pub mod pool;
pub mod vec3;
pub mod vec3f;

pub use coord::{Axis, Basis, CoordSystem};
pub use pool::{Pool, Pooled};
pub use vec3::{ParseVecError, Vec3};
pub use vec3f::Vec3f;
