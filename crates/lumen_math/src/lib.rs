//! Lumen math - vector algebra and ray primitives.
//!
//! Points and vectors are both `glam::DVec3`. The renderer works in double
//! precision throughout; every "is this zero?" decision goes through
//! [`is_zero`] / [`align_zero`] so that all modules share one tolerance.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::{Ray, DELTA};

use thiserror::Error;

/// A position in world space.
pub type Point = DVec3;

/// A direction or displacement in world space.
pub type Vector = DVec3;

/// Tolerance used by [`is_zero`] and [`align_zero`].
pub const EPSILON: f64 = 1e-10;

/// Errors raised by vector construction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Zero vector cannot be normalized or used as a direction")]
    ZeroVector,
}

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snaps values within [`EPSILON`] of zero to exactly zero.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}

/// Normalize a vector, failing on zero length.
pub fn unit(v: DVec3) -> Result<DVec3, MathError> {
    let length = v.length();
    if is_zero(length) {
        return Err(MathError::ZeroVector);
    }
    Ok(v / length)
}

/// Returns some unit vector orthogonal to `v`.
///
/// Picks the world axis least aligned with `v` and crosses against it, so the
/// result is well conditioned for any non-zero input.
pub fn perpendicular(v: DVec3) -> Result<DVec3, MathError> {
    let v = unit(v)?;
    let axis = if v.x.abs() < v.y.abs() && v.x.abs() < v.z.abs() {
        DVec3::X
    } else if v.y.abs() < v.z.abs() {
        DVec3::Y
    } else {
        DVec3::Z
    };
    unit(v.cross(axis))
}
