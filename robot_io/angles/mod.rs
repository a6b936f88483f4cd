//! Planar and vector angle helpers
//!
//! Use [`angle_between_angles`] whenever two headings are compared; raw
//! subtraction jumps by 2π across the ±π boundary.

use crate::error::{TransformError, TransformResult};
use nalgebra::Vector3;
use std::f64::consts::{PI, TAU};

/// Signed angle from `a` to `b` about the z axis (right-hand rule)
///
/// Only the x and y components are used. The result is not wrapped and lies
/// in `(-2π, 2π)`.
pub fn z_angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    b.y.atan2(b.x) - a.y.atan2(a.x)
}

/// Shortest signed difference `b - a`, wrapped into `(-π, π]`
pub fn angle_between_angles(a: f64, b: f64) -> f64 {
    let wrapped = (b - a + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Unsigned angle between two vectors in `[0, π]`
///
/// The normalised dot product is clipped to `[-1, 1]` before `acos`, so
/// rounding on nearly parallel vectors cannot produce NaN.
pub fn angle_between(v1: &Vector3<f64>, v2: &Vector3<f64>) -> TransformResult<f64> {
    let n1 = v1.norm();
    let n2 = v2.norm();
    if !n1.is_finite() || !n2.is_finite() {
        return Err(TransformError::NumericOverflow(format!(
            "vector norm is not finite ({}, {})",
            n1, n2
        )));
    }
    if n1 == 0.0 || n2 == 0.0 {
        return Err(TransformError::DegenerateVector);
    }

    let cos = (v1 / n1).dot(&(v2 / n2));
    Ok(cos.clamp(-1.0, 1.0).acos())
}
