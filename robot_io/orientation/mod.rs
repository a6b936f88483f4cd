//! Orientation representations
//!
//! Every representation is its own type so the quaternion component order and
//! the meaning of a three-component array are never guessed from length:
//!
//! - [`QuaternionXyzw`]: scalar-last quaternion `[x, y, z, w]`
//! - [`QuaternionWxyz`]: scalar-first quaternion `[w, x, y, z]`
//! - [`EulerXyz`]: `xyz` Euler angles in radians about the fixed (extrinsic)
//!   axes, `R = Rz(z) · Ry(y) · Rx(x)`. The same rotation read as intrinsic
//!   angles is `zyx`, see [`EulerXyz::to_zyx`].
//! - [`RotationVector`]: axis scaled by the rotation angle in radians
//!
//! [`Orientation`] is the tagged union accepted wherever any of them will do.
//! Internally everything is converted to `nalgebra::UnitQuaternion<f64>`.
//!
//! # Gimbal lock
//!
//! The Euler decomposition is singular when `|y| = π/2`. Conversions do not
//! special-case it: at the singularity the `z` angle is reported as zero and
//! the whole in-plane rotation lands in `x`. Use
//! [`EulerXyz::is_near_gimbal_lock`] or [`check_gimbal_lock`] to detect it.

mod codec;

pub use codec::{
    check_gimbal_lock, euler_to_quat, euler_to_rotvec, quat_to_euler, quat_to_euler_with,
    quat_to_rotvec, rotvec_to_euler, rotvec_to_euler_with, rotvec_to_quat,
};

use crate::config::Tolerances;
use crate::error::{TransformError, TransformResult};
use nalgebra::{Quaternion, Rotation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Quaternion with the scalar last: `[x, y, z, w]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuaternionXyzw(pub [f64; 4]);

/// Quaternion with the scalar first: `[w, x, y, z]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuaternionWxyz(pub [f64; 4]);

/// Euler angles `[x, y, z]` in radians about fixed axes, composed as
/// `Rz(z) · Ry(y) · Rx(x)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerXyz(pub [f64; 3]);

/// Rotation vector: unit axis times angle in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationVector(pub [f64; 3]);

impl QuaternionXyzw {
    pub const IDENTITY: Self = Self([0.0, 0.0, 0.0, 1.0]);

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self([x, y, z, w])
    }

    /// Euclidean norm of the four components
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|c| c * c).sum::<f64>().sqrt()
    }

    /// Explicitly rescale to unit norm
    ///
    /// Conversions never do this on their own; call it first when the input
    /// is known to carry more drift than the configured tolerance.
    pub fn normalize(&self) -> TransformResult<Self> {
        let norm = self.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(TransformError::InvalidOrientation(format!(
                "cannot normalize quaternion {:?}",
                self.0
            )));
        }
        Ok(Self(self.0.map(|c| c / norm)))
    }

    /// Reorder to scalar-first
    pub fn to_wxyz(&self) -> QuaternionWxyz {
        let [x, y, z, w] = self.0;
        QuaternionWxyz([w, x, y, z])
    }

    /// Validate against the default tolerances and convert
    pub fn to_unit_quaternion(&self) -> TransformResult<UnitQuaternion<f64>> {
        self.to_unit_quaternion_with(&Tolerances::default())
    }

    /// Validate against `tolerances` and convert
    pub fn to_unit_quaternion_with(
        &self,
        tolerances: &Tolerances,
    ) -> TransformResult<UnitQuaternion<f64>> {
        let [x, y, z, w] = self.0;
        checked_unit_quaternion(Quaternion::new(w, x, y, z), tolerances)
    }

    pub fn from_unit_quaternion(q: &UnitQuaternion<f64>) -> Self {
        Self([q.i, q.j, q.k, q.w])
    }
}

impl QuaternionWxyz {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0]);

    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self([w, x, y, z])
    }

    /// Reorder to scalar-last
    pub fn to_xyzw(&self) -> QuaternionXyzw {
        let [w, x, y, z] = self.0;
        QuaternionXyzw([x, y, z, w])
    }

    /// Validate against the default tolerances and convert
    pub fn to_unit_quaternion(&self) -> TransformResult<UnitQuaternion<f64>> {
        self.to_unit_quaternion_with(&Tolerances::default())
    }

    /// Validate against `tolerances` and convert
    pub fn to_unit_quaternion_with(
        &self,
        tolerances: &Tolerances,
    ) -> TransformResult<UnitQuaternion<f64>> {
        let [w, x, y, z] = self.0;
        checked_unit_quaternion(Quaternion::new(w, x, y, z), tolerances)
    }

    pub fn from_unit_quaternion(q: &UnitQuaternion<f64>) -> Self {
        Self([q.w, q.i, q.j, q.k])
    }
}

impl From<QuaternionWxyz> for QuaternionXyzw {
    fn from(q: QuaternionWxyz) -> Self {
        q.to_xyzw()
    }
}

impl From<QuaternionXyzw> for QuaternionWxyz {
    fn from(q: QuaternionXyzw) -> Self {
        q.to_wxyz()
    }
}

impl EulerXyz {
    pub const ZERO: Self = Self([0.0; 3]);

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }

    /// Same angles listed in `zyx` order
    ///
    /// Angles about fixed `x`, `y`, `z` axes are the same rotation as angles
    /// about moving `z`, `y'`, `x''` axes, so only the order changes.
    pub fn to_zyx(&self) -> [f64; 3] {
        let [x, y, z] = self.0;
        [z, y, x]
    }

    /// True when the `y` angle is within `threshold` of ±π/2
    pub fn is_near_gimbal_lock(&self, threshold: f64) -> bool {
        (FRAC_PI_2 - self.y().abs()).abs() < threshold
    }

    pub fn to_unit_quaternion(&self) -> TransformResult<UnitQuaternion<f64>> {
        ensure_finite_orientation(&self.0, "Euler angles")?;
        let [x, y, z] = self.0;
        Ok(UnitQuaternion::from_euler_angles(x, y, z))
    }

    /// Decompose a rotation into `xyz` Euler angles
    ///
    /// `y` lies in `[-π/2, π/2]`, `x` and `z` in `[-π, π]`.
    pub fn from_unit_quaternion(q: &UnitQuaternion<f64>) -> Self {
        Self::from_unit_quaternion_with(q, &Tolerances::default())
    }

    /// Decompose a rotation, warning when `y` is within
    /// `tolerances.gimbal_lock` of ±π/2
    pub fn from_unit_quaternion_with(q: &UnitQuaternion<f64>, tolerances: &Tolerances) -> Self {
        let (x, y, z) = q.euler_angles();
        let euler = Self([x, y, z]);
        if euler.is_near_gimbal_lock(tolerances.gimbal_lock) {
            tracing::warn!(
                pitch = y,
                threshold = tolerances.gimbal_lock,
                "Euler decomposition near gimbal lock, x and z are coupled"
            );
        }
        euler
    }
}

impl RotationVector {
    pub const ZERO: Self = Self([0.0; 3]);

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    /// Rotation angle in radians
    pub fn angle(&self) -> f64 {
        Vector3::from(self.0).norm()
    }

    pub fn to_unit_quaternion(&self) -> TransformResult<UnitQuaternion<f64>> {
        ensure_finite_orientation(&self.0, "rotation vector")?;
        Ok(UnitQuaternion::from_scaled_axis(Vector3::from(self.0)))
    }

    /// Rotation vector with angle in `[0, π]`
    pub fn from_unit_quaternion(q: &UnitQuaternion<f64>) -> Self {
        let v = q.scaled_axis();
        Self([v.x, v.y, v.z])
    }
}

/// Orientation in any supported representation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Orientation {
    QuatXyzw(QuaternionXyzw),
    QuatWxyz(QuaternionWxyz),
    Euler(EulerXyz),
    RotVec(RotationVector),
    /// No rotation
    #[default]
    Identity,
}

impl Orientation {
    /// Validate against the default tolerances and convert
    pub fn to_unit_quaternion(&self) -> TransformResult<UnitQuaternion<f64>> {
        self.to_unit_quaternion_with(&Tolerances::default())
    }

    /// Validate against `tolerances` and convert
    pub fn to_unit_quaternion_with(
        &self,
        tolerances: &Tolerances,
    ) -> TransformResult<UnitQuaternion<f64>> {
        match self {
            Orientation::QuatXyzw(q) => q.to_unit_quaternion_with(tolerances),
            Orientation::QuatWxyz(q) => q.to_unit_quaternion_with(tolerances),
            Orientation::Euler(e) => e.to_unit_quaternion(),
            Orientation::RotVec(r) => r.to_unit_quaternion(),
            Orientation::Identity => Ok(UnitQuaternion::identity()),
        }
    }

    pub fn to_rotation(&self) -> TransformResult<Rotation3<f64>> {
        Ok(self.to_unit_quaternion()?.to_rotation_matrix())
    }

    pub fn to_quat_xyzw(&self) -> TransformResult<QuaternionXyzw> {
        Ok(QuaternionXyzw::from_unit_quaternion(
            &self.to_unit_quaternion()?,
        ))
    }

    pub fn to_euler(&self) -> TransformResult<EulerXyz> {
        self.to_euler_with(&Tolerances::default())
    }

    /// Convert to Euler angles, validating and warning against `tolerances`
    pub fn to_euler_with(&self, tolerances: &Tolerances) -> TransformResult<EulerXyz> {
        match self {
            Orientation::Euler(e) => Ok(*e),
            other => Ok(EulerXyz::from_unit_quaternion_with(
                &other.to_unit_quaternion_with(tolerances)?,
                tolerances,
            )),
        }
    }

    pub fn to_rotvec(&self) -> TransformResult<RotationVector> {
        Ok(RotationVector::from_unit_quaternion(
            &self.to_unit_quaternion()?,
        ))
    }
}

impl From<QuaternionXyzw> for Orientation {
    fn from(q: QuaternionXyzw) -> Self {
        Orientation::QuatXyzw(q)
    }
}

impl From<QuaternionWxyz> for Orientation {
    fn from(q: QuaternionWxyz) -> Self {
        Orientation::QuatWxyz(q)
    }
}

impl From<EulerXyz> for Orientation {
    fn from(e: EulerXyz) -> Self {
        Orientation::Euler(e)
    }
}

impl From<RotationVector> for Orientation {
    fn from(r: RotationVector) -> Self {
        Orientation::RotVec(r)
    }
}

/// Angle in radians of the rotation taking `a` to `b`, in `[0, π]`
///
/// Uses `atan2` on the relative quaternion rather than `acos` of its scalar
/// part, which keeps sub-microradian differences resolvable.
pub fn rotation_angle_between(a: &UnitQuaternion<f64>, b: &UnitQuaternion<f64>) -> f64 {
    let delta = a.rotation_to(b);
    2.0 * delta.vector().norm().atan2(delta.w.abs())
}

fn ensure_finite_orientation(values: &[f64], what: &str) -> TransformResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(TransformError::InvalidOrientation(format!(
            "{} has non-finite components: {:?}",
            what, values
        )))
    }
}

fn checked_unit_quaternion(
    q: Quaternion<f64>,
    tolerances: &Tolerances,
) -> TransformResult<UnitQuaternion<f64>> {
    ensure_finite_orientation(q.coords.as_slice(), "quaternion")?;
    let norm = q.norm();
    if (norm - 1.0).abs() > tolerances.quaternion_norm {
        return Err(TransformError::InvalidOrientation(format!(
            "quaternion norm {} deviates from 1 by more than {}",
            norm, tolerances.quaternion_norm
        )));
    }
    Ok(UnitQuaternion::new_normalize(q))
}
