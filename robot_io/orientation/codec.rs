//! Conversions between orientation representations

use super::{EulerXyz, QuaternionXyzw, RotationVector};
use crate::config::Tolerances;
use crate::error::{TransformError, TransformResult};

/// Scalar-last quaternion to `xyz` Euler angles
pub fn quat_to_euler(quat: &QuaternionXyzw) -> TransformResult<EulerXyz> {
    quat_to_euler_with(quat, &Tolerances::default())
}

/// Scalar-last quaternion to `xyz` Euler angles, validated against
/// `tolerances`
pub fn quat_to_euler_with(
    quat: &QuaternionXyzw,
    tolerances: &Tolerances,
) -> TransformResult<EulerXyz> {
    Ok(EulerXyz::from_unit_quaternion_with(
        &quat.to_unit_quaternion_with(tolerances)?,
        tolerances,
    ))
}

/// `xyz` Euler angles to a scalar-last quaternion
pub fn euler_to_quat(euler: &EulerXyz) -> TransformResult<QuaternionXyzw> {
    Ok(QuaternionXyzw::from_unit_quaternion(
        &euler.to_unit_quaternion()?,
    ))
}

pub fn rotvec_to_euler(rotvec: &RotationVector) -> TransformResult<EulerXyz> {
    rotvec_to_euler_with(rotvec, &Tolerances::default())
}

pub fn rotvec_to_euler_with(
    rotvec: &RotationVector,
    tolerances: &Tolerances,
) -> TransformResult<EulerXyz> {
    Ok(EulerXyz::from_unit_quaternion_with(
        &rotvec.to_unit_quaternion()?,
        tolerances,
    ))
}

pub fn euler_to_rotvec(euler: &EulerXyz) -> TransformResult<RotationVector> {
    Ok(RotationVector::from_unit_quaternion(
        &euler.to_unit_quaternion()?,
    ))
}

/// Rotation vector to a scalar-last quaternion; the zero vector is identity
pub fn rotvec_to_quat(rotvec: &RotationVector) -> TransformResult<QuaternionXyzw> {
    Ok(QuaternionXyzw::from_unit_quaternion(
        &rotvec.to_unit_quaternion()?,
    ))
}

/// Scalar-last quaternion to a rotation vector with angle in `[0, π]`
pub fn quat_to_rotvec(quat: &QuaternionXyzw) -> TransformResult<RotationVector> {
    Ok(RotationVector::from_unit_quaternion(
        &quat.to_unit_quaternion()?,
    ))
}

/// Report Euler angles close to gimbal lock as `SingularConfiguration`
///
/// Advisory only: the angles are still usable, but `x` and `z` are no longer
/// independent.
pub fn check_gimbal_lock(euler: &EulerXyz, tolerances: &Tolerances) -> TransformResult<()> {
    if euler.is_near_gimbal_lock(tolerances.gimbal_lock) {
        return Err(TransformError::SingularConfiguration { pitch: euler.y() });
    }
    Ok(())
}
