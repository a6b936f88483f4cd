//! Rigid poses and homogeneous transforms
//!
//! A [`Pose`] is a position plus an orientation, convertible to and from a
//! 4×4 homogeneous matrix whose rotation block is orthonormal with
//! determinant +1 and whose translation sits in the last column.
//!
//! # Example
//!
//! ```rust
//! use robot_io::pose::{compose, decompose};
//! use robot_io::orientation::{EulerXyz, Orientation};
//! use nalgebra::Vector3;
//!
//! let pose = compose(
//!     &Vector3::new(0.5, 0.0, 0.2),
//!     &Orientation::Euler(EulerXyz::new(0.0, 0.0, 1.0)),
//! )?;
//! let (position, quat_xyzw) = decompose(&pose.inverse().compose_with(&pose));
//! assert!(position.norm() < 1e-12);
//! assert!((quat_xyzw.0[3].abs() - 1.0).abs() < 1e-12);
//! # Ok::<(), robot_io::TransformError>(())
//! ```

use crate::config::Tolerances;
use crate::error::{ensure_finite, TransformError, TransformResult};
use crate::orientation::{Orientation, QuaternionXyzw};
use nalgebra::{
    Isometry3, Matrix3, Matrix4, Point3, Rotation3, Translation3, UnitQuaternion, Vector3,
};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Position in metres
pub type Position = Vector3<f64>;

/// Rigid transform: rotation followed by translation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    transform: Isometry3<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    pub fn identity() -> Self {
        Self {
            transform: Isometry3::identity(),
        }
    }

    pub fn from_parts(position: &Position, rotation: &UnitQuaternion<f64>) -> Self {
        Self {
            transform: Isometry3::from_parts(Translation3::from(*position), *rotation),
        }
    }

    pub fn from_isometry(transform: Isometry3<f64>) -> Self {
        Self { transform }
    }

    pub fn as_isometry(&self) -> &Isometry3<f64> {
        &self.transform
    }

    pub fn translation(&self) -> Position {
        self.transform.translation.vector
    }

    pub fn rotation(&self) -> UnitQuaternion<f64> {
        self.transform.rotation
    }

    /// The 3×3 rotation block
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        self.transform.rotation.to_rotation_matrix().into_inner()
    }

    /// 4×4 homogeneous matrix
    pub fn to_matrix(&self) -> Matrix4<f64> {
        self.transform.to_homogeneous()
    }

    /// Build from a homogeneous matrix using the default tolerances
    pub fn from_matrix(matrix: &Matrix4<f64>) -> TransformResult<Self> {
        Self::from_matrix_with(matrix, &Tolerances::default())
    }

    /// Build from a homogeneous matrix
    ///
    /// Fails unless the bottom row is `[0, 0, 0, 1]` and the rotation block
    /// is orthonormal with determinant +1, both within
    /// `tolerances.orthonormality`.
    pub fn from_matrix_with(
        matrix: &Matrix4<f64>,
        tolerances: &Tolerances,
    ) -> TransformResult<Self> {
        ensure_finite(matrix.as_slice(), "pose matrix")?;

        let bottom = [matrix[(3, 0)], matrix[(3, 1)], matrix[(3, 2)], matrix[(3, 3)]];
        let expected = [0.0, 0.0, 0.0, 1.0];
        if bottom
            .iter()
            .zip(expected.iter())
            .any(|(a, b)| (a - b).abs() > tolerances.orthonormality)
        {
            return Err(TransformError::InvalidPose(format!(
                "bottom row must be [0, 0, 0, 1], got {:?}",
                bottom
            )));
        }

        let block: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let rotation = checked_rotation(&block, tolerances)?;
        let position = Position::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);

        Ok(Self::from_parts(&position, &rotation))
    }

    /// Closed-form rigid inverse: rotation `Rᵀ`, translation `-Rᵀ t`
    pub fn inverse(&self) -> Self {
        let rotation = self.transform.rotation.inverse();
        let translation = -(rotation * self.transform.translation.vector);
        Self::from_parts(&translation, &rotation)
    }

    /// `self · other`: apply `other` first, then `self`
    pub fn compose_with(&self, other: &Pose) -> Self {
        Self {
            transform: self.transform * other.transform,
        }
    }

    pub fn transform_point(&self, point: &Position) -> Position {
        self.transform
            .transform_point(&Point3::from(*point))
            .coords
    }

    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.transform.transform_vector(vector)
    }
}

impl Mul for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Pose {
        self.compose_with(&rhs)
    }
}

/// Build a pose from a position and an orientation in any representation
pub fn compose(position: &Position, orientation: &Orientation) -> TransformResult<Pose> {
    compose_with(position, orientation, &Tolerances::default())
}

/// Build a pose, validating the orientation against `tolerances`
pub fn compose_with(
    position: &Position,
    orientation: &Orientation,
    tolerances: &Tolerances,
) -> TransformResult<Pose> {
    ensure_finite(position.as_slice(), "position")?;
    let rotation = orientation.to_unit_quaternion_with(tolerances)?;
    Ok(Pose::from_parts(position, &rotation))
}

/// Split a pose into its position and a scalar-last quaternion
pub fn decompose(pose: &Pose) -> (Position, QuaternionXyzw) {
    (
        pose.translation(),
        QuaternionXyzw::from_unit_quaternion(&pose.rotation()),
    )
}

/// Homogeneous matrix for a position and orientation
pub fn pos_orn_to_matrix(
    position: &Position,
    orientation: &Orientation,
) -> TransformResult<Matrix4<f64>> {
    Ok(compose(position, orientation)?.to_matrix())
}

/// Position and scalar-last quaternion of a homogeneous matrix
pub fn matrix_to_pos_orn(matrix: &Matrix4<f64>) -> TransformResult<(Position, QuaternionXyzw)> {
    matrix_to_pos_orn_with(matrix, &Tolerances::default())
}

pub fn matrix_to_pos_orn_with(
    matrix: &Matrix4<f64>,
    tolerances: &Tolerances,
) -> TransformResult<(Position, QuaternionXyzw)> {
    Ok(decompose(&Pose::from_matrix_with(matrix, tolerances)?))
}

/// 3×3 rotation matrix for an orientation
pub fn orn_to_matrix(orientation: &Orientation) -> TransformResult<Matrix3<f64>> {
    Ok(orientation.to_rotation()?.into_inner())
}

/// Scalar-last quaternion for a 3×3 rotation matrix
pub fn matrix_to_orn(matrix: &Matrix3<f64>) -> TransformResult<QuaternionXyzw> {
    matrix_to_orn_with(matrix, &Tolerances::default())
}

/// Scalar-last quaternion for a 3×3 rotation matrix checked against
/// `tolerances.orthonormality`
pub fn matrix_to_orn_with(
    matrix: &Matrix3<f64>,
    tolerances: &Tolerances,
) -> TransformResult<QuaternionXyzw> {
    let rotation = checked_rotation(matrix, tolerances)?;
    Ok(QuaternionXyzw::from_unit_quaternion(&rotation))
}

fn checked_rotation(
    matrix: &Matrix3<f64>,
    tolerances: &Tolerances,
) -> TransformResult<UnitQuaternion<f64>> {
    ensure_finite(matrix.as_slice(), "rotation matrix")?;

    let deviation = (matrix.transpose() * matrix - Matrix3::identity()).amax();
    if deviation > tolerances.orthonormality {
        return Err(TransformError::InvalidOrientation(format!(
            "rotation block is not orthonormal (max deviation {:e})",
            deviation
        )));
    }

    let det = matrix.determinant();
    if (det - 1.0).abs() > tolerances.orthonormality {
        return Err(TransformError::InvalidOrientation(format!(
            "rotation block determinant is {}, expected +1",
            det
        )));
    }

    // Accepted blocks may still drift by up to the tolerance
    let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*matrix));
    Ok(UnitQuaternion::new_normalize(q.into_inner()))
}
