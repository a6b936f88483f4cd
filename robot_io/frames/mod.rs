//! Relative motion between world and tool frames
//!
//! Converts pairs of absolute end-effector poses into relative motions and
//! re-expresses relative motions between the fixed world frame and the tool
//! (TCP) frame.
//!
//! # Composition order
//!
//! For orientations `q_old` and `q_new` the world-frame rotation delta is
//! `q_new · q_old⁻¹`. Seen from the starting tool frame the same delta is
//! `q_old⁻¹ · q_new`. Rotation deltas leave this module as [`EulerXyz`].
//!
//! # Example
//!
//! ```rust
//! use robot_io::frames::{to_relative, ReferenceFrame};
//! use robot_io::orientation::{EulerXyz, Orientation};
//! use nalgebra::Vector3;
//!
//! let motion = to_relative(
//!     &Vector3::zeros(),
//!     &Orientation::Identity,
//!     &Vector3::new(1.0, 0.0, 0.0),
//!     &Orientation::Euler(EulerXyz::new(0.0, 0.0, std::f64::consts::FRAC_PI_2)),
//! )?;
//! assert_eq!(motion.frame, ReferenceFrame::Tool);
//! assert!((motion.orientation.z() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
//! # Ok::<(), robot_io::TransformError>(())
//! ```

pub mod action;

use crate::config::Tolerances;
use crate::error::{ensure_finite, TransformError, TransformResult};
use crate::orientation::{rotation_angle_between, EulerXyz, Orientation};
use crate::pose::Position;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame a relative motion is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceFrame {
    /// Fixed world/base frame
    World,
    /// Tool frame at the start of the motion
    Tool,
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceFrame::World => write!(f, "world"),
            ReferenceFrame::Tool => write!(f, "tool"),
        }
    }
}

/// Position and orientation delta tagged with its frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeMotion {
    pub position: Position,
    pub orientation: EulerXyz,
    pub frame: ReferenceFrame,
}

impl RelativeMotion {
    pub fn new(position: Position, orientation: EulerXyz, frame: ReferenceFrame) -> Self {
        Self {
            position,
            orientation,
            frame,
        }
    }

    /// No motion in `frame`
    pub fn zero(frame: ReferenceFrame) -> Self {
        Self::new(Position::zeros(), EulerXyz::ZERO, frame)
    }

    /// Fail with `FrameMismatch` unless this motion is expressed in `frame`
    pub fn ensure_frame(&self, frame: ReferenceFrame) -> TransformResult<()> {
        if self.frame != frame {
            return Err(TransformError::FrameMismatch {
                expected: frame,
                found: self.frame,
            });
        }
        Ok(())
    }

    /// Re-express this motion in `frame`, given the tool orientation at the
    /// start of the motion
    pub fn express_in(
        &self,
        frame: ReferenceFrame,
        tcp_orn: &Orientation,
    ) -> TransformResult<RelativeMotion> {
        self.express_in_with(frame, tcp_orn, &Tolerances::default())
    }

    pub fn express_in_with(
        &self,
        frame: ReferenceFrame,
        tcp_orn: &Orientation,
        tolerances: &Tolerances,
    ) -> TransformResult<RelativeMotion> {
        let orientation = Orientation::Euler(self.orientation);
        match (self.frame, frame) {
            (ReferenceFrame::World, ReferenceFrame::Tool) => {
                to_tcp_frame_with(&self.position, &orientation, tcp_orn, tolerances)
            }
            (ReferenceFrame::Tool, ReferenceFrame::World) => {
                to_world_frame_with(&self.position, &orientation, tcp_orn, tolerances)
            }
            _ => Ok(*self),
        }
    }

    /// Compare two motions expressed in the same frame
    ///
    /// Positions are compared component-wise and orientations by the angle
    /// of the rotation between them, so equivalent Euler triples match.
    pub fn approx_eq(&self, other: &RelativeMotion, epsilon: f64) -> TransformResult<bool> {
        other.ensure_frame(self.frame)?;
        let position_error = (self.position - other.position).amax();
        let a = self.orientation.to_unit_quaternion()?;
        let b = other.orientation.to_unit_quaternion()?;
        Ok(position_error <= epsilon && rotation_angle_between(&a, &b) <= epsilon)
    }
}

/// The same relative motion expressed in both frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeMotionFrames {
    pub world: RelativeMotion,
    pub tool: RelativeMotion,
}

/// Relative motion from an old pose to a new pose, in the old tool frame
///
/// The positional delta `pos_new - pos_old` and the rotation
/// `R(orn_new) · R(orn_old)⁻¹` are computed in the world frame and then
/// rotated into the tool frame the end-effector had before moving.
pub fn to_relative(
    pos_old: &Position,
    orn_old: &Orientation,
    pos_new: &Position,
    orn_new: &Orientation,
) -> TransformResult<RelativeMotion> {
    to_relative_with(pos_old, orn_old, pos_new, orn_new, &Tolerances::default())
}

/// [`to_relative`] with inputs validated against `tolerances`
pub fn to_relative_with(
    pos_old: &Position,
    orn_old: &Orientation,
    pos_new: &Position,
    orn_new: &Orientation,
    tolerances: &Tolerances,
) -> TransformResult<RelativeMotion> {
    Ok(to_relative_all_frames_with(pos_old, orn_old, pos_new, orn_new, tolerances)?.tool)
}

/// Relative motion from an old pose to a new pose in both the world frame
/// and the old tool frame
pub fn to_relative_all_frames(
    pos_old: &Position,
    orn_old: &Orientation,
    pos_new: &Position,
    orn_new: &Orientation,
) -> TransformResult<RelativeMotionFrames> {
    to_relative_all_frames_with(pos_old, orn_old, pos_new, orn_new, &Tolerances::default())
}

pub fn to_relative_all_frames_with(
    pos_old: &Position,
    orn_old: &Orientation,
    pos_new: &Position,
    orn_new: &Orientation,
    tolerances: &Tolerances,
) -> TransformResult<RelativeMotionFrames> {
    ensure_finite(pos_old.as_slice(), "old position")?;
    ensure_finite(pos_new.as_slice(), "new position")?;
    let q_old = orn_old.to_unit_quaternion_with(tolerances)?;
    let q_new = orn_new.to_unit_quaternion_with(tolerances)?;

    let rel_pos = pos_new - pos_old;
    let rel_rot = q_new * q_old.inverse();
    let (tool_pos, tool_rot) = world_to_tool(&rel_pos, &rel_rot, &q_old);

    tracing::trace!(?rel_pos, ?tool_pos, "computed relative motion");

    Ok(RelativeMotionFrames {
        world: RelativeMotion::new(
            rel_pos,
            EulerXyz::from_unit_quaternion_with(&rel_rot, tolerances),
            ReferenceFrame::World,
        ),
        tool: RelativeMotion::new(
            tool_pos,
            EulerXyz::from_unit_quaternion_with(&tool_rot, tolerances),
            ReferenceFrame::Tool,
        ),
    })
}

/// Re-express a world-frame motion in the tool frame oriented as `tcp_orn`
///
/// The position is rotated by `R(tcp)⁻¹`. For the rotation, the tool's new
/// world orientation `R(rel) · R(tcp)` is built first and the tool-relative
/// rotation is then read off as `R(tcp)⁻¹ · R(rel) · R(tcp)`; no small-angle
/// assumption is made.
pub fn to_tcp_frame(
    rel_pos: &Position,
    rel_orn: &Orientation,
    tcp_orn: &Orientation,
) -> TransformResult<RelativeMotion> {
    to_tcp_frame_with(rel_pos, rel_orn, tcp_orn, &Tolerances::default())
}

pub fn to_tcp_frame_with(
    rel_pos: &Position,
    rel_orn: &Orientation,
    tcp_orn: &Orientation,
    tolerances: &Tolerances,
) -> TransformResult<RelativeMotion> {
    ensure_finite(rel_pos.as_slice(), "relative position")?;
    let rel_rot = rel_orn.to_unit_quaternion_with(tolerances)?;
    let tcp = tcp_orn.to_unit_quaternion_with(tolerances)?;

    let (position, rotation) = world_to_tool(rel_pos, &rel_rot, &tcp);
    Ok(RelativeMotion::new(
        position,
        EulerXyz::from_unit_quaternion_with(&rotation, tolerances),
        ReferenceFrame::Tool,
    ))
}

/// Re-express a tool-frame motion in the world frame; inverse of
/// [`to_tcp_frame`]
pub fn to_world_frame(
    rel_pos: &Position,
    rel_orn: &Orientation,
    tcp_orn: &Orientation,
) -> TransformResult<RelativeMotion> {
    to_world_frame_with(rel_pos, rel_orn, tcp_orn, &Tolerances::default())
}

pub fn to_world_frame_with(
    rel_pos: &Position,
    rel_orn: &Orientation,
    tcp_orn: &Orientation,
    tolerances: &Tolerances,
) -> TransformResult<RelativeMotion> {
    ensure_finite(rel_pos.as_slice(), "relative position")?;
    let rel_rot = rel_orn.to_unit_quaternion_with(tolerances)?;
    let tcp = tcp_orn.to_unit_quaternion_with(tolerances)?;

    let (position, rotation) = tool_to_world(rel_pos, &rel_rot, &tcp);
    Ok(RelativeMotion::new(
        position,
        EulerXyz::from_unit_quaternion_with(&rotation, tolerances),
        ReferenceFrame::World,
    ))
}

fn world_to_tool(
    rel_pos: &Vector3<f64>,
    rel_rot: &UnitQuaternion<f64>,
    world_tcp: &UnitQuaternion<f64>,
) -> (Vector3<f64>, UnitQuaternion<f64>) {
    let tcp_world = world_tcp.inverse();
    let world_tcp_new = rel_rot * world_tcp;
    (tcp_world * rel_pos, tcp_world * world_tcp_new)
}

fn tool_to_world(
    rel_pos: &Vector3<f64>,
    rel_rot: &UnitQuaternion<f64>,
    world_tcp: &UnitQuaternion<f64>,
) -> (Vector3<f64>, UnitQuaternion<f64>) {
    let world_tcp_new = world_tcp * rel_rot;
    (world_tcp * rel_pos, world_tcp_new * world_tcp.inverse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::QuaternionXyzw;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn yaw_90() -> Orientation {
        Orientation::QuatXyzw(QuaternionXyzw::new(
            0.0,
            0.0,
            FRAC_PI_4.sin(),
            FRAC_PI_4.cos(),
        ))
    }

    #[test]
    fn test_identity_start_matches_world() {
        let motion = to_relative(
            &Position::zeros(),
            &Orientation::QuatXyzw(QuaternionXyzw::IDENTITY),
            &Position::new(1.0, 0.0, 0.0),
            &yaw_90(),
        )
        .unwrap();

        assert_eq!(motion.frame, ReferenceFrame::Tool);
        assert_relative_eq!(motion.position, Position::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(motion.orientation.x(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(motion.orientation.y(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(motion.orientation.z(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_position_delta_in_rotated_tool_frame() {
        // Tool yawed 90°: world +x is tool -y
        let motion = to_relative(
            &Position::new(0.5, 0.5, 0.0),
            &yaw_90(),
            &Position::new(1.5, 0.5, 0.0),
            &yaw_90(),
        )
        .unwrap();

        assert_relative_eq!(motion.position, Position::new(0.0, -1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(motion.orientation.0[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_delta_is_seen_from_tool() {
        // Tool pointing down (180° about x), then yawed a further 90° about world z.
        // In the tool frame that yaw is about the tool's -z axis.
        let down = Orientation::Euler(EulerXyz::new(PI, 0.0, 0.0));
        let down_yawed = Orientation::Euler(EulerXyz::new(PI, 0.0, FRAC_PI_2));

        let frames = to_relative_all_frames(
            &Position::zeros(),
            &down,
            &Position::zeros(),
            &down_yawed,
        )
        .unwrap();

        assert_relative_eq!(frames.world.orientation.z(), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(frames.tool.orientation.z(), -FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_all_frames_agrees_with_single_frame_calls() {
        let pos_old = Position::new(0.3, -0.1, 0.6);
        let pos_new = Position::new(0.35, 0.05, 0.5);
        let orn_old = Orientation::Euler(EulerXyz::new(3.0, 0.2, -0.4));
        let orn_new = Orientation::Euler(EulerXyz::new(2.8, 0.1, 0.3));

        let frames = to_relative_all_frames(&pos_old, &orn_old, &pos_new, &orn_new).unwrap();
        let tool = to_relative(&pos_old, &orn_old, &pos_new, &orn_new).unwrap();
        assert!(frames.tool.approx_eq(&tool, 1e-12).unwrap());

        let via_tcp = to_tcp_frame(
            &frames.world.position,
            &Orientation::Euler(frames.world.orientation),
            &orn_old,
        )
        .unwrap();
        assert!(via_tcp.approx_eq(&tool, 1e-9).unwrap());
    }

    #[test]
    fn test_express_in_roundtrip() {
        let tcp = Orientation::Euler(EulerXyz::new(0.4, -0.3, 1.2));
        let world = RelativeMotion::new(
            Position::new(0.01, 0.02, -0.03),
            EulerXyz::new(0.05, 0.0, -0.1),
            ReferenceFrame::World,
        );

        let tool = world.express_in(ReferenceFrame::Tool, &tcp).unwrap();
        assert_eq!(tool.frame, ReferenceFrame::Tool);
        let back = tool.express_in(ReferenceFrame::World, &tcp).unwrap();
        assert!(back.approx_eq(&world, 1e-12).unwrap());

        let same = world.express_in(ReferenceFrame::World, &tcp).unwrap();
        assert_eq!(same, world);
    }

    #[test]
    fn test_frame_tags_must_match() {
        let world = RelativeMotion::zero(ReferenceFrame::World);
        let tool = RelativeMotion::zero(ReferenceFrame::Tool);

        match world.approx_eq(&tool, 1e-9) {
            Err(TransformError::FrameMismatch { expected, found }) => {
                assert_eq!(expected, ReferenceFrame::World);
                assert_eq!(found, ReferenceFrame::Tool);
            }
            other => panic!("expected FrameMismatch, got {:?}", other),
        }
        assert!(tool.ensure_frame(ReferenceFrame::Tool).is_ok());
    }

    #[test]
    fn test_invalid_inputs_propagate() {
        let bad = Orientation::QuatXyzw(QuaternionXyzw::new(0.0, 0.0, 0.0, 3.0));
        assert!(matches!(
            to_relative(&Position::zeros(), &bad, &Position::zeros(), &Orientation::Identity),
            Err(TransformError::InvalidOrientation(_))
        ));
        let nan = Position::new(f64::NAN, 0.0, 0.0);
        assert!(matches!(
            to_tcp_frame(&nan, &Orientation::Identity, &Orientation::Identity),
            Err(TransformError::NumericOverflow(_))
        ));
    }

    #[test]
    fn test_strict_tolerances_reach_frame_conversions() {
        let drifted = Orientation::QuatXyzw(QuaternionXyzw::new(0.0, 0.0, 0.0, 1.0005));
        let strict = Tolerances::strict();
        let p0 = Position::zeros();
        let p1 = Position::new(0.1, 0.0, 0.0);

        assert!(to_relative(&p0, &drifted, &p1, &yaw_90()).is_ok());
        assert!(matches!(
            to_relative_with(&p0, &drifted, &p1, &yaw_90(), &strict),
            Err(TransformError::InvalidOrientation(_))
        ));
        assert!(matches!(
            to_relative_all_frames_with(&p0, &yaw_90(), &p1, &drifted, &strict),
            Err(TransformError::InvalidOrientation(_))
        ));
        assert!(to_tcp_frame_with(&p1, &Orientation::Identity, &drifted, &strict).is_err());
        assert!(to_world_frame_with(&p1, &drifted, &Orientation::Identity, &strict).is_err());

        let world = RelativeMotion::zero(ReferenceFrame::World);
        assert!(world.express_in(ReferenceFrame::Tool, &drifted).is_ok());
        assert!(world
            .express_in_with(ReferenceFrame::Tool, &drifted, &strict)
            .is_err());
    }

    #[test]
    fn test_reference_frame_display() {
        assert_eq!(ReferenceFrame::World.to_string(), "world");
        assert_eq!(ReferenceFrame::Tool.to_string(), "tool");
    }
}
