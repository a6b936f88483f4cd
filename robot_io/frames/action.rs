//! Relative action records
//!
//! Thin adapters that turn two absolute end-effector records into one
//! relative action, keeping the gripper command of the later record.

use super::to_relative;
use crate::error::TransformResult;
use crate::orientation::Orientation;
use crate::pose::Position;
use serde::{Deserialize, Serialize};

/// How an action's motion is to be interpreted by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
    /// Absolute target pose
    #[serde(rename = "abs")]
    Absolute,
    /// Delta in the tool frame at the start of the motion
    #[serde(rename = "rel")]
    Relative,
    /// Joint-space target
    #[serde(rename = "joint")]
    Joint,
}

/// End-effector state as reported by the robot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TcpState {
    pub tcp_pos: Position,
    pub tcp_orn: Orientation,
}

/// Motion part of an action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub position: Position,
    pub orientation: Orientation,
    /// Gripper command, passed through untouched
    pub gripper_action: f64,
}

/// Motion command together with its reference type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub motion: Motion,
    #[serde(rename = "ref")]
    pub reference: ReferenceType,
}

impl Action {
    pub fn absolute(position: Position, orientation: Orientation, gripper_action: f64) -> Self {
        Self {
            motion: Motion {
                position,
                orientation,
                gripper_action,
            },
            reference: ReferenceType::Absolute,
        }
    }

    pub fn is_relative(&self) -> bool {
        self.reference == ReferenceType::Relative
    }
}

/// Relative action moving the end-effector from `state` to `next_state`
pub fn to_relative_action_from_states(
    state: &TcpState,
    next_state: &TcpState,
    gripper_action: f64,
) -> TransformResult<Action> {
    relative_action(
        &state.tcp_pos,
        &state.tcp_orn,
        &next_state.tcp_pos,
        &next_state.tcp_orn,
        gripper_action,
    )
}

/// Relative action between two absolute actions
///
/// The gripper command of `action` is kept as is.
pub fn to_relative_action(prev_action: &Action, action: &Action) -> TransformResult<Action> {
    relative_action(
        &prev_action.motion.position,
        &prev_action.motion.orientation,
        &action.motion.position,
        &action.motion.orientation,
        action.motion.gripper_action,
    )
}

fn relative_action(
    pos_old: &Position,
    orn_old: &Orientation,
    pos_new: &Position,
    orn_new: &Orientation,
    gripper_action: f64,
) -> TransformResult<Action> {
    let rel = to_relative(pos_old, orn_old, pos_new, orn_new)?;
    Ok(Action {
        motion: Motion {
            position: rel.position,
            orientation: Orientation::Euler(rel.orientation),
            gripper_action,
        },
        reference: ReferenceType::Relative,
    })
}
