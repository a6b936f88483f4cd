//! Camera extrinsics keyed by camera role
//!
//! Values arrive already parsed; reading and writing calibration archives is
//! left to the caller.

use crate::error::TransformResult;
use crate::orientation::{Orientation, QuaternionXyzw};
use crate::pose::{compose, Pose, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where a camera is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraRole {
    /// Mounted on the gripper, moves with the tool
    Gripper,
    /// Fixed in the workspace
    Static,
}

impl fmt::Display for CameraRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraRole::Gripper => write!(f, "gripper"),
            CameraRole::Static => write!(f, "static"),
        }
    }
}

/// Extrinsic calibration of one camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraExtrinsics {
    pub role: CameraRole,
    pub position: Position,
    pub orientation: QuaternionXyzw,
}

impl CameraExtrinsics {
    pub fn new(role: CameraRole, position: Position, orientation: QuaternionXyzw) -> Self {
        Self {
            role,
            position,
            orientation,
        }
    }

    /// Camera pose relative to its reference (tool frame for the gripper
    /// camera, world frame for the static one)
    pub fn to_pose(&self) -> TransformResult<Pose> {
        compose(&self.position, &Orientation::QuatXyzw(self.orientation))
    }
}

/// Extrinsics for each mounted camera
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSet {
    cameras: BTreeMap<CameraRole, CameraExtrinsics>,
}

impl CalibrationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `extrinsics` under the role it carries, returning any entry it
    /// replaces
    pub fn insert(&mut self, extrinsics: CameraExtrinsics) -> Option<CameraExtrinsics> {
        self.cameras.insert(extrinsics.role, extrinsics)
    }

    pub fn get(&self, role: CameraRole) -> Option<&CameraExtrinsics> {
        self.cameras.get(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = CameraRole> + '_ {
        self.cameras.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}
