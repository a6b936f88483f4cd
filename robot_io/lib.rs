//! # robot_io
//!
//! Pose and orientation transforms for commanding robot end-effectors.
//!
//! ## Structure
//!
//! ```text
//! robot_io/
//! ── orientation/    # Quaternion, Euler, rotation vector types and conversions
//! ── pose/           # Homogeneous transforms, rigid inverse, composition
//! ── frames/         # World/tool frame conversions and relative action records
//! ── angles/         # Wrap-safe angle helpers
//! ── calibration.rs  # Camera extrinsics keyed by role
//! ── config.rs       # Validation tolerances (TOML)
//! ```
//!
//! All functions are pure and operate on plain values, so they can be called
//! from any thread. Diagnostics go through `tracing`; the library never
//! installs a subscriber.
//!
//! Operations that validate input have a `_with` variant taking
//! [`Tolerances`]; the plain form uses `Tolerances::default()`.
//!
//! ## Usage
//!
//! ```rust
//! use robot_io::{to_relative, to_world_frame, EulerXyz, Orientation, QuaternionXyzw};
//! use nalgebra::Vector3;
//!
//! let tcp = Orientation::QuatXyzw(QuaternionXyzw::IDENTITY);
//! let target = Orientation::Euler(EulerXyz::new(0.0, 0.0, 0.3));
//!
//! // Delta in the tool frame the end-effector starts in
//! let rel = to_relative(&Vector3::zeros(), &tcp, &Vector3::new(0.0, 0.0, 0.1), &target)?;
//!
//! // Same delta seen from the world frame
//! let world = to_world_frame(&rel.position, &Orientation::Euler(rel.orientation), &tcp)?;
//! assert!((world.position.z - 0.1).abs() < 1e-12);
//! # Ok::<(), robot_io::TransformError>(())
//! ```

pub mod angles;
pub mod calibration;
pub mod config;
pub mod error;
pub mod frames;
pub mod orientation;
pub mod pose;

pub use angles::{angle_between, angle_between_angles, z_angle_between};
pub use calibration::{CalibrationSet, CameraExtrinsics, CameraRole};
pub use config::Tolerances;
pub use error::{TransformError, TransformResult};
pub use frames::action::{
    to_relative_action, to_relative_action_from_states, Action, Motion, ReferenceType, TcpState,
};
pub use frames::{
    to_relative, to_relative_all_frames, to_relative_all_frames_with, to_relative_with,
    to_tcp_frame, to_tcp_frame_with, to_world_frame, to_world_frame_with, ReferenceFrame,
    RelativeMotion, RelativeMotionFrames,
};
pub use orientation::{
    check_gimbal_lock, euler_to_quat, euler_to_rotvec, quat_to_euler, quat_to_euler_with,
    quat_to_rotvec, rotation_angle_between, rotvec_to_euler, rotvec_to_euler_with,
    rotvec_to_quat, EulerXyz, Orientation, QuaternionWxyz, QuaternionXyzw, RotationVector,
};
pub use pose::{compose, compose_with, decompose, Pose, Position};
