//! Error types for pose and orientation conversions

use crate::frames::ReferenceFrame;
use thiserror::Error;

/// Transform errors
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Invalid orientation: {0}")]
    InvalidOrientation(String),

    #[error("Orientation near gimbal lock (pitch = {pitch} rad)")]
    SingularConfiguration { pitch: f64 },

    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),

    #[error("Cannot measure an angle against a zero-length vector")]
    DegenerateVector,

    #[error("Relative motion is expressed in the {found} frame, expected the {expected} frame")]
    FrameMismatch {
        expected: ReferenceFrame,
        found: ReferenceFrame,
    },

    #[error("Invalid pose matrix: {0}")]
    InvalidPose(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;

impl From<toml::de::Error> for TransformError {
    fn from(err: toml::de::Error) -> Self {
        TransformError::Config(err.to_string())
    }
}

/// Fail with `NumericOverflow` unless every component is finite.
pub(crate) fn ensure_finite(values: &[f64], what: &str) -> TransformResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(TransformError::NumericOverflow(format!(
            "{} has non-finite components: {:?}",
            what, values
        )))
    }
}
