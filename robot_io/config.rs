//! Numeric tolerances for orientation and pose validation

use crate::error::{TransformError, TransformResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default maximum deviation of a quaternion norm from 1
pub const DEFAULT_QUATERNION_NORM_TOLERANCE: f64 = 1e-3;

/// Default maximum deviation of a rotation block from orthonormality
pub const DEFAULT_ORTHONORMALITY_TOLERANCE: f64 = 1e-6;

/// Default distance of |pitch| from π/2 treated as gimbal lock
pub const DEFAULT_GIMBAL_LOCK_THRESHOLD: f64 = 1e-3;

/// Tolerances used when validating orientations and poses
///
/// Can be loaded from TOML; missing fields take their defaults:
///
/// ```toml
/// quaternion_norm = 1e-3
/// orthonormality = 1e-6
/// gimbal_lock = 1e-3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Maximum `| |q| - 1 |` accepted for an input quaternion
    ///
    /// Default: 1e-3
    pub quaternion_norm: f64,

    /// Maximum entry-wise deviation of `RᵀR` from identity and of `det R` from 1
    ///
    /// Default: 1e-6
    pub orthonormality: f64,

    /// Distance of `|pitch|` from π/2 below which an Euler decomposition
    /// is reported as singular
    ///
    /// Default: 1e-3
    pub gimbal_lock: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            quaternion_norm: DEFAULT_QUATERNION_NORM_TOLERANCE,
            orthonormality: DEFAULT_ORTHONORMALITY_TOLERANCE,
            gimbal_lock: DEFAULT_GIMBAL_LOCK_THRESHOLD,
        }
    }
}

impl Tolerances {
    /// Tight preset for inputs produced by this library itself
    pub fn strict() -> Self {
        Self {
            quaternion_norm: 1e-9,
            orthonormality: 1e-9,
            gimbal_lock: DEFAULT_GIMBAL_LOCK_THRESHOLD,
        }
    }

    /// Custom configuration builder
    pub fn custom() -> TolerancesBuilder {
        TolerancesBuilder::new()
    }

    /// Validate configuration
    pub fn validate(&self) -> TransformResult<()> {
        let fields = [
            ("quaternion_norm", self.quaternion_norm),
            ("orthonormality", self.orthonormality),
            ("gimbal_lock", self.gimbal_lock),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(TransformError::Config(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        if self.quaternion_norm >= 1.0 {
            return Err(TransformError::Config(
                "quaternion_norm must be below 1".to_string(),
            ));
        }
        if self.gimbal_lock >= std::f64::consts::FRAC_PI_2 {
            return Err(TransformError::Config(
                "gimbal_lock must be below pi/2".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate tolerances from a TOML document
    pub fn from_toml_str(content: &str) -> TransformResult<Self> {
        let tolerances: Tolerances = toml::from_str(content)?;
        tolerances.validate()?;
        Ok(tolerances)
    }

    /// Load tolerances from a TOML file
    pub fn load(path: impl AsRef<Path>) -> TransformResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let tolerances = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?tolerances, "loaded tolerances");
        Ok(tolerances)
    }
}

/// Builder for custom tolerances
pub struct TolerancesBuilder {
    config: Tolerances,
}

impl TolerancesBuilder {
    pub fn new() -> Self {
        Self {
            config: Tolerances::default(),
        }
    }

    /// Set the quaternion norm tolerance
    pub fn quaternion_norm(mut self, tolerance: f64) -> Self {
        self.config.quaternion_norm = tolerance;
        self
    }

    /// Set the rotation block orthonormality tolerance
    pub fn orthonormality(mut self, tolerance: f64) -> Self {
        self.config.orthonormality = tolerance;
        self
    }

    /// Set the gimbal lock threshold
    pub fn gimbal_lock(mut self, threshold: f64) -> Self {
        self.config.gimbal_lock = threshold;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> TransformResult<Tolerances> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for TolerancesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tol = Tolerances::default();
        assert_eq!(tol.quaternion_norm, 1e-3);
        assert_eq!(tol.orthonormality, 1e-6);
        assert!(tol.validate().is_ok());
        assert!(Tolerances::strict().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let tol = Tolerances::custom()
            .quaternion_norm(1e-4)
            .gimbal_lock(0.01)
            .build()
            .unwrap();

        assert_eq!(tol.quaternion_norm, 1e-4);
        assert_eq!(tol.gimbal_lock, 0.01);
        assert_eq!(tol.orthonormality, DEFAULT_ORTHONORMALITY_TOLERANCE);
    }

    #[test]
    fn test_validation() {
        let mut tol = Tolerances::default();
        tol.quaternion_norm = 0.0;
        assert!(tol.validate().is_err());

        tol = Tolerances::default();
        tol.orthonormality = f64::NAN;
        assert!(tol.validate().is_err());

        tol = Tolerances::default();
        tol.gimbal_lock = 2.0;
        assert!(tol.validate().is_err());

        assert!(Tolerances::custom().quaternion_norm(1.5).build().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let tol = Tolerances::from_toml_str("quaternion_norm = 0.01\n").unwrap();
        assert_eq!(tol.quaternion_norm, 0.01);
        assert_eq!(tol.gimbal_lock, DEFAULT_GIMBAL_LOCK_THRESHOLD);
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        let result = Tolerances::from_toml_str("orthonormality = -1.0\n");
        assert!(matches!(result, Err(TransformError::Config(_))));

        let result = Tolerances::from_toml_str("orthonormality = \"tight\"\n");
        assert!(matches!(result, Err(TransformError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Tolerances::load("/nonexistent/robot_io/tolerances.toml");
        assert!(matches!(result, Err(TransformError::Io(_))));
    }
}
