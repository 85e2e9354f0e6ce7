//! Flattener configuration.

use serde::{Deserialize, Serialize};

use crate::error::FlattenError;

/// Tuning for [`PathFlattener`](crate::PathFlattener).
///
/// `tolerance` bounds how far a cubic's control points may stray from the
/// chord that replaces it. The two caps stop subdivision early on
/// pathological input; a piece cut off by a cap is emitted as-is and counted
/// in [`FlattenStats`](crate::FlattenStats).
///
/// Missing fields deserialize to their defaults:
///
/// ```
/// use pathflat::FlattenConfig;
///
/// let config: FlattenConfig = serde_json::from_str(r#"{ "tolerance": 0.25 }"#)?;
/// assert_eq!(config.tolerance, 0.25);
/// assert_eq!(config.max_depth, FlattenConfig::DEFAULT_MAX_DEPTH);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlattenConfig {
    /// Maximum allowed deviation of a control point from its chord, in path
    /// units.
    pub tolerance: f32,
    /// Subdivision depth at which a cubic piece is emitted regardless of
    /// flatness.
    pub max_depth: u32,
    /// Control-polygon length below which a cubic piece is emitted regardless
    /// of flatness. Zero disables the cap.
    pub min_segment_length: f32,
}

impl FlattenConfig {
    /// Tolerance used by [`Default`].
    pub const DEFAULT_TOLERANCE: f32 = 0.01;

    /// Depth cap used unless configured otherwise: at most 2^16 pieces per
    /// cubic.
    pub const DEFAULT_MAX_DEPTH: u32 = 16;

    /// Hard ceiling on `max_depth`.
    pub const MAX_DEPTH_LIMIT: u32 = 32;

    /// Create a configuration with the given tolerance and default caps.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::InvalidTolerance`] if `tolerance` is negative
    /// or non-finite.
    pub fn new(tolerance: f32) -> Result<Self, FlattenError> {
        let config = Self {
            tolerance,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the subdivision depth cap.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum control-polygon length.
    #[must_use]
    pub fn with_min_segment_length(mut self, min_segment_length: f32) -> Self {
        self.min_segment_length = min_segment_length;
        self
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// - [`FlattenError::InvalidTolerance`] for a negative or non-finite
    ///   tolerance
    /// - [`FlattenError::InvalidConfiguration`] for a `max_depth` above
    ///   [`Self::MAX_DEPTH_LIMIT`] or a negative or non-finite
    ///   `min_segment_length`
    pub fn validate(&self) -> Result<(), FlattenError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(FlattenError::InvalidTolerance(self.tolerance));
        }
        if self.max_depth > Self::MAX_DEPTH_LIMIT {
            return Err(FlattenError::InvalidConfiguration(format!(
                "max_depth {} exceeds {}",
                self.max_depth,
                Self::MAX_DEPTH_LIMIT
            )));
        }
        if !self.min_segment_length.is_finite() {
            return Err(FlattenError::InvalidConfiguration(
                "min_segment_length must be finite".to_string(),
            ));
        }
        if self.min_segment_length < 0.0 {
            return Err(FlattenError::InvalidConfiguration(format!(
                "min_segment_length must be >= 0, got {}",
                self.min_segment_length
            )));
        }
        Ok(())
    }
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            min_segment_length: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() -> Result<(), FlattenError> {
        let config = FlattenConfig::new(0.5)?;
        assert_eq!(config.tolerance, 0.5);
        assert_eq!(config.max_depth, FlattenConfig::DEFAULT_MAX_DEPTH);
        assert_eq!(config.min_segment_length, 0.0);
        Ok(())
    }

    #[test]
    fn test_zero_tolerance_is_allowed() {
        assert!(FlattenConfig::new(0.0).is_ok());
    }

    #[test]
    fn test_invalid_tolerance() {
        for bad in [-0.1, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            match FlattenConfig::new(bad) {
                Err(FlattenError::InvalidTolerance(_)) => {}
                other => panic!("expected InvalidTolerance for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_depth_ceiling() {
        let config = FlattenConfig::default().with_max_depth(FlattenConfig::MAX_DEPTH_LIMIT);
        assert!(config.validate().is_ok());

        let config = FlattenConfig::default().with_max_depth(FlattenConfig::MAX_DEPTH_LIMIT + 1);
        assert!(matches!(
            config.validate(),
            Err(FlattenError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_min_segment_length_validation() {
        let config = FlattenConfig::default().with_min_segment_length(-1.0);
        assert!(matches!(
            config.validate(),
            Err(FlattenError::InvalidConfiguration(_))
        ));

        let config = FlattenConfig::default().with_min_segment_length(f32::NAN);
        assert!(config.validate().is_err());

        let config = FlattenConfig::default().with_min_segment_length(0.001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(FlattenConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = FlattenConfig::default()
            .with_max_depth(8)
            .with_min_segment_length(0.5);
        let json = serde_json::to_string(&config).expect("serialization failed");
        let back: FlattenConfig = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(config, back);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: FlattenConfig =
            serde_json::from_str(r#"{ "max_depth": 4 }"#).expect("deserialization failed");
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.tolerance, FlattenConfig::DEFAULT_TOLERANCE);
    }
}
