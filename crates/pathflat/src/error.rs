//! Error types for flattening operations.

/// Error type for flattening operations.
///
/// Building a table from a valid configuration never fails, and the plain
/// queries on [`ArcLengthIndex`](crate::ArcLengthIndex) answer every finite
/// input. Errors only come from configuration validation and from the
/// checked `try_*` queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlattenError {
    /// Flatness tolerance is negative or non-finite.
    #[error("Flatness tolerance must be finite and >= 0, got {0}")]
    InvalidTolerance(f32),

    /// Invalid flattener configuration.
    ///
    /// This covers errors like:
    /// - Minimum segment length < 0 or non-finite
    /// - Maximum subdivision depth above the hard ceiling
    #[error("Invalid flattener configuration: {0}")]
    InvalidConfiguration(String),

    /// A checked query received a NaN or infinite argument.
    #[error("{query} requires a finite argument, got {value}")]
    NonFiniteQuery {
        /// Name of the query that rejected the argument.
        query: &'static str,
        /// The rejected value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_tolerance() {
        let err = FlattenError::InvalidTolerance(-0.5);
        let msg = err.to_string();
        assert!(msg.contains("tolerance"));
        assert!(msg.contains("-0.5"));
    }

    #[test]
    fn test_error_display_invalid_config() {
        let err = FlattenError::InvalidConfiguration("max_depth 40 exceeds 32".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid flattener configuration"));
        assert!(msg.contains("max_depth 40"));
    }

    #[test]
    fn test_error_display_non_finite_query() {
        let err = FlattenError::NonFiniteQuery {
            query: "length_to_dot",
            value: f64::NAN,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("length_to_dot"));
        assert!(msg.contains("NaN"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = FlattenError::InvalidTolerance(f32::INFINITY);
        let _: &dyn std::error::Error = &err;
    }
}
