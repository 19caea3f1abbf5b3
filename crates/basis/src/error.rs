//! Error types for the wavelift-basis crate.

/// Error type for all fallible operations in the wavelift-basis crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BasisError {
    /// Returned when the level count is below the scheme's width.
    #[error("{scheme} needs at least {width} levels, got {levels}")]
    LevelsBelowWidth {
        /// Scheme name.
        scheme: String,
        /// Minimum level count.
        width: u32,
        /// Requested level count.
        levels: u32,
    },

    /// Returned when the level count would need an unreasonably large buffer.
    #[error("levels must be <= {max}, got {levels}")]
    TooManyLevels {
        /// Requested level count.
        levels: u32,
        /// Largest supported level count.
        max: u32,
    },

    /// Returned when a component or smoothing level lies outside the basis.
    #[error("level {level} out of range 0..={max}")]
    LevelOutOfRange {
        /// Requested level.
        level: u32,
        /// Largest valid level.
        max: u32,
    },

    /// Returned when a test-function index is not in 0..10.
    #[error("test function index must be in 0..10, got {0}")]
    UnknownTestFunction(usize),

    /// Returned when a threshold is NaN or negative.
    #[error("threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f64),

    /// Returned when the constructor's sweep would evaluate too many values.
    #[error("sweep of {count} candidates exceeds the limit of {max}")]
    TooManyCandidates {
        /// Requested sweep length.
        count: f64,
        /// Largest supported sweep length.
        max: usize,
    },

    /// Returned when the constructor's sweep configuration is unusable.
    #[error("invalid search configuration: {reason}")]
    InvalidSearch {
        /// Why the configuration was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_levels_below_width() {
        let err = BasisError::LevelsBelowWidth {
            scheme: "cdf97".into(),
            width: 4,
            levels: 3,
        };
        assert_eq!(err.to_string(), "cdf97 needs at least 4 levels, got 3");
    }

    #[test]
    fn error_too_many_levels() {
        let err = BasisError::TooManyLevels { levels: 40, max: 24 };
        assert_eq!(err.to_string(), "levels must be <= 24, got 40");
    }

    #[test]
    fn error_level_out_of_range() {
        let err = BasisError::LevelOutOfRange { level: 9, max: 8 };
        assert_eq!(err.to_string(), "level 9 out of range 0..=8");
    }

    #[test]
    fn error_unknown_test_function() {
        let err = BasisError::UnknownTestFunction(12);
        assert_eq!(
            err.to_string(),
            "test function index must be in 0..10, got 12"
        );
    }

    #[test]
    fn error_invalid_threshold() {
        let err = BasisError::InvalidThreshold(-1.0);
        assert_eq!(
            err.to_string(),
            "threshold must be a non-negative number, got -1"
        );
    }

    #[test]
    fn error_invalid_search() {
        let err = BasisError::InvalidSearch {
            reason: "step must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid search configuration: step must be positive"
        );
    }

    #[test]
    fn error_too_many_candidates() {
        let err = BasisError::TooManyCandidates {
            count: 4e12,
            max: 1_000_000,
        };
        assert_eq!(
            err.to_string(),
            "sweep of 4000000000000 candidates exceeds the limit of 1000000"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<BasisError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<BasisError>();
    }
}
