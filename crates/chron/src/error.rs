//! Error types for the psm-chron crate.

/// Error type for all fallible operations in the psm-chron crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChronError {
    /// Returned when a method, sampling policy or size is not acceptable.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the simulation and the chronology do not overlap at all.
    #[error("data unavailable: {reason}")]
    DataUnavailable {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when array lengths don't match.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when input contains NaN or infinity.
    #[error("non-finite value in {field}")]
    NonFiniteInput {
        /// Name of the field containing the non-finite value.
        field: &'static str,
    },

    /// Seasonal resampling error.
    #[error(transparent)]
    Season(#[from] psm_season::SeasonError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let e = ChronError::InvalidArgument {
            reason: "unknown method \"nearest\"".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid argument: unknown method \"nearest\""
        );
    }

    #[test]
    fn display_data_unavailable() {
        let e = ChronError::DataUnavailable {
            reason: "no age overlaps".to_string(),
        };
        assert_eq!(e.to_string(), "data unavailable: no age overlaps");
    }

    #[test]
    fn display_non_finite() {
        let e = ChronError::NonFiniteInput { field: "depths" };
        assert_eq!(e.to_string(), "non-finite value in depths");
    }

    #[test]
    fn from_season_error() {
        let se = psm_season::SeasonError::EmptyData;
        let ce: ChronError = se.into();
        assert!(matches!(ce, ChronError::Season(_)));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ChronError>();
    }
}
