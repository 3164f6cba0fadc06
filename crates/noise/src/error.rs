//! Error types for the psm-noise crate.

/// Error type for all fallible operations in the psm-noise crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NoiseError {
    /// Returned when a noise parameter is out of range.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the problem.
        reason: String,
    },

    /// Series construction error.
    #[error(transparent)]
    Season(#[from] psm_season::SeasonError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let e = NoiseError::InvalidArgument {
            reason: "sigma must be finite and positive, got 0".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid argument: sigma must be finite and positive, got 0"
        );
    }

    #[test]
    fn from_season_error() {
        let e: NoiseError = psm_season::SeasonError::EmptyData.into();
        assert!(matches!(e, NoiseError::Season(_)));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<NoiseError>();
    }
}
