//! Error types for the psm-season crate.

/// Error type for all fallible operations in the psm-season crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeasonError {
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

    /// Returned when the site latitude is NaN or infinite.
    #[error("invalid latitude: {lat}")]
    InvalidLatitude {
        /// The offending latitude.
        lat: f64,
    },

    /// Returned when neither a habitat season nor a month list is given.
    #[error("target carries no habitat season and no month list")]
    MissingHabitatSeason,

    /// Returned when a habitat season label is not recognised.
    #[error("unknown habitat season: {label:?}")]
    UnknownHabitatSeason {
        /// The unrecognised label.
        label: String,
    },

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] psm_calendar::CalendarError),
}
