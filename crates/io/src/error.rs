//! Error types for psm-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the psm-io crate.
///
/// This enum covers I/O failures, Parquet errors, schema problems and
/// data-model mismatches encountered when reading or writing tables.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required column is not present in a file.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Wraps a calendar error from the stored dates.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Wraps an error from building the in-memory data model.
    #[error("data model error: {reason}")]
    Model {
        /// Description of the underlying failure.
        reason: String,
    },
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<psm_calendar::CalendarError> for IoError {
    fn from(e: psm_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

impl From<psm_season::SeasonError> for IoError {
    fn from(e: psm_season::SeasonError) -> Self {
        IoError::Model {
            reason: e.to_string(),
        }
    }
}

impl From<psm_chron::ChronError> for IoError {
    fn from(e: psm_chron::ChronError) -> Self {
        IoError::Model {
            reason: e.to_string(),
        }
    }
}
