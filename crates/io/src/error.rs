//! Error types for notus-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the notus-io crate.
///
/// Covers I/O failures, format-specific errors from CSV and Parquet,
/// validation problems, and data-model mismatches encountered when reading
/// or writing station and segment files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV layer.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet library.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Wraps a model error from the reconciliation crate.
    #[error("series error: {reason}")]
    Series {
        /// Description of the underlying model failure.
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

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<notus_reconcile::ReconcileError> for IoError {
    fn from(e: notus_reconcile::ReconcileError) -> Self {
        IoError::Series {
            reason: e.to_string(),
        }
    }
}

impl From<notus_timegrid::TimeGridError> for IoError {
    fn from(e: notus_timegrid::TimeGridError) -> Self {
        IoError::InvalidTime {
            reason: e.to_string(),
        }
    }
}
