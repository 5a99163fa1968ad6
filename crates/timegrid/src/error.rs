//! Error types for the notus-timegrid crate.

use chrono::NaiveDateTime;

use crate::frequency::Frequency;

/// Error type for all fallible operations in the notus-timegrid crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeGridError {
    /// Returned when a requested range is empty or inverted.
    #[error("empty range: start {start} is not before end {end}")]
    EmptyRange {
        /// Requested range start.
        start: NaiveDateTime,
        /// Requested range end.
        end: NaiveDateTime,
    },

    /// Returned when a timestamp does not fall on a slot boundary.
    #[error("timestamp {timestamp} is not aligned to {frequency} slots")]
    Unaligned {
        /// The offending timestamp.
        timestamp: NaiveDateTime,
        /// Frequency the timestamp was checked against.
        frequency: Frequency,
    },

    /// Returned when a frequency name cannot be parsed.
    #[error("unknown frequency '{name}' (expected 'hourly' or 'daily')")]
    UnknownFrequency {
        /// The unrecognised name.
        name: String,
    },
}
