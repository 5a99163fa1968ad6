//! Error types for the notus-reconcile crate.

use chrono::NaiveDateTime;

/// Error type for all fallible operations in the notus-reconcile crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReconcileError {
    /// Returned when a station series has no records.
    #[error("station '{station}': series is empty")]
    EmptySeries {
        /// Station identifier.
        station: String,
    },

    /// Returned when station timestamps are not strictly increasing.
    #[error("station '{station}': timestamps not strictly increasing at record {index}")]
    NonMonotonicTimestamps {
        /// Station identifier.
        station: String,
        /// Index of the first out-of-order record.
        index: usize,
    },

    /// Returned when a station timestamp is off its frequency's slot boundary.
    #[error("station '{station}': timestamp {timestamp} not aligned to its reporting frequency")]
    UnalignedTimestamp {
        /// Station identifier.
        station: String,
        /// The offending timestamp.
        timestamp: NaiveDateTime,
    },

    /// Returned when a station value is NaN or infinite.
    #[error("station '{station}': non-finite value at {timestamp}")]
    NonFiniteValue {
        /// Station identifier.
        station: String,
        /// Timestamp of the offending record.
        timestamp: NaiveDateTime,
    },

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

    /// Returned when a latitude/longitude pair is out of range.
    #[error("invalid location: lat {lat}, lon {lon}")]
    InvalidLocation {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when no candidate station overlaps the requested range.
    #[error("segment '{segment}': no station overlaps the requested range")]
    NoOverlap {
        /// Target segment identifier.
        segment: String,
    },

    /// Returned when slots remain uncovered after all combination strategies.
    #[error(
        "segment '{segment}': {n} slot(s) unresolved, first at {first}",
        n = .slots.len(),
        first = .slots.first().map(|t| t.to_string()).unwrap_or_default()
    )]
    InsufficientData {
        /// Target segment identifier.
        segment: String,
        /// Every unresolved slot timestamp, in order. Non-empty when
        /// constructed by the reconciler.
        slots: Vec<NaiveDateTime>,
    },

    /// Returned when a provenance tag cannot be parsed.
    #[error("unknown provenance '{name}'")]
    UnknownProvenance {
        /// The unrecognised tag.
        name: String,
    },
}
