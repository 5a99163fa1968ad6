use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors from PET configuration, forcing assembly and estimation.
#[derive(Debug, Error)]
pub enum PetError {
    #[error("invalid PET configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("forcing series '{variable}' is on a {got} grid, expected {expected}")]
    FrequencyMismatch {
        variable: &'static str,
        expected: String,
        got: String,
    },

    #[error(
        "forcing series '{variable}' has {got} values for a grid of {expected} slots"
    )]
    LengthMismatch {
        variable: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("missing inputs at {timestamp}: {}", .fields.join(", "))]
    MissingInput {
        timestamp: NaiveDateTime,
        fields: Vec<&'static str>,
    },

    #[error("hourly PET method requires an hourly grid, got {got}")]
    MethodGridMismatch { got: String },
}
