//! Aggregation semantics of climate variables.

use std::fmt;
use std::str::FromStr;

use crate::error::ReconcileError;

/// How a variable behaves under frequency conversion.
///
/// Additive variables (precipitation, solar energy per slot) sum when
/// aggregated and split when disaggregated; intensive variables
/// (temperature, humidity, wind speed) average when aggregated and
/// replicate when disaggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Totals: aggregate by sum, disaggregate by distribution.
    Additive,
    /// Point-in-time intensities: aggregate by mean, disaggregate by replication.
    Intensive,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Additive => write!(f, "additive"),
            VariableKind::Intensive => write!(f, "intensive"),
        }
    }
}

impl FromStr for VariableKind {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "additive" => Ok(VariableKind::Additive),
            "intensive" => Ok(VariableKind::Intensive),
            _ => Err(ReconcileError::InvalidConfig {
                reason: format!("unknown variable kind '{s}' (expected 'additive' or 'intensive')"),
            }),
        }
    }
}
