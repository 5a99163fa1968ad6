//! Reporting frequency of a series.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};

use crate::error::TimeGridError;

/// Reporting frequency, ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Frequency {
    /// One value per hour.
    Hourly,
    /// One value per day.
    Daily,
}

impl Frequency {
    /// Slot length in seconds.
    pub fn step_seconds(self) -> i64 {
        match self {
            Frequency::Hourly => 3_600,
            Frequency::Daily => 86_400,
        }
    }

    /// Returns true if `self` has shorter slots than `other`.
    pub fn is_finer_than(self, other: Frequency) -> bool {
        self.step_seconds() < other.step_seconds()
    }

    /// Number of `self` slots inside one `coarser` slot.
    ///
    /// Returns `None` when `coarser` is not actually coarser than `self`.
    pub fn subdivisions_of(self, coarser: Frequency) -> Option<usize> {
        if self.is_finer_than(coarser) {
            Some((coarser.step_seconds() / self.step_seconds()) as usize)
        } else {
            None
        }
    }

    /// Returns true if `timestamp` falls on a slot boundary of this frequency.
    pub fn is_aligned(self, timestamp: NaiveDateTime) -> bool {
        let on_hour = timestamp.minute() == 0
            && timestamp.second() == 0
            && timestamp.nanosecond() == 0;
        match self {
            Frequency::Hourly => on_hour,
            Frequency::Daily => on_hour && timestamp.hour() == 0,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Hourly => write!(f, "hourly"),
            Frequency::Daily => write!(f, "daily"),
        }
    }
}

impl FromStr for Frequency {
    type Err = TimeGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Frequency::Hourly),
            "daily" => Ok(Frequency::Daily),
            _ => Err(TimeGridError::UnknownFrequency {
                name: s.to_string(),
            }),
        }
    }
}
