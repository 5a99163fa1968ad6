//! Uniform slot axis over a half-open datetime range.

use chrono::{Duration, NaiveDateTime};

use crate::error::TimeGridError;
use crate::frequency::Frequency;

/// A half-open `[start, end)` range sliced into equal slots.
///
/// Slot `i` covers `[start + i*step, start + (i+1)*step)`. Both `start` and
/// `end` must fall on slot boundaries of the grid's frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    start: NaiveDateTime,
    frequency: Frequency,
    n_slots: usize,
}

impl TimeGrid {
    /// Creates a grid covering `[start, end)` at `frequency`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeGridError::EmptyRange`] if `start >= end` and
    /// [`TimeGridError::Unaligned`] if either bound is off a slot boundary.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        frequency: Frequency,
    ) -> Result<Self, TimeGridError> {
        if start >= end {
            return Err(TimeGridError::EmptyRange { start, end });
        }
        for &bound in &[start, end] {
            if !frequency.is_aligned(bound) {
                return Err(TimeGridError::Unaligned {
                    timestamp: bound,
                    frequency,
                });
            }
        }

        let span = (end - start).num_seconds();
        let n_slots = (span / frequency.step_seconds()) as usize;
        Ok(Self {
            start,
            frequency,
            n_slots,
        })
    }

    /// First slot boundary.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive end boundary.
    pub fn end(&self) -> NaiveDateTime {
        self.timestamp_unchecked(self.n_slots)
    }

    /// Grid frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.n_slots
    }

    /// Always false: construction rejects empty ranges.
    pub fn is_empty(&self) -> bool {
        self.n_slots == 0
    }

    /// Start timestamp of slot `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn timestamp(&self, i: usize) -> NaiveDateTime {
        assert!(i < self.n_slots, "slot {i} out of range 0..{}", self.n_slots);
        self.timestamp_unchecked(i)
    }

    fn timestamp_unchecked(&self, i: usize) -> NaiveDateTime {
        self.start + Duration::seconds(self.frequency.step_seconds() * i as i64)
    }

    /// Slot index of an aligned, in-range timestamp.
    ///
    /// Returns `None` for timestamps off the grid or outside `[start, end)`.
    pub fn index_of(&self, timestamp: NaiveDateTime) -> Option<usize> {
        let offset = (timestamp - self.start).num_seconds();
        if offset < 0 || offset % self.frequency.step_seconds() != 0 {
            return None;
        }
        let idx = (offset / self.frequency.step_seconds()) as usize;
        (idx < self.n_slots).then_some(idx)
    }

    /// All slot start timestamps, in order.
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        (0..self.n_slots).map(|i| self.timestamp_unchecked(i)).collect()
    }

    /// Returns true if `timestamp` is a slot start of this grid.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.index_of(timestamp).is_some()
    }
}
