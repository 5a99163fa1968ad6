//! Validated ingest of raw station observations.

use chrono::NaiveDateTime;
use notus_timegrid::{Frequency, TimeGrid};

use crate::error::ReconcileError;
use crate::location::Location;

/// Quality flag attached to a raw observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityFlag {
    /// Value passed the provider's checks.
    Good,
    /// Value was estimated by the provider.
    Estimated,
    /// Value failed the provider's checks.
    Suspect,
}

/// One raw observation from a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationRecord {
    /// Slot start timestamp.
    pub timestamp: NaiveDateTime,
    /// Observed value.
    pub value: f64,
    /// Provider quality flag.
    pub quality: QualityFlag,
}

/// Observed time series from a single monitoring location.
///
/// Records are stored sparsely: gaps are absent timestamps, never
/// zero-filled. Construction validates that timestamps are strictly
/// increasing, aligned to the station's reporting frequency, and that all
/// values are finite. The series is read-only after construction.
#[derive(Debug, Clone)]
pub struct StationSeries {
    id: String,
    location: Option<Location>,
    frequency: Frequency,
    timestamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
    qualities: Vec<QualityFlag>,
}

impl StationSeries {
    /// Creates a station series from raw records.
    ///
    /// `location` is `None` for stations whose coordinates are unknown;
    /// such stations are excluded from distance weighting but still usable
    /// as a sole data source.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::EmptySeries`] for zero records,
    /// [`ReconcileError::NonMonotonicTimestamps`] for out-of-order records,
    /// [`ReconcileError::UnalignedTimestamp`] for timestamps off the
    /// frequency's slot boundaries, and [`ReconcileError::NonFiniteValue`]
    /// for NaN or infinite values.
    pub fn new(
        id: impl Into<String>,
        location: Option<Location>,
        frequency: Frequency,
        records: Vec<StationRecord>,
    ) -> Result<Self, ReconcileError> {
        let id = id.into();

        if records.is_empty() {
            return Err(ReconcileError::EmptySeries { station: id });
        }

        for (i, rec) in records.iter().enumerate() {
            if !frequency.is_aligned(rec.timestamp) {
                return Err(ReconcileError::UnalignedTimestamp {
                    station: id,
                    timestamp: rec.timestamp,
                });
            }
            if !rec.value.is_finite() {
                return Err(ReconcileError::NonFiniteValue {
                    station: id,
                    timestamp: rec.timestamp,
                });
            }
            if i > 0 && rec.timestamp <= records[i - 1].timestamp {
                return Err(ReconcileError::NonMonotonicTimestamps {
                    station: id,
                    index: i,
                });
            }
        }

        let timestamps = records.iter().map(|r| r.timestamp).collect();
        let values = records.iter().map(|r| r.value).collect();
        let qualities = records.iter().map(|r| r.quality).collect();

        Ok(Self {
            id,
            location,
            frequency,
            timestamps,
            values,
            qualities,
        })
    }

    /// Station identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Station location, if known.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Native reporting frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Record timestamps (strictly increasing).
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Record values, parallel to [`timestamps`](Self::timestamps).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Record quality flags, parallel to [`timestamps`](Self::timestamps).
    pub fn qualities(&self) -> &[QualityFlag] {
        &self.qualities
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false: construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// First record timestamp.
    pub fn first_timestamp(&self) -> NaiveDateTime {
        self.timestamps[0]
    }

    /// Last record timestamp.
    pub fn last_timestamp(&self) -> NaiveDateTime {
        self.timestamps[self.timestamps.len() - 1]
    }

    /// Returns true if any record falls inside the grid's range.
    ///
    /// The comparison uses the record's covered interval, so a coarse record
    /// starting just before the grid but extending into it still counts.
    pub fn overlaps(&self, grid: &TimeGrid) -> bool {
        let step = chrono::Duration::seconds(self.frequency.step_seconds());
        self.last_timestamp() + step > grid.start() && self.first_timestamp() < grid.end()
    }
}
