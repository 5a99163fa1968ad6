//! Output type for reconciliation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use notus_timegrid::TimeGrid;

use crate::error::ReconcileError;

/// How a reconciled value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Passed through from a single station at matching frequency.
    Observed,
    /// Summed or averaged from finer-frequency records.
    Aggregated,
    /// Distributed from a coarser-frequency record.
    Disaggregated,
    /// Estimated: in-station gap fill or multi-station spatial combination.
    Interpolated,
}

impl Provenance {
    /// Stable tag used in file output.
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Observed => "observed",
            Provenance::Aggregated => "aggregated",
            Provenance::Disaggregated => "disaggregated",
            Provenance::Interpolated => "interpolated",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provenance {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "observed" => Ok(Provenance::Observed),
            "aggregated" => Ok(Provenance::Aggregated),
            "disaggregated" => Ok(Provenance::Disaggregated),
            "interpolated" => Ok(Provenance::Interpolated),
            _ => Err(ReconcileError::UnknownProvenance {
                name: s.to_string(),
            }),
        }
    }
}

/// Gap-free, uniform-frequency estimate series for one segment and variable.
///
/// Holds exactly one value per grid slot; immutable once produced.
/// Provenance is tracked per slot so callers can audit which values were
/// observed versus estimated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledSeries {
    segment: String,
    variable: String,
    grid: TimeGrid,
    values: Vec<f64>,
    provenance: Vec<Provenance>,
}

impl ReconciledSeries {
    /// Creates a reconciled series, validating coverage.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::LengthMismatch`] if `values` or
    /// `provenance` does not have exactly one entry per grid slot.
    pub fn new(
        segment: impl Into<String>,
        variable: impl Into<String>,
        grid: TimeGrid,
        values: Vec<f64>,
        provenance: Vec<Provenance>,
    ) -> Result<Self, ReconcileError> {
        if values.len() != grid.len() {
            return Err(ReconcileError::LengthMismatch {
                field: "values",
                expected: grid.len(),
                got: values.len(),
            });
        }
        if provenance.len() != grid.len() {
            return Err(ReconcileError::LengthMismatch {
                field: "provenance",
                expected: grid.len(),
                got: provenance.len(),
            });
        }
        Ok(Self {
            segment: segment.into(),
            variable: variable.into(),
            grid,
            values,
            provenance,
        })
    }

    /// Target segment identifier.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The grid the series covers.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Estimated values, one per slot.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Per-slot provenance, parallel to [`values`](Self::values).
    pub fn provenance(&self) -> &[Provenance] {
        &self.provenance
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: the grid is never empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Record at slot `i` as `(timestamp, value, provenance)`.
    pub fn record(&self, i: usize) -> (NaiveDateTime, f64, Provenance) {
        (self.grid.timestamp(i), self.values[i], self.provenance[i])
    }

    /// Iterator over `(timestamp, value, provenance)` records.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64, Provenance)> + '_ {
        (0..self.len()).map(|i| self.record(i))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use notus_timegrid::Frequency;

    use super::*;

    fn grid(n_days: u32) -> TimeGrid {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 1, 1 + n_days)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TimeGrid::new(start, end, Frequency::Daily).unwrap()
    }

    #[test]
    fn provenance_tags_roundtrip() {
        for p in [
            Provenance::Observed,
            Provenance::Aggregated,
            Provenance::Disaggregated,
            Provenance::Interpolated,
        ] {
            assert_eq!(p.as_str().parse::<Provenance>().unwrap(), p);
        }
    }

    #[test]
    fn provenance_unknown_tag() {
        assert!(matches!(
            "guessed".parse::<Provenance>(),
            Err(ReconcileError::UnknownProvenance { .. })
        ));
    }

    #[test]
    fn valid_construction_and_accessors() {
        let g = grid(3);
        let s = ReconciledSeries::new(
            "outlet",
            "precip",
            g.clone(),
            vec![1.0, 2.0, 3.0],
            vec![Provenance::Observed; 3],
        )
        .unwrap();

        assert_eq!(s.segment(), "outlet");
        assert_eq!(s.variable(), "precip");
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.grid(), &g);

        let (ts, v, p) = s.record(1);
        assert_eq!(ts, g.timestamp(1));
        assert_eq!(v, 2.0);
        assert_eq!(p, Provenance::Observed);

        assert_eq!(s.iter().count(), 3);
    }

    #[test]
    fn error_value_length_mismatch() {
        let result = ReconciledSeries::new(
            "outlet",
            "precip",
            grid(3),
            vec![1.0],
            vec![Provenance::Observed; 3],
        );
        assert!(matches!(
            result,
            Err(ReconcileError::LengthMismatch {
                field: "values",
                expected: 3,
                got: 1,
            })
        ));
    }

    #[test]
    fn error_provenance_length_mismatch() {
        let result = ReconciledSeries::new(
            "outlet",
            "precip",
            grid(2),
            vec![1.0, 2.0],
            vec![Provenance::Observed],
        );
        assert!(matches!(
            result,
            Err(ReconcileError::LengthMismatch {
                field: "provenance",
                ..
            })
        ));
    }
}
