//! Output types for PET estimation.

use chrono::NaiveDateTime;
use notus_timegrid::TimeGrid;

use crate::method::PetMethod;

/// A slot the estimator could not compute, with the inputs it lacked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFailure {
    pub timestamp: NaiveDateTime,
    pub missing: Vec<&'static str>,
}

/// Estimated PET for one segment, one slot per grid entry.
///
/// Every grid slot is accounted for: it carries either an estimate in
/// `values` or an entry in `failures`. Values are depths in mm per slot.
#[derive(Debug, Clone)]
pub struct PetSeries {
    segment: String,
    method: PetMethod,
    grid: TimeGrid,
    values: Vec<Option<f64>>,
    failures: Vec<SlotFailure>,
}

impl PetSeries {
    pub(crate) fn new(
        segment: String,
        method: PetMethod,
        grid: TimeGrid,
        values: Vec<Option<f64>>,
        failures: Vec<SlotFailure>,
    ) -> Self {
        debug_assert_eq!(values.len(), grid.len());
        Self {
            segment,
            method,
            grid,
            values,
            failures,
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn method(&self) -> PetMethod {
        self.method
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Per-slot estimates; `None` marks a failed slot.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Slots that could not be estimated.
    pub fn failures(&self) -> &[SlotFailure] {
        &self.failures
    }

    /// Number of successfully estimated slots.
    ///
    /// The grid slot count is `grid().len()`; `estimated_count()` plus
    /// `failures().len()` always equals it.
    pub fn estimated_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// True when every slot produced an estimate.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Iterator over `(timestamp, pet)` for the estimated slots, in order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|value| (self.grid.timestamp(i), value)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use notus_timegrid::Frequency;

    use super::*;

    #[test]
    fn accounts_for_every_slot() {
        let start = NaiveDate::from_ymd_opt(2022, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 7, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let grid = TimeGrid::new(start, end, Frequency::Daily).unwrap();

        let failure = SlotFailure {
            timestamp: grid.timestamp(1),
            missing: vec!["wind"],
        };
        let series = PetSeries::new(
            "seg".into(),
            PetMethod::Daily,
            grid.clone(),
            vec![Some(3.1), None, Some(2.9)],
            vec![failure],
        );

        assert_eq!(series.estimated_count(), 2);
        assert!(!series.is_complete());
        assert_eq!(series.estimated_count() + series.failures().len(), grid.len());
        assert_eq!(series.iter().count(), 2);
        assert_eq!(series.iter().next().unwrap().1, 3.1);
    }
}
