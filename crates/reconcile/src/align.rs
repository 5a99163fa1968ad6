//! Per-station frequency normalisation onto the target grid.

use std::collections::HashMap;
use std::f64::consts::TAU;

use chrono::{Duration, NaiveDateTime, Timelike};
use notus_timegrid::TimeGrid;

use crate::config::{DisaggProfile, ReconcileConfig};
use crate::result::Provenance;
use crate::station::StationSeries;
use crate::variable::VariableKind;

/// One grid slot of a normalised station: a value with its provenance, or
/// missing.
pub(crate) type Cell = Option<(f64, Provenance)>;

/// Normalises a station's records onto the grid's frequency.
///
/// Finer-than-target records are aggregated (sum for additive variables,
/// mean for intensive ones); target slots with incomplete sub-slot coverage
/// stay missing rather than biasing totals. Coarser-than-target records are
/// distributed over their sub-slots per the configured profile. Records at
/// matching frequency pass through as observed.
pub(crate) fn align_station(
    station: &StationSeries,
    grid: &TimeGrid,
    kind: VariableKind,
    config: &ReconcileConfig,
) -> Vec<Cell> {
    let native = station.frequency();
    let target = grid.frequency();

    if native == target {
        passthrough(station, grid)
    } else if native.is_finer_than(target) {
        aggregate(station, grid, kind)
    } else {
        disaggregate(station, grid, kind, config)
    }
}

fn passthrough(station: &StationSeries, grid: &TimeGrid) -> Vec<Cell> {
    let mut cells = vec![None; grid.len()];
    for (&ts, &v) in station.timestamps().iter().zip(station.values()) {
        if let Some(idx) = grid.index_of(ts) {
            cells[idx] = Some((v, Provenance::Observed));
        }
    }
    cells
}

fn aggregate(station: &StationSeries, grid: &TimeGrid, kind: VariableKind) -> Vec<Cell> {
    let native = station.frequency();
    let target = grid.frequency();
    // Caller guarantees native is finer than target.
    let sub = native.subdivisions_of(target).expect("native finer than target");
    let native_step = Duration::seconds(native.step_seconds());

    let by_ts: HashMap<NaiveDateTime, f64> = station
        .timestamps()
        .iter()
        .copied()
        .zip(station.values().iter().copied())
        .collect();

    let mut cells = vec![None; grid.len()];
    for i in 0..grid.len() {
        let slot_start = grid.timestamp(i);
        let mut sum = 0.0;
        let mut complete = true;
        for j in 0..sub {
            match by_ts.get(&(slot_start + native_step * j as i32)) {
                Some(&v) => sum += v,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            let value = match kind {
                VariableKind::Additive => sum,
                VariableKind::Intensive => sum / sub as f64,
            };
            cells[i] = Some((value, Provenance::Aggregated));
        }
    }
    cells
}

fn disaggregate(
    station: &StationSeries,
    grid: &TimeGrid,
    kind: VariableKind,
    config: &ReconcileConfig,
) -> Vec<Cell> {
    let native = station.frequency();
    let target = grid.frequency();
    // Caller guarantees native is coarser than target.
    let sub = target.subdivisions_of(native).expect("native coarser than target");
    let target_step = Duration::seconds(target.step_seconds());

    let mut cells = vec![None; grid.len()];
    for (&ts, &v) in station.timestamps().iter().zip(station.values()) {
        let sub_timestamps: Vec<NaiveDateTime> =
            (0..sub).map(|j| ts + target_step * j as i32).collect();
        let shares = distribute(v, &sub_timestamps, kind, config);

        for (sub_ts, share) in sub_timestamps.iter().zip(shares) {
            if let Some(idx) = grid.index_of(*sub_ts) {
                cells[idx] = Some((share, Provenance::Disaggregated));
            }
        }
    }
    cells
}

/// Splits one coarse value into per-sub-slot shares.
///
/// Additive values are weighted so the shares sum back to the coarse total;
/// intensive values are replicated (even) or given a zero-mean diurnal
/// anomaly so the coarse mean is preserved.
fn distribute(
    value: f64,
    sub_timestamps: &[NaiveDateTime],
    kind: VariableKind,
    config: &ReconcileConfig,
) -> Vec<f64> {
    let n = sub_timestamps.len();
    match (kind, config.disagg_profile()) {
        (VariableKind::Additive, DisaggProfile::Even) => vec![value / n as f64; n],
        (VariableKind::Intensive, DisaggProfile::Even) => vec![value; n],
        (VariableKind::Additive, DisaggProfile::Diurnal) => {
            let raw: Vec<f64> = sub_timestamps
                .iter()
                .map(|ts| 1.0 + diurnal_phase(ts, config.diurnal_peak_hour()))
                .collect();
            let total: f64 = raw.iter().sum();
            raw.iter().map(|w| value * w / total).collect()
        }
        (VariableKind::Intensive, DisaggProfile::Diurnal) => sub_timestamps
            .iter()
            .map(|ts| {
                value + config.diurnal_amplitude() * diurnal_phase(ts, config.diurnal_peak_hour())
            })
            .collect(),
    }
}

/// Cosine day-cycle factor in `[-1, 1]`, peaking at `peak_hour`.
fn diurnal_phase(ts: &NaiveDateTime, peak_hour: u8) -> f64 {
    let hour = ts.hour() as f64 + ts.minute() as f64 / 60.0;
    (TAU * (hour - peak_hour as f64) / 24.0).cos()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use notus_timegrid::Frequency;

    use super::*;
    use crate::station::{QualityFlag, StationRecord};

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 5, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn station(freq: Frequency, records: Vec<(NaiveDateTime, f64)>) -> StationSeries {
        let recs = records
            .into_iter()
            .map(|(timestamp, value)| StationRecord {
                timestamp,
                value,
                quality: QualityFlag::Good,
            })
            .collect();
        StationSeries::new("st", None, freq, recs).unwrap()
    }

    fn daily_grid(from_day: u32, to_day: u32) -> TimeGrid {
        TimeGrid::new(ts(from_day, 0), ts(to_day, 0), Frequency::Daily).unwrap()
    }

    fn hourly_grid(day: u32) -> TimeGrid {
        TimeGrid::new(ts(day, 0), ts(day + 1, 0), Frequency::Hourly).unwrap()
    }

    #[test]
    fn passthrough_matching_frequency() {
        let s = station(Frequency::Daily, vec![(ts(1, 0), 1.5), (ts(3, 0), 2.5)]);
        let grid = daily_grid(1, 4);
        let cells = align_station(&s, &grid, VariableKind::Additive, &ReconcileConfig::new());

        assert_eq!(cells[0], Some((1.5, Provenance::Observed)));
        assert_eq!(cells[1], None);
        assert_eq!(cells[2], Some((2.5, Provenance::Observed)));
    }

    #[test]
    fn passthrough_ignores_out_of_range_records() {
        let s = station(Frequency::Daily, vec![(ts(1, 0), 1.0), (ts(10, 0), 9.0)]);
        let grid = daily_grid(1, 3);
        let cells = align_station(&s, &grid, VariableKind::Additive, &ReconcileConfig::new());
        assert_eq!(cells.len(), 2);
        assert!(cells[1].is_none());
    }

    #[test]
    fn aggregate_sums_additive() {
        // 24 hourly values of 0.5 mm sum to 12 mm for the day.
        let recs: Vec<(NaiveDateTime, f64)> = (0..24).map(|h| (ts(1, h), 0.5)).collect();
        let s = station(Frequency::Hourly, recs);
        let grid = daily_grid(1, 2);
        let cells = align_station(&s, &grid, VariableKind::Additive, &ReconcileConfig::new());

        let (v, p) = cells[0].unwrap();
        assert_relative_eq!(v, 12.0);
        assert_eq!(p, Provenance::Aggregated);
    }

    #[test]
    fn aggregate_means_intensive() {
        // Hourly temperatures 0..24 average to 11.5.
        let recs: Vec<(NaiveDateTime, f64)> = (0..24).map(|h| (ts(1, h), h as f64)).collect();
        let s = station(Frequency::Hourly, recs);
        let grid = daily_grid(1, 2);
        let cells = align_station(&s, &grid, VariableKind::Intensive, &ReconcileConfig::new());

        let (v, _) = cells[0].unwrap();
        assert_relative_eq!(v, 11.5);
    }

    #[test]
    fn aggregate_partial_coverage_stays_missing() {
        // Only 23 of 24 hours present: the daily total would be biased.
        let recs: Vec<(NaiveDateTime, f64)> = (0..23).map(|h| (ts(1, h), 0.5)).collect();
        let s = station(Frequency::Hourly, recs);
        let grid = daily_grid(1, 2);
        let cells = align_station(&s, &grid, VariableKind::Additive, &ReconcileConfig::new());
        assert!(cells[0].is_none());
    }

    #[test]
    fn disaggregate_even_additive_preserves_total() {
        let s = station(Frequency::Daily, vec![(ts(1, 0), 24.0)]);
        let grid = hourly_grid(1);
        let cells = align_station(&s, &grid, VariableKind::Additive, &ReconcileConfig::new());

        let total: f64 = cells.iter().map(|c| c.unwrap().0).sum();
        assert_relative_eq!(total, 24.0, epsilon = 1e-12);
        for c in &cells {
            let (v, p) = c.unwrap();
            assert_relative_eq!(v, 1.0);
            assert_eq!(p, Provenance::Disaggregated);
        }
    }

    #[test]
    fn disaggregate_even_intensive_replicates() {
        let s = station(Frequency::Daily, vec![(ts(1, 0), 18.5)]);
        let grid = hourly_grid(1);
        let cells = align_station(&s, &grid, VariableKind::Intensive, &ReconcileConfig::new());
        for c in &cells {
            assert_relative_eq!(c.unwrap().0, 18.5);
        }
    }

    #[test]
    fn disaggregate_diurnal_additive_preserves_total() {
        let config = ReconcileConfig::new().with_disagg_profile(DisaggProfile::Diurnal);
        let s = station(Frequency::Daily, vec![(ts(1, 0), 24.0)]);
        let grid = hourly_grid(1);
        let cells = align_station(&s, &grid, VariableKind::Additive, &config);

        let total: f64 = cells.iter().map(|c| c.unwrap().0).sum();
        assert_relative_eq!(total, 24.0, epsilon = 1e-9);

        // Peak-hour share exceeds the opposite-phase share.
        let peak = cells[15].unwrap().0;
        let trough = cells[3].unwrap().0;
        assert!(peak > trough);
    }

    #[test]
    fn disaggregate_diurnal_intensive_preserves_mean() {
        let config = ReconcileConfig::new()
            .with_disagg_profile(DisaggProfile::Diurnal)
            .with_diurnal_amplitude(5.0);
        let s = station(Frequency::Daily, vec![(ts(1, 0), 20.0)]);
        let grid = hourly_grid(1);
        let cells = align_station(&s, &grid, VariableKind::Intensive, &config);

        let mean: f64 = cells.iter().map(|c| c.unwrap().0).sum::<f64>() / 24.0;
        assert_relative_eq!(mean, 20.0, epsilon = 1e-9);

        assert_relative_eq!(cells[15].unwrap().0, 25.0, epsilon = 1e-9);
    }

    #[test]
    fn disaggregate_partial_grid_overlap() {
        // Daily record covers the whole day, grid covers 06:00-18:00 only.
        let s = station(Frequency::Daily, vec![(ts(1, 0), 24.0)]);
        let grid = TimeGrid::new(ts(1, 6), ts(1, 18), Frequency::Hourly).unwrap();
        let cells = align_station(&s, &grid, VariableKind::Additive, &ReconcileConfig::new());

        assert_eq!(cells.len(), 12);
        for c in &cells {
            assert_relative_eq!(c.unwrap().0, 1.0);
        }
    }
}
