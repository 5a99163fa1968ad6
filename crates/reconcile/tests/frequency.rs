use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime};
use notus_reconcile::{
    DisaggProfile, GridPoint, Location, Provenance, QualityFlag, ReconcileConfig, StationRecord,
    StationSeries, VariableKind, reconcile,
};
use notus_timegrid::{Frequency, TimeGrid};

fn ts(d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 8, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn station(id: &str, freq: Frequency, values: Vec<(NaiveDateTime, f64)>) -> StationSeries {
    let records = values
        .into_iter()
        .map(|(timestamp, value)| StationRecord {
            timestamp,
            value,
            quality: QualityFlag::Good,
        })
        .collect();
    StationSeries::new(id, Some(Location::new(40.3, -90.1).unwrap()), freq, records).unwrap()
}

fn segment() -> GridPoint {
    GridPoint::new("seg-1", Location::new(40.0, -90.0).unwrap())
}

#[test]
fn hourly_precip_aggregates_to_daily_sums() {
    let grid = TimeGrid::new(ts(1, 0), ts(3, 0), Frequency::Daily).unwrap();
    // Two full days of hourly rain at 0.25 mm/h.
    let records: Vec<(NaiveDateTime, f64)> = (0..48)
        .map(|i| (ts(1 + i / 24, (i % 24) as u32), 0.25))
        .collect();
    let s = station("hourly", Frequency::Hourly, records);

    let series = reconcile(
        &segment(),
        &[s],
        &grid,
        "precip",
        VariableKind::Additive,
        &ReconcileConfig::new(),
    )
    .unwrap();

    assert_relative_eq!(series.values()[0], 6.0, epsilon = 1e-12);
    assert_relative_eq!(series.values()[1], 6.0, epsilon = 1e-12);
    assert_eq!(series.provenance()[0], Provenance::Aggregated);
}

#[test]
fn hourly_temperature_aggregates_to_daily_means() {
    let grid = TimeGrid::new(ts(1, 0), ts(2, 0), Frequency::Daily).unwrap();
    let records: Vec<(NaiveDateTime, f64)> =
        (0..24).map(|h| (ts(1, h), 10.0 + h as f64)).collect();
    let s = station("hourly", Frequency::Hourly, records);

    let series = reconcile(
        &segment(),
        &[s],
        &grid,
        "temp",
        VariableKind::Intensive,
        &ReconcileConfig::new(),
    )
    .unwrap();

    assert_relative_eq!(series.values()[0], 21.5);
}

#[test]
fn daily_total_disaggregates_to_hourly() {
    let grid = TimeGrid::new(ts(1, 0), ts(2, 0), Frequency::Hourly).unwrap();
    let s = station("daily", Frequency::Daily, vec![(ts(1, 0), 12.0)]);

    let series = reconcile(
        &segment(),
        &[s],
        &grid,
        "precip",
        VariableKind::Additive,
        &ReconcileConfig::new(),
    )
    .unwrap();

    assert_eq!(series.len(), 24);
    let total: f64 = series.values().iter().sum();
    assert_relative_eq!(total, 12.0, epsilon = 1e-9);
    assert!(series.provenance().iter().all(|&p| p == Provenance::Disaggregated));
}

#[test]
fn aggregate_then_disaggregate_preserves_additive_total() {
    // Round-trip property: hourly -> daily -> hourly keeps the total.
    let hourly_values: Vec<(NaiveDateTime, f64)> = (0..24)
        .map(|h| (ts(1, h), 0.1 + (h % 5) as f64 * 0.3))
        .collect();
    let original_total: f64 = hourly_values.iter().map(|(_, v)| v).sum();

    let daily_grid = TimeGrid::new(ts(1, 0), ts(2, 0), Frequency::Daily).unwrap();
    let daily = reconcile(
        &segment(),
        &[station("h", Frequency::Hourly, hourly_values)],
        &daily_grid,
        "precip",
        VariableKind::Additive,
        &ReconcileConfig::new(),
    )
    .unwrap();

    let hourly_grid = TimeGrid::new(ts(1, 0), ts(2, 0), Frequency::Hourly).unwrap();
    let back = reconcile(
        &segment(),
        &[station(
            "d",
            Frequency::Daily,
            vec![(ts(1, 0), daily.values()[0])],
        )],
        &hourly_grid,
        "precip",
        VariableKind::Additive,
        &ReconcileConfig::new(),
    )
    .unwrap();

    let roundtrip_total: f64 = back.values().iter().sum();
    assert_relative_eq!(roundtrip_total, original_total, epsilon = 1e-9);
}

#[test]
fn diurnal_profile_shapes_hourly_temperature() {
    let grid = TimeGrid::new(ts(1, 0), ts(2, 0), Frequency::Hourly).unwrap();
    let s = station("daily", Frequency::Daily, vec![(ts(1, 0), 20.0)]);
    let config = ReconcileConfig::new()
        .with_disagg_profile(DisaggProfile::Diurnal)
        .with_diurnal_amplitude(6.0);

    let series = reconcile(
        &segment(),
        &[s],
        &grid,
        "temp",
        VariableKind::Intensive,
        &config,
    )
    .unwrap();

    // Afternoon peak, small-hours trough, daily mean preserved.
    assert_relative_eq!(series.values()[15], 26.0, epsilon = 1e-9);
    assert!(series.values()[3] < 20.0);
    let mean: f64 = series.values().iter().sum::<f64>() / 24.0;
    assert_relative_eq!(mean, 20.0, epsilon = 1e-9);
}

#[test]
fn mixed_frequency_stations_combine() {
    // A daily station and an hourly station both feed a daily grid.
    let grid = TimeGrid::new(ts(1, 0), ts(3, 0), Frequency::Daily).unwrap();
    let d = station("d", Frequency::Daily, vec![(ts(1, 0), 4.0), (ts(2, 0), 4.0)]);
    let hourly_records: Vec<(NaiveDateTime, f64)> = (0..24).map(|h| (ts(1, h), 0.25)).collect();
    let h = station("h", Frequency::Hourly, hourly_records);

    let series = reconcile(
        &segment(),
        &[d, h],
        &grid,
        "precip",
        VariableKind::Additive,
        &ReconcileConfig::new(),
    )
    .unwrap();

    // Day 1 has two co-located candidates (4.0 observed, 6.0 aggregated);
    // the estimate is their average.
    assert_relative_eq!(series.values()[0], 5.0, epsilon = 1e-9);
    assert_eq!(series.provenance()[0], Provenance::Interpolated);
    // Day 2 only the daily station reports.
    assert_relative_eq!(series.values()[1], 4.0);
    assert_eq!(series.provenance()[1], Provenance::Observed);
}
