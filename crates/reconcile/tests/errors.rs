use chrono::{NaiveDate, NaiveDateTime};
use notus_reconcile::{
    GridPoint, Location, QualityFlag, ReconcileConfig, ReconcileError, StationRecord,
    StationSeries, VariableKind, reconcile,
};
use notus_timegrid::{Frequency, TimeGrid};

fn ts(m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn rec(m: u32, d: u32, value: f64) -> StationRecord {
    StationRecord {
        timestamp: ts(m, d),
        value,
        quality: QualityFlag::Good,
    }
}

fn segment() -> GridPoint {
    GridPoint::new("seg-e", Location::new(40.0, -90.0).unwrap())
}

#[test]
fn error_no_overlap() {
    let grid = TimeGrid::new(ts(6, 1), ts(6, 10), Frequency::Daily).unwrap();
    // Station reports only in January.
    let s = StationSeries::new(
        "a",
        None,
        Frequency::Daily,
        vec![rec(1, 1, 1.0), rec(1, 2, 2.0)],
    )
    .unwrap();

    let result = reconcile(
        &segment(),
        &[s],
        &grid,
        "precip",
        VariableKind::Additive,
        &ReconcileConfig::new(),
    );

    match result {
        Err(ReconcileError::NoOverlap { segment }) => assert_eq!(segment, "seg-e"),
        other => panic!("expected NoOverlap, got {other:?}"),
    }
}

#[test]
fn error_no_stations_at_all() {
    let grid = TimeGrid::new(ts(6, 1), ts(6, 10), Frequency::Daily).unwrap();
    let result = reconcile(
        &segment(),
        &[],
        &grid,
        "precip",
        VariableKind::Additive,
        &ReconcileConfig::new(),
    );
    assert!(matches!(result, Err(ReconcileError::NoOverlap { .. })));
}

#[test]
fn error_invalid_config_rejected_before_work() {
    let grid = TimeGrid::new(ts(6, 1), ts(6, 10), Frequency::Daily).unwrap();
    let s = StationSeries::new("a", None, Frequency::Daily, vec![rec(6, 1, 1.0)]).unwrap();

    let result = reconcile(
        &segment(),
        &[s],
        &grid,
        "precip",
        VariableKind::Additive,
        &ReconcileConfig::new().with_idw_power(-1.0),
    );
    assert!(matches!(result, Err(ReconcileError::InvalidConfig { .. })));
}

#[test]
fn insufficient_data_lists_every_unresolved_slot() {
    let grid = TimeGrid::new(ts(6, 1), ts(6, 8), Frequency::Daily).unwrap();
    // Coverage on days 1 and 7 only; the five-day hole exceeds the bound.
    let s = StationSeries::new(
        "a",
        None,
        Frequency::Daily,
        vec![rec(6, 1, 1.0), rec(6, 7, 2.0)],
    )
    .unwrap();

    let result = reconcile(
        &segment(),
        &[s],
        &grid,
        "precip",
        VariableKind::Additive,
        &ReconcileConfig::new().with_max_gap_slots(2),
    );

    match result {
        Err(ReconcileError::InsufficientData { slots, .. }) => {
            assert_eq!(slots.len(), 5);
            assert_eq!(slots[0], ts(6, 2));
            assert_eq!(slots[4], ts(6, 6));
        }
        other => panic!("expected InsufficientData, got {other:?}"),
    }
}

#[test]
fn error_messages_name_the_station() {
    let err = StationSeries::new("badger", None, Frequency::Daily, vec![]).unwrap_err();
    assert!(err.to_string().contains("badger"));

    let err = StationSeries::new(
        "mole",
        None,
        Frequency::Daily,
        vec![rec(1, 2, 1.0), rec(1, 1, 2.0)],
    )
    .unwrap_err();
    assert!(err.to_string().contains("mole"));
}
