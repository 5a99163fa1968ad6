//! Long-format station CSV reader.
//!
//! One row per observation, with columns
//! `station,lat,lon,frequency,timestamp,value,quality`. Coordinates may be
//! empty for unlocated gauges. Rows flagged `suspect` are dropped at read
//! time so they never reach reconciliation.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDateTime;
use notus_reconcile::{Location, QualityFlag, StationRecord, StationSeries};
use notus_timegrid::Frequency;
use serde::Deserialize;
use tracing::debug;

use crate::error::IoError;

#[derive(Debug, Deserialize)]
struct StationRow {
    station: String,
    lat: Option<f64>,
    lon: Option<f64>,
    frequency: String,
    timestamp: String,
    value: f64,
    quality: String,
}

struct StationAccum {
    location: Option<Location>,
    frequency: Frequency,
    records: Vec<StationRecord>,
}

/// Reads every station in a long-format CSV file.
///
/// Rows are grouped by station identifier; stations come back sorted by
/// identifier with their records sorted by timestamp. Suspect-quality rows
/// are discarded.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::Csv`] for malformed rows, and [`IoError::Validation`] when a
/// station mixes frequencies or coordinates, or a row carries an unknown
/// frequency or quality tag.
pub fn read_stations_csv(path: &Path) -> Result<Vec<StationSeries>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut groups: BTreeMap<String, StationAccum> = BTreeMap::new();
    let mut total_rows = 0usize;
    let mut dropped = 0usize;

    for row in reader.deserialize::<StationRow>() {
        let row = row?;
        total_rows += 1;

        let quality = match row.quality.as_str() {
            "good" => QualityFlag::Good,
            "estimated" => QualityFlag::Estimated,
            "suspect" => {
                dropped += 1;
                continue;
            }
            other => {
                return Err(IoError::Validation {
                    count: 1,
                    details: format!("station '{}': unknown quality tag '{other}'", row.station),
                });
            }
        };

        let frequency: Frequency = row.frequency.parse().map_err(|_| IoError::Validation {
            count: 1,
            details: format!(
                "station '{}': unknown frequency '{}'",
                row.station, row.frequency
            ),
        })?;
        let location = parse_location(&row)?;
        let timestamp = parse_timestamp(&row.timestamp)?;

        let record = StationRecord {
            timestamp,
            value: row.value,
            quality,
        };

        match groups.get_mut(&row.station) {
            Some(accum) => {
                if accum.frequency != frequency {
                    return Err(IoError::Validation {
                        count: 1,
                        details: format!("station '{}' mixes frequencies", row.station),
                    });
                }
                if accum.location != location {
                    return Err(IoError::Validation {
                        count: 1,
                        details: format!("station '{}' mixes coordinates", row.station),
                    });
                }
                accum.records.push(record);
            }
            None => {
                groups.insert(
                    row.station,
                    StationAccum {
                        location,
                        frequency,
                        records: vec![record],
                    },
                );
            }
        }
    }

    let mut stations = Vec::with_capacity(groups.len());
    for (id, mut accum) in groups {
        accum.records.sort_by_key(|r| r.timestamp);
        let series = StationSeries::new(id, accum.location, accum.frequency, accum.records)?;
        stations.push(series);
    }

    debug!(
        path = %path.display(),
        stations = stations.len(),
        rows = total_rows,
        dropped_suspect = dropped,
        "read station CSV"
    );
    Ok(stations)
}

fn parse_location(row: &StationRow) -> Result<Option<Location>, IoError> {
    match (row.lat, row.lon) {
        (Some(lat), Some(lon)) => {
            let location = Location::new(lat, lon).map_err(|e| IoError::Validation {
                count: 1,
                details: format!("station '{}': {e}", row.station),
            })?;
            Ok(Some(location))
        }
        (None, None) => Ok(None),
        _ => Err(IoError::Validation {
            count: 1,
            details: format!("station '{}' has only one of lat/lon", row.station),
        }),
    }
}

/// Parses `2022-07-01T06:00:00`, its space-separated form, or a bare date
/// (taken as midnight).
pub(crate) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, IoError> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        && let Some(ts) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(ts);
    }
    Err(IoError::InvalidTime {
        reason: format!("unparseable timestamp '{raw}'"),
    })
}
