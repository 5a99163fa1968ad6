//! Low-level Parquet reading and column extraction.

use std::collections::BTreeMap;
use std::path::Path;

use arrow::array::{AsArray, RecordBatch};
use arrow::datatypes::{Float64Type, Int64Type};
use chrono::NaiveDateTime;
use notus_reconcile::{Provenance, ReconciledSeries};
use notus_timegrid::{Frequency, TimeGrid};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::IoError;

/// Expected column names for reconciled series files.
const RECONCILED_COLUMNS: [&str; 6] = [
    "segment",
    "variable",
    "frequency",
    "timestamp",
    "value",
    "provenance",
];

/// One row's worth of data during grouping: (epoch seconds, value,
/// provenance tag).
type Row = (i64, f64, String);

/// Reads all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| IoError::Parquet {
            reason: e.to_string(),
        })
}

/// Validates a record batch against the reconciled series schema.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the schema does not match the
/// expected column names or count.
pub(crate) fn validate_reconciled_schema(batch: &RecordBatch) -> Result<(), IoError> {
    if batch.num_columns() != RECONCILED_COLUMNS.len() {
        return Err(IoError::Validation {
            count: 1,
            details: format!(
                "expected {} columns, got {}",
                RECONCILED_COLUMNS.len(),
                batch.num_columns()
            ),
        });
    }

    let schema = batch.schema();
    let mut mismatches: Vec<String> = Vec::new();
    for (i, expected_name) in RECONCILED_COLUMNS.iter().enumerate() {
        let actual_name = schema.field(i).name();
        if actual_name != *expected_name {
            mismatches.push(format!(
                "column {i}: expected '{expected_name}', got '{actual_name}'"
            ));
        }
    }

    if !mismatches.is_empty() {
        return Err(IoError::Validation {
            count: mismatches.len(),
            details: mismatches.join("; "),
        });
    }
    Ok(())
}

/// Groups record batches by segment and variable, rebuilding one
/// [`ReconciledSeries`] per group.
///
/// Rows in each group are sorted by timestamp and must tile a contiguous
/// grid at the group's frequency.
///
/// # Errors
///
/// Returns [`IoError::Validation`] for mixed frequencies, non-contiguous
/// timestamps, or unknown provenance tags, and [`IoError::InvalidTime`] for
/// out-of-range epoch values.
pub(crate) fn group_by_segment_and_variable(
    batches: &[RecordBatch],
) -> Result<Vec<ReconciledSeries>, IoError> {
    let mut groups: BTreeMap<(String, String), (Frequency, Vec<Row>)> = BTreeMap::new();

    for batch in batches {
        let segment_col = batch.column(0).as_string::<i32>();
        let variable_col = batch.column(1).as_string::<i32>();
        let frequency_col = batch.column(2).as_string::<i32>();
        let timestamp_col = batch.column(3).as_primitive::<Int64Type>();
        let value_col = batch.column(4).as_primitive::<Float64Type>();
        let provenance_col = batch.column(5).as_string::<i32>();

        for row in 0..batch.num_rows() {
            let key = (
                segment_col.value(row).to_string(),
                variable_col.value(row).to_string(),
            );
            let frequency: Frequency =
                frequency_col
                    .value(row)
                    .parse()
                    .map_err(|_| IoError::Validation {
                        count: 1,
                        details: format!("unknown frequency '{}'", frequency_col.value(row)),
                    })?;

            let entry = groups.entry(key.clone()).or_insert((frequency, Vec::new()));
            if entry.0 != frequency {
                return Err(IoError::Validation {
                    count: 1,
                    details: format!("series '{}/{}' mixes frequencies", key.0, key.1),
                });
            }
            entry.1.push((
                timestamp_col.value(row),
                value_col.value(row),
                provenance_col.value(row).to_string(),
            ));
        }
    }

    let mut result = Vec::with_capacity(groups.len());
    for ((segment, variable), (frequency, mut rows)) in groups {
        rows.sort_by_key(|r| r.0);
        result.push(rebuild_series(segment, variable, frequency, &rows)?);
    }
    Ok(result)
}

fn rebuild_series(
    segment: String,
    variable: String,
    frequency: Frequency,
    rows: &[Row],
) -> Result<ReconciledSeries, IoError> {
    let step = frequency.step_seconds();
    let first = rows.first().ok_or_else(|| IoError::Validation {
        count: 1,
        details: format!("series '{segment}/{variable}' has no rows"),
    })?;

    let mut values = Vec::with_capacity(rows.len());
    let mut provenance = Vec::with_capacity(rows.len());
    for (i, (epoch, value, tag)) in rows.iter().enumerate() {
        if *epoch != first.0 + step * i as i64 {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "series '{segment}/{variable}' has a hole or duplicate at row {i}"
                ),
            });
        }
        values.push(*value);
        provenance.push(tag.parse::<Provenance>()?);
    }

    let start = from_epoch(first.0)?;
    let end = from_epoch(first.0 + step * rows.len() as i64)?;
    let grid = TimeGrid::new(start, end, frequency)?;
    Ok(ReconciledSeries::new(
        segment, variable, grid, values, provenance,
    )?)
}

pub(crate) fn from_epoch(seconds: i64) -> Result<NaiveDateTime, IoError> {
    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("epoch seconds {seconds} out of range"),
        })
}
