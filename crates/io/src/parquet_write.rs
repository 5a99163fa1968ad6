//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::NaiveDateTime;
use notus_pet::PetSeries;
use notus_reconcile::ReconciledSeries;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;

/// Builds the Arrow schema for reconciled series output.
///
/// Timestamps are stored as epoch seconds so the file round-trips without a
/// timezone; `frequency` makes the grid recoverable without inspecting
/// consecutive rows.
pub(crate) fn build_reconciled_schema() -> Schema {
    Schema::new(vec![
        Field::new("segment", DataType::Utf8, false),
        Field::new("variable", DataType::Utf8, false),
        Field::new("frequency", DataType::Utf8, false),
        Field::new("timestamp", DataType::Int64, false),
        Field::new("value", DataType::Float64, false),
        Field::new("provenance", DataType::Utf8, false),
    ])
}

/// Builds the Arrow schema for PET output.
pub(crate) fn build_pet_schema() -> Schema {
    Schema::new(vec![
        Field::new("segment", DataType::Utf8, false),
        Field::new("timestamp", DataType::Int64, false),
        Field::new("pet", DataType::Float64, false),
        Field::new("method", DataType::Utf8, false),
    ])
}

pub(crate) fn epoch_seconds(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp()
}

/// Converts one reconciled series into an Arrow [`RecordBatch`], one row
/// per grid slot.
pub(crate) fn reconciled_to_record_batch(
    series: &ReconciledSeries,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let n = series.len();
    let frequency = series.grid().frequency().to_string();

    let segment_col: ArrayRef = Arc::new(StringArray::from(vec![series.segment(); n]));
    let variable_col: ArrayRef = Arc::new(StringArray::from(vec![series.variable(); n]));
    let frequency_col: ArrayRef = Arc::new(StringArray::from(vec![frequency; n]));
    let timestamp_col: ArrayRef = Arc::new(Int64Array::from(
        series
            .iter()
            .map(|(ts, _, _)| epoch_seconds(ts))
            .collect::<Vec<i64>>(),
    ));
    let value_col: ArrayRef = Arc::new(Float64Array::from(series.values().to_vec()));
    let provenance_col: ArrayRef = Arc::new(StringArray::from(
        series
            .provenance()
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<&str>>(),
    ));

    RecordBatch::try_new(
        Arc::new(schema.clone()),
        vec![
            segment_col,
            variable_col,
            frequency_col,
            timestamp_col,
            value_col,
            provenance_col,
        ],
    )
    .map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })
}

/// Converts one PET series into an Arrow [`RecordBatch`].
///
/// Only estimated slots become rows; failed slots are absent from the file.
pub(crate) fn pet_to_record_batch(
    series: &PetSeries,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let mut timestamps = Vec::with_capacity(series.estimated_count());
    let mut values = Vec::with_capacity(series.estimated_count());
    for (ts, value) in series.iter() {
        timestamps.push(epoch_seconds(ts));
        values.push(value);
    }
    let n = timestamps.len();

    let segment_col: ArrayRef = Arc::new(StringArray::from(vec![series.segment(); n]));
    let timestamp_col: ArrayRef = Arc::new(Int64Array::from(timestamps));
    let pet_col: ArrayRef = Arc::new(Float64Array::from(values));
    let method_col: ArrayRef = Arc::new(StringArray::from(vec![series.method().as_str(); n]));

    RecordBatch::try_new(
        Arc::new(schema.clone()),
        vec![segment_col, timestamp_col, pet_col, method_col],
    )
    .map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use notus_reconcile::Provenance;
    use notus_timegrid::{Frequency, TimeGrid};

    use super::*;

    fn daily_grid(days: u32) -> TimeGrid {
        let start = NaiveDate::from_ymd_opt(2022, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 7, 1 + days)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TimeGrid::new(start, end, Frequency::Daily).unwrap()
    }

    #[test]
    fn reconciled_schema_shape() {
        let schema = build_reconciled_schema();
        assert_eq!(schema.fields().len(), 6);
        assert_eq!(schema.field(0).name(), "segment");
        assert_eq!(schema.field(3).name(), "timestamp");
        assert_eq!(schema.field(5).name(), "provenance");
    }

    #[test]
    fn reconciled_batch_has_one_row_per_slot() {
        let grid = daily_grid(3);
        let series = ReconciledSeries::new(
            "outlet",
            "precip",
            grid,
            vec![1.0, 2.0, 3.0],
            vec![Provenance::Observed; 3],
        )
        .unwrap();

        let schema = build_reconciled_schema();
        let batch = reconciled_to_record_batch(&series, &schema).unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 6);
    }

    #[test]
    fn epoch_seconds_are_utc_midnight() {
        let ts = NaiveDate::from_ymd_opt(1970, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(epoch_seconds(ts), 86_400);
    }
}
