//! High-level Parquet reading.

use std::path::Path;

use notus_reconcile::ReconciledSeries;
use tracing::debug;

use crate::error::IoError;
use crate::parquet_read;

/// Reads every reconciled series from a Parquet file written by
/// [`write_reconciled`](crate::write_reconciled).
///
/// Series come back sorted by segment then variable, each on its rebuilt
/// grid.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::Parquet`] for unreadable files, and [`IoError::Validation`]
/// when the schema or row layout does not match the writer's.
pub fn read_reconciled(path: &Path) -> Result<Vec<ReconciledSeries>, IoError> {
    let batches = parquet_read::read_batches(path)?;
    if let Some(first) = batches.first() {
        parquet_read::validate_reconciled_schema(first)?;
    }
    let series = parquet_read::group_by_segment_and_variable(&batches)?;
    debug!(path = %path.display(), series = series.len(), "read reconciled parquet");
    Ok(series)
}
