//! Reconciliation driver.

use notus_timegrid::TimeGrid;
use tracing::debug;

use crate::align::align_station;
use crate::combine::{AlignedStation, combine};
use crate::config::ReconcileConfig;
use crate::error::ReconcileError;
use crate::grid_point::GridPoint;
use crate::interpolate::fill_gaps;
use crate::result::ReconciledSeries;
use crate::station::StationSeries;
use crate::variable::VariableKind;

/// Produces a gap-free series for `segment` over `grid` from candidate
/// stations.
///
/// Stations are processed in the order given, so identical inputs always
/// produce identical output. Each overlapping station is normalised to the
/// grid frequency, its interior gaps are filled up to the configured bound,
/// and the per-slot candidates are combined by inverse-distance weighting.
///
/// # Errors
///
/// Returns [`ReconcileError::InvalidConfig`] for a bad configuration,
/// [`ReconcileError::NoOverlap`] when no station overlaps the grid, and
/// [`ReconcileError::InsufficientData`] naming every slot no strategy could
/// cover.
pub fn reconcile(
    segment: &GridPoint,
    stations: &[StationSeries],
    grid: &TimeGrid,
    variable: &str,
    kind: VariableKind,
    config: &ReconcileConfig,
) -> Result<ReconciledSeries, ReconcileError> {
    config.validate()?;

    let overlapping: Vec<&StationSeries> =
        stations.iter().filter(|s| s.overlaps(grid)).collect();
    if overlapping.is_empty() {
        return Err(ReconcileError::NoOverlap {
            segment: segment.id().to_string(),
        });
    }
    debug!(
        segment = segment.id(),
        variable,
        n_candidates = stations.len(),
        n_overlapping = overlapping.len(),
        n_slots = grid.len(),
        "reconciling"
    );

    let aligned: Vec<AlignedStation> = overlapping
        .iter()
        .map(|s| {
            let mut cells = align_station(s, grid, kind, config);
            fill_gaps(&mut cells, config.max_gap_slots());
            AlignedStation {
                location: s.location().copied(),
                cells,
            }
        })
        .collect();

    let combined = combine(&aligned, segment.location(), config.idw_power());

    let mut values = Vec::with_capacity(grid.len());
    let mut provenance = Vec::with_capacity(grid.len());
    let mut unresolved = Vec::new();
    for (i, cell) in combined.iter().enumerate() {
        match cell {
            Some((v, p)) => {
                values.push(*v);
                provenance.push(*p);
            }
            None => unresolved.push(grid.timestamp(i)),
        }
    }

    if !unresolved.is_empty() {
        return Err(ReconcileError::InsufficientData {
            segment: segment.id().to_string(),
            slots: unresolved,
        });
    }

    ReconciledSeries::new(segment.id(), variable, grid.clone(), values, provenance)
}
