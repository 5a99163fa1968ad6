use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::info;

use notus_io::{read_stations_csv, write_reconciled};
use notus_reconcile::{ReconciledSeries, reconcile};

use crate::cli::ReconcileArgs;
use crate::config::NotusConfig;
use crate::convert;

/// Run the reconciliation pipeline: station CSVs in, one Parquet file of
/// per-segment series out.
pub fn run(args: ReconcileArgs) -> Result<()> {
    let config = NotusConfig::load(&args.config)?;
    if config.segments.is_empty() {
        bail!("no [[segments]] defined in {}", args.config.display());
    }
    if config.variables.is_empty() {
        bail!("no [[variables]] defined in {}", args.config.display());
    }
    let output = args
        .output
        .or(config.io.reconciled.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no output path: set [io].reconciled in config or use --output")
        })?;

    let grid = convert::build_grid(&config.grid)?;
    let writer_config = convert::build_writer_config(&config.io)?;
    info!(
        start = %grid.start(),
        end = %grid.end(),
        frequency = %grid.frequency(),
        slots = grid.len(),
        "target grid"
    );

    let mut all_series: Vec<ReconciledSeries> = Vec::new();
    for variable in &config.variables {
        let stations = read_stations_csv(&variable.stations).with_context(|| {
            format!(
                "failed to read stations for variable '{}': {}",
                variable.name,
                variable.stations.display()
            )
        })?;
        let kind = convert::build_variable_kind(variable)?;
        let reconcile_config = convert::build_reconcile_config(&config.reconcile, variable)?;
        info!(
            variable = %variable.name,
            stations = stations.len(),
            "read station records"
        );

        // Segments are independent given the station pool.
        let series: Vec<ReconciledSeries> = config
            .segments
            .par_iter()
            .map(|segment| {
                let point = convert::build_grid_point(segment)?;
                reconcile(&point, &stations, &grid, &variable.name, kind, &reconcile_config)
                    .with_context(|| {
                        format!(
                            "reconciliation failed for segment '{}', variable '{}'",
                            segment.id, variable.name
                        )
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(variable = %variable.name, segments = series.len(), "variable reconciled");
        all_series.extend(series);
    }

    write_reconciled(&output, &all_series, &writer_config)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        path = %output.display(),
        series = all_series.len(),
        "reconciled series written"
    );
    Ok(())
}
