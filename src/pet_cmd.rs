use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use notus_io::{read_reconciled, write_pet};
use notus_pet::{PetForcing, PetSeries, estimate_pet};
use notus_reconcile::ReconciledSeries;

use crate::cli::PetArgs;
use crate::config::NotusConfig;
use crate::convert;

/// Run the PET pipeline: reconciled Parquet in, PET Parquet out.
pub fn run(args: PetArgs) -> Result<()> {
    let config = NotusConfig::load(&args.config)?;
    if config.segments.is_empty() {
        bail!("no [[segments]] defined in {}", args.config.display());
    }
    let input = args
        .input
        .or(config.io.reconciled.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no input path: set [io].reconciled in config or use --input")
        })?;
    let output = args.output.or(config.io.pet.clone()).ok_or_else(|| {
        anyhow::anyhow!("no output path: set [io].pet in config or use --output")
    })?;

    let grid = convert::build_grid(&config.grid)?;
    let writer_config = convert::build_writer_config(&config.io)?;

    let series = read_reconciled(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    info!(path = %input.display(), series = series.len(), "reconciled series loaded");

    // Index by segment, then by variable name.
    let mut by_segment: BTreeMap<&str, BTreeMap<&str, &ReconciledSeries>> = BTreeMap::new();
    for s in &series {
        by_segment
            .entry(s.segment())
            .or_default()
            .insert(s.variable(), s);
    }

    let mut results: Vec<PetSeries> = Vec::with_capacity(config.segments.len());
    for segment in &config.segments {
        let variables = by_segment.get(segment.id.as_str());
        let lookup = |name: &str| -> Option<&ReconciledSeries> {
            variables.and_then(|m| m.get(name).copied())
        };

        let mut forcing = PetForcing::new(&segment.id, grid.clone());
        if let Some(s) = lookup(&config.pet.temperature_var) {
            forcing = forcing.with_temperature(s)?;
        }
        if let Some(s) = lookup(&config.pet.humidity_var) {
            forcing = forcing.with_humidity(s)?;
        }
        if let Some(s) = lookup(&config.pet.wind_var) {
            forcing = forcing.with_wind(s)?;
        }
        if let Some(net_var) = &config.pet.net_radiation_var {
            if let Some(s) = lookup(net_var) {
                forcing = forcing.with_net_radiation(s)?;
            }
        } else if let Some(s) = lookup(&config.pet.solar_var) {
            forcing = forcing.with_solar(s)?;
        }

        let pet_config = convert::build_pet_config(&config.pet, segment)?;
        let pet = estimate_pet(&forcing, &pet_config)
            .with_context(|| format!("PET estimation failed for segment '{}'", segment.id))?;

        if !pet.is_complete() {
            warn!(
                segment = %segment.id,
                failed = pet.failures().len(),
                first = %pet.failures()[0].timestamp,
                "slots without PET estimates"
            );
        }
        info!(segment = %segment.id, estimated = pet.estimated_count(), "PET estimated");
        results.push(pet);
    }

    write_pet(&output, &results, &writer_config)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), segments = results.len(), "PET series written");
    Ok(())
}
