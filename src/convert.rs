//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use notus_io::{Compression, WriterConfig};
use notus_pet::{PetConfig, PetMethod};
use notus_reconcile::{DisaggProfile, GridPoint, Location, ReconcileConfig, VariableKind};
use notus_timegrid::{Frequency, TimeGrid};

use crate::config::{GridToml, IoToml, PetToml, ReconcileToml, SegmentToml, VariableToml};

pub fn build_grid(toml: &GridToml) -> Result<TimeGrid> {
    let start = parse_timestamp(&toml.start)?;
    let end = parse_timestamp(&toml.end)?;
    let frequency: Frequency = toml
        .frequency
        .parse()
        .with_context(|| format!("invalid [grid].frequency '{}'", toml.frequency))?;
    TimeGrid::new(start, end, frequency).context("invalid [grid] range")
}

pub fn build_reconcile_config(
    toml: &ReconcileToml,
    variable: &VariableToml,
) -> Result<ReconcileConfig> {
    let profile = match variable.profile.as_str() {
        "even" => DisaggProfile::Even,
        "diurnal" => DisaggProfile::Diurnal,
        other => bail!(
            "variable '{}': unknown profile '{other}' (expected 'even' or 'diurnal')",
            variable.name
        ),
    };

    let config = ReconcileConfig::new()
        .with_max_gap_slots(toml.max_gap_slots)
        .with_idw_power(toml.idw_power)
        .with_disagg_profile(profile)
        .with_diurnal_peak_hour(variable.peak_hour)
        .with_diurnal_amplitude(variable.amplitude);
    config
        .validate()
        .with_context(|| format!("invalid settings for variable '{}'", variable.name))?;
    Ok(config)
}

pub fn build_variable_kind(variable: &VariableToml) -> Result<VariableKind> {
    variable.kind.parse().with_context(|| {
        format!(
            "variable '{}': invalid kind '{}'",
            variable.name, variable.kind
        )
    })
}

pub fn build_grid_point(segment: &SegmentToml) -> Result<GridPoint> {
    let location = Location::new(segment.lat, segment.lon)
        .with_context(|| format!("segment '{}': invalid coordinates", segment.id))?;
    Ok(GridPoint::new(&segment.id, location))
}

pub fn build_writer_config(toml: &IoToml) -> Result<WriterConfig> {
    let compression = match toml.compression.as_str() {
        "none" => Compression::None,
        "snappy" => Compression::Snappy,
        "zstd" => Compression::Zstd,
        other => bail!("unknown [io].compression '{other}' (expected none, snappy, or zstd)"),
    };
    Ok(WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(toml.row_group_size))
}

pub fn build_pet_config(toml: &PetToml, segment: &SegmentToml) -> Result<PetConfig> {
    let method: PetMethod = toml
        .method
        .parse()
        .with_context(|| format!("invalid [pet].method '{}'", toml.method))?;
    let config = PetConfig::new(segment.lat, segment.elevation)
        .with_albedo(segment.albedo.unwrap_or(toml.albedo))
        .with_method(method)
        .with_strict(toml.strict);
    config
        .validate()
        .with_context(|| format!("invalid PET settings for segment '{}'", segment.id))?;
    Ok(config)
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        && let Some(ts) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(ts);
    }
    bail!("unparseable timestamp '{raw}' (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)")
}
