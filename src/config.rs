use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level notus configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotusConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Target grid settings.
    pub grid: GridToml,

    /// Reconciliation settings.
    #[serde(default)]
    pub reconcile: ReconcileToml,

    /// PET settings.
    #[serde(default)]
    pub pet: PetToml,

    /// Target segments.
    #[serde(default)]
    pub segments: Vec<SegmentToml>,

    /// Variables to reconcile.
    #[serde(default)]
    pub variables: Vec<VariableToml>,
}

impl NotusConfig {
    /// Loads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Reconciled series Parquet path.
    pub reconciled: Option<PathBuf>,
    /// PET output Parquet path.
    pub pet: Option<PathBuf>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

/// Target grid: half-open `[start, end)` at a fixed frequency.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    pub start: String,
    pub end: String,
    #[serde(default = "default_frequency")]
    pub frequency: String,
}

fn default_frequency() -> String {
    "daily".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconcileToml {
    #[serde(default = "default_max_gap_slots")]
    pub max_gap_slots: usize,
    #[serde(default = "default_idw_power")]
    pub idw_power: f64,
}

impl Default for ReconcileToml {
    fn default() -> Self {
        Self {
            max_gap_slots: default_max_gap_slots(),
            idw_power: default_idw_power(),
        }
    }
}

fn default_max_gap_slots() -> usize {
    6
}
fn default_idw_power() -> f64 {
    2.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PetToml {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub strict: bool,
    #[serde(default = "default_albedo")]
    pub albedo: f64,
    #[serde(default = "default_temperature_var")]
    pub temperature_var: String,
    #[serde(default = "default_humidity_var")]
    pub humidity_var: String,
    #[serde(default = "default_wind_var")]
    pub wind_var: String,
    #[serde(default = "default_solar_var")]
    pub solar_var: String,
    /// When set, this variable supplies net radiation directly and the
    /// solar column is ignored.
    #[serde(default)]
    pub net_radiation_var: Option<String>,
}

impl Default for PetToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            strict: false,
            albedo: default_albedo(),
            temperature_var: default_temperature_var(),
            humidity_var: default_humidity_var(),
            wind_var: default_wind_var(),
            solar_var: default_solar_var(),
            net_radiation_var: None,
        }
    }
}

fn default_method() -> String {
    "daily".to_string()
}
fn default_albedo() -> f64 {
    0.23
}
fn default_temperature_var() -> String {
    "temp".to_string()
}
fn default_humidity_var() -> String {
    "rh".to_string()
}
fn default_wind_var() -> String {
    "wind".to_string()
}
fn default_solar_var() -> String {
    "solar".to_string()
}

/// One target segment (watershed outlet, reach centroid, and so on).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentToml {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub elevation: f64,
    /// Overrides the global `[pet].albedo` for this segment.
    #[serde(default)]
    pub albedo: Option<f64>,
}

/// One variable to reconcile, with its own station file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableToml {
    pub name: String,
    /// "additive" or "intensive".
    pub kind: String,
    /// Long-format station CSV for this variable.
    pub stations: PathBuf,
    /// "even" or "diurnal" disaggregation.
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_peak_hour")]
    pub peak_hour: u8,
    #[serde(default)]
    pub amplitude: f64,
}

fn default_profile() -> String {
    "even".to_string()
}
fn default_peak_hour() -> u8 {
    15
}
