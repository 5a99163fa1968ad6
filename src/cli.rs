use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Notus climate series reconciliation toolkit.
#[derive(Parser)]
#[command(
    name = "notus",
    version,
    about = "Reconcile station climate records and estimate potential evapotranspiration"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Reconcile station records onto per-segment series.
    Reconcile(ReconcileArgs),
    /// Estimate PET from reconciled series.
    Pet(PetArgs),
}

/// Arguments for the `reconcile` subcommand.
#[derive(clap::Args)]
pub struct ReconcileArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "notus.toml")]
    pub config: PathBuf,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `pet` subcommand.
#[derive(clap::Args)]
pub struct PetArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "notus.toml")]
    pub config: PathBuf,

    /// Override reconciled input Parquet path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override PET output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
