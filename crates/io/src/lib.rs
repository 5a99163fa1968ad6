//! # notus-io
//!
//! File formats for the notus pipeline: long-format station CSV on the way
//! in, Parquet for reconciled series and PET estimates on the way out.
//!
//! Reconciled Parquet files round-trip: [`read_reconciled`] rebuilds the
//! exact series [`write_reconciled`] stored, grid and provenance included,
//! so the PET stage can run from files alone.

mod error;
mod parquet_read;
mod parquet_write;
mod reader;
mod station_csv;
mod writer;

pub use error::IoError;
pub use reader::read_reconciled;
pub use station_csv::read_stations_csv;
pub use writer::{Compression, WriterConfig, write_pet, write_reconciled};
