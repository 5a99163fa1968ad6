//! # notus-timegrid
//!
//! Uniform time-axis arithmetic for Notus series.
//!
//! Every series in the workspace is aligned to a [`TimeGrid`]: a half-open
//! `[start, end)` range sliced into equal slots at a reporting
//! [`Frequency`]. The grid owns slot indexing, so the reconciler and the
//! PET estimator never do their own timestamp arithmetic.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use notus_timegrid::{Frequency, TimeGrid};
//!
//! let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(2020, 1, 8).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let grid = TimeGrid::new(start, end, Frequency::Daily)?;
//! assert_eq!(grid.len(), 7);
//! assert_eq!(grid.index_of(start), Some(0));
//! ```

mod error;
mod frequency;
mod grid;

pub use error::TimeGridError;
pub use frequency::Frequency;
pub use grid::TimeGrid;
