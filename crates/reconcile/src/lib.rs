//! # notus-reconcile
//!
//! Reconciles heterogeneous, gap-ridden station observations into a single
//! dense series per watershed segment at a target frequency.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌───────────────┐     ┌──────────────────┐
//!  │  Align        │────▶│  Gap fill     │────▶│  Spatial combine │
//!  │  (frequency)  │     │  (per station) │     │  (IDW per slot)  │
//!  └──────────────┘     └───────────────┘     └──────────────────┘
//! ```
//!
//! Each station is first normalised to the target grid (aggregating finer
//! data, disaggregating coarser data), then interior gaps up to a bound are
//! linearly interpolated within the station, and finally the per-slot
//! candidates are combined by inverse-distance weighting. A slot no station
//! can cover fails the whole run with
//! [`ReconcileError::InsufficientData`] naming the unresolved timestamps.
//!
//! # Quick start
//!
//! ```ignore
//! use notus_reconcile::{GridPoint, Location, ReconcileConfig, VariableKind, reconcile};
//! use notus_timegrid::{Frequency, TimeGrid};
//!
//! let grid = TimeGrid::new(start, end, Frequency::Daily)?;
//! let segment = GridPoint::new("outlet", Location::new(41.0, -89.5)?);
//! let config = ReconcileConfig::new().with_max_gap_slots(3);
//! let series = reconcile(&segment, &stations, &grid, "precip", VariableKind::Additive, &config)?;
//! assert_eq!(series.len(), grid.len());
//! ```

mod align;
mod combine;
mod config;
mod error;
mod grid_point;
mod interpolate;
mod location;
mod reconcile;
mod result;
mod station;
mod variable;

pub use config::{DisaggProfile, ReconcileConfig};
pub use error::ReconcileError;
pub use grid_point::GridPoint;
pub use location::Location;
pub use reconcile::reconcile;
pub use result::{Provenance, ReconciledSeries};
pub use station::{QualityFlag, StationRecord, StationSeries};
pub use variable::VariableKind;
