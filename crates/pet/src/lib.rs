//! # notus-pet
//!
//! Potential evapotranspiration from reconciled climate series using the
//! FAO-56 Penman-Monteith reference-crop formulation.
//!
//! The estimator is a pure transform: align temperature, humidity, wind and
//! radiation series onto one grid with [`PetForcing`], pick the daily or
//! hourly variant via [`PetConfig`], and call [`estimate_pet`]. Slots with
//! missing inputs are collected as [`SlotFailure`]s (or abort the run in
//! strict mode); a result never silently drops a slot.
//!
//! # Quick start
//!
//! ```ignore
//! use notus_pet::{PetConfig, PetForcing, PetMethod, estimate_pet};
//!
//! let forcing = PetForcing::new("outlet", grid)
//!     .with_temperature(&temp)?
//!     .with_humidity(&rh)?
//!     .with_wind(&wind)?
//!     .with_solar(&solar)?;
//! let config = PetConfig::new(41.0, 250.0).with_method(PetMethod::Daily);
//! let pet = estimate_pet(&forcing, &config)?;
//! assert_eq!(pet.estimated_count() + pet.failures().len(), grid.len());
//! ```

mod atmosphere;
mod config;
mod error;
mod estimate;
mod forcing;
mod method;
mod penman;
mod radiation;
mod result;

pub use config::PetConfig;
pub use error::PetError;
pub use estimate::estimate_pet;
pub use forcing::PetForcing;
pub use method::PetMethod;
pub use result::{PetSeries, SlotFailure};
