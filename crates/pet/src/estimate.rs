//! Per-slot estimation driver.

use chrono::{Datelike, Timelike};
use notus_timegrid::Frequency;
use tracing::debug;

use crate::atmosphere;
use crate::config::PetConfig;
use crate::error::PetError;
use crate::forcing::PetForcing;
use crate::method::PetMethod;
use crate::penman::{self, SlotInputs};
use crate::radiation;
use crate::result::{PetSeries, SlotFailure};

/// Estimates reference PET for every slot of the forcing grid.
///
/// Slots with missing inputs become [`SlotFailure`]s, or abort the run with
/// [`PetError::MissingInput`] when the config is strict. The output is
/// deterministic: the same forcing and config always produce the same
/// series.
///
/// # Errors
///
/// Returns [`PetError::InvalidConfig`] for out-of-range site parameters and
/// [`PetError::MethodGridMismatch`] when the method's slot length does not
/// match the grid frequency.
pub fn estimate_pet(forcing: &PetForcing, config: &PetConfig) -> Result<PetSeries, PetError> {
    config.validate()?;

    let grid = forcing.grid();
    let expected = match config.method() {
        PetMethod::Daily => Frequency::Daily,
        PetMethod::Hourly => Frequency::Hourly,
    };
    if grid.frequency() != expected {
        return Err(PetError::MethodGridMismatch {
            got: grid.frequency().to_string(),
        });
    }

    debug!(
        segment = forcing.segment(),
        method = %config.method(),
        slots = grid.len(),
        "estimating PET"
    );

    let pressure = atmosphere::atmospheric_pressure(config.elevation_m());
    let gamma = atmosphere::psychrometric_constant(pressure);

    let mut values = Vec::with_capacity(grid.len());
    let mut failures = Vec::new();

    for i in 0..grid.len() {
        let timestamp = grid.timestamp(i);
        let missing = forcing.missing_fields(i);
        if !missing.is_empty() {
            if config.strict() {
                return Err(PetError::MissingInput {
                    timestamp,
                    fields: missing,
                });
            }
            failures.push(SlotFailure {
                timestamp,
                missing,
            });
            values.push(None);
            continue;
        }

        let temp_c = forcing.temperature(i).unwrap_or_default();
        let rh_pct = forcing.humidity(i).unwrap_or_default();
        let wind_2m = forcing.wind(i).unwrap_or_default().max(0.0);
        let svp = atmosphere::saturation_vapor_pressure(temp_c);
        let avp = atmosphere::actual_vapor_pressure(temp_c, rh_pct);

        let net_radiation = match forcing.net_radiation(i) {
            Some(rn) => rn,
            None => {
                let rs = forcing.solar(i).unwrap_or_default().max(0.0);
                let doy = timestamp.ordinal();
                let ra = match config.method() {
                    PetMethod::Daily => {
                        radiation::extraterrestrial_daily(config.latitude_deg(), doy)
                    }
                    PetMethod::Hourly => radiation::extraterrestrial_hourly(
                        config.latitude_deg(),
                        doy,
                        timestamp.hour(),
                    ),
                };
                let rso = radiation::clear_sky_radiation(ra, config.elevation_m());
                let rnl = radiation::net_longwave(
                    temp_c,
                    avp,
                    rs,
                    rso,
                    config.method() == PetMethod::Hourly,
                );
                radiation::net_radiation(rs, config.albedo(), rnl)
            }
        };

        let inputs = SlotInputs {
            temp_c,
            wind_2m,
            svp,
            avp,
            svp_slope: atmosphere::svp_slope(temp_c),
            gamma,
            net_radiation,
        };
        let et = match config.method() {
            PetMethod::Daily => penman::reference_et_daily(&inputs),
            PetMethod::Hourly => penman::reference_et_hourly(&inputs),
        };
        values.push(Some(et));
    }

    if !failures.is_empty() {
        debug!(
            segment = forcing.segment(),
            failed = failures.len(),
            "slots without estimates"
        );
    }

    Ok(PetSeries::new(
        forcing.segment().to_string(),
        config.method(),
        grid.clone(),
        values,
        failures,
    ))
}
