//! Radiation terms of the reference equation, FAO-56 chapter 3.
//!
//! Extraterrestrial radiation is computed from latitude and day of year;
//! hourly slots assume timestamps in local solar time. All fluxes are in
//! MJ m-2 per slot (day or hour).

use std::f64::consts::{PI, TAU};

/// Solar constant, MJ m-2 min-1.
const SOLAR_CONSTANT: f64 = 0.0820;

/// Stefan-Boltzmann constant, MJ K-4 m-2 day-1.
const STEFAN_BOLTZMANN_DAILY: f64 = 4.903e-9;

/// Stefan-Boltzmann constant, MJ K-4 m-2 hour-1.
const STEFAN_BOLTZMANN_HOURLY: f64 = STEFAN_BOLTZMANN_DAILY / 24.0;

fn solar_declination(doy: u32) -> f64 {
    0.409 * (TAU * doy as f64 / 365.0 - 1.39).sin()
}

fn inverse_relative_distance(doy: u32) -> f64 {
    1.0 + 0.033 * (TAU * doy as f64 / 365.0).cos()
}

fn sunset_hour_angle(lat_rad: f64, declination: f64) -> f64 {
    (-lat_rad.tan() * declination.tan()).clamp(-1.0, 1.0).acos()
}

/// Daily extraterrestrial radiation, MJ m-2 day-1 (FAO-56 eq 21).
pub(crate) fn extraterrestrial_daily(latitude_deg: f64, doy: u32) -> f64 {
    let phi = latitude_deg.to_radians();
    let delta = solar_declination(doy);
    let dr = inverse_relative_distance(doy);
    let ws = sunset_hour_angle(phi, delta);

    24.0 * 60.0 / PI
        * SOLAR_CONSTANT
        * dr
        * (ws * phi.sin() * delta.sin() + phi.cos() * delta.cos() * ws.sin())
}

/// Hourly extraterrestrial radiation, MJ m-2 hour-1 (FAO-56 eq 28).
///
/// The slot is the hour starting at `hour`; solar time angles are taken at
/// its bounds and clipped to daylight.
pub(crate) fn extraterrestrial_hourly(latitude_deg: f64, doy: u32, hour: u32) -> f64 {
    let phi = latitude_deg.to_radians();
    let delta = solar_declination(doy);
    let dr = inverse_relative_distance(doy);
    let ws = sunset_hour_angle(phi, delta);

    let midpoint = PI / 12.0 * (hour as f64 + 0.5 - 12.0);
    let w1 = (midpoint - PI / 24.0).clamp(-ws, ws);
    let w2 = (midpoint + PI / 24.0).clamp(-ws, ws);
    if w1 >= w2 {
        return 0.0;
    }

    12.0 * 60.0 / PI
        * SOLAR_CONSTANT
        * dr
        * ((w2 - w1) * phi.sin() * delta.sin() + phi.cos() * delta.cos() * (w2.sin() - w1.sin()))
}

/// Clear-sky shortwave radiation for the same slot as `ra`.
pub(crate) fn clear_sky_radiation(ra: f64, elevation_m: f64) -> f64 {
    (0.75 + 2e-5 * elevation_m) * ra
}

/// Net outgoing longwave radiation for one slot.
///
/// `hourly` selects the per-hour Stefan-Boltzmann constant. When the
/// clear-sky flux is zero (night) the cloudiness ratio is held at 0.5.
pub(crate) fn net_longwave(temp_c: f64, ea_kpa: f64, rs: f64, rso: f64, hourly: bool) -> f64 {
    let sigma = if hourly {
        STEFAN_BOLTZMANN_HOURLY
    } else {
        STEFAN_BOLTZMANN_DAILY
    };
    let t_k = temp_c + 273.16;
    let ratio = if rso > 0.0 {
        (rs / rso).clamp(0.0, 1.0)
    } else {
        0.5
    };
    sigma * t_k.powi(4) * (0.34 - 0.14 * ea_kpa.max(0.0).sqrt()) * (1.35 * ratio - 0.35)
}

/// Net radiation at the crop surface from measured shortwave.
pub(crate) fn net_radiation(rs: f64, albedo: f64, rnl: f64) -> f64 {
    (1.0 - albedo) * rs - rnl
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn daily_extraterrestrial_matches_fao_example() {
        // FAO-56 example 8: 20 S latitude, 3 September (doy 246), Ra = 32.2.
        assert_relative_eq!(extraterrestrial_daily(-20.0, 246), 32.2, epsilon = 0.1);
    }

    #[test]
    fn hourly_slots_sum_to_the_daily_value() {
        let daily = extraterrestrial_daily(45.0, 182);
        let summed: f64 = (0..24).map(|h| extraterrestrial_hourly(45.0, 182, h)).sum();
        assert_relative_eq!(summed, daily, epsilon = 0.05);
    }

    #[test]
    fn night_hours_receive_nothing() {
        assert_eq!(extraterrestrial_hourly(45.0, 182, 0), 0.0);
        assert_eq!(extraterrestrial_hourly(45.0, 182, 23), 0.0);
        assert!(extraterrestrial_hourly(45.0, 182, 12) > 0.0);
    }

    #[test]
    fn polar_winter_has_no_radiation() {
        assert_relative_eq!(extraterrestrial_daily(80.0, 355), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn net_longwave_is_positive_under_clear_dry_skies() {
        let ra = extraterrestrial_daily(-20.0, 246);
        let rso = clear_sky_radiation(ra, 0.0);
        let rnl = net_longwave(25.0, 1.0, rso, rso, false);
        assert!(rnl > 0.0);
    }

    #[test]
    fn net_radiation_applies_albedo() {
        assert_relative_eq!(net_radiation(10.0, 0.23, 2.0), 5.7, epsilon = 1e-12);
    }
}
