//! Humidity and pressure relations from FAO-56 chapter 3.
//!
//! All pressures are in kPa, temperatures in degrees Celsius.

/// Saturation vapour pressure at air temperature (Tetens form).
pub(crate) fn saturation_vapor_pressure(temp_c: f64) -> f64 {
    0.6108 * (17.27 * temp_c / (temp_c + 237.3)).exp()
}

/// Slope of the saturation vapour pressure curve, kPa per degree C.
pub(crate) fn svp_slope(temp_c: f64) -> f64 {
    let denom = temp_c + 237.3;
    4098.0 * saturation_vapor_pressure(temp_c) / (denom * denom)
}

/// Actual vapour pressure from relative humidity in percent.
pub(crate) fn actual_vapor_pressure(temp_c: f64, rh_pct: f64) -> f64 {
    saturation_vapor_pressure(temp_c) * rh_pct.clamp(0.0, 100.0) / 100.0
}

/// Atmospheric pressure at elevation, standard-atmosphere lapse.
pub(crate) fn atmospheric_pressure(elevation_m: f64) -> f64 {
    101.3 * ((293.0 - 0.0065 * elevation_m) / 293.0).powf(5.26)
}

/// Psychrometric constant from atmospheric pressure.
pub(crate) fn psychrometric_constant(pressure_kpa: f64) -> f64 {
    0.000665 * pressure_kpa
}
