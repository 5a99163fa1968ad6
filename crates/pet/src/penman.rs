//! The reference-crop combination equation, FAO-56 eq 6 and eq 53.

/// Inputs to one slot of the combination equation, already in the units
/// the equation expects (kPa, MJ m-2 per slot, m s-1 at 2 m).
#[derive(Debug, Clone, Copy)]
pub(crate) struct SlotInputs {
    pub temp_c: f64,
    pub wind_2m: f64,
    pub svp: f64,
    pub avp: f64,
    pub svp_slope: f64,
    pub gamma: f64,
    pub net_radiation: f64,
}

/// Daily reference evapotranspiration, mm day-1.
pub(crate) fn reference_et_daily(inputs: &SlotInputs) -> f64 {
    // Soil heat flux is negligible over a whole day.
    combination(inputs, 900.0, 0.0)
}

/// Hourly reference evapotranspiration, mm hour-1.
///
/// Soil heat flux follows net radiation: a tenth of it during daylight,
/// half of it at night when the flux reverses.
pub(crate) fn reference_et_hourly(inputs: &SlotInputs) -> f64 {
    let g = if inputs.net_radiation >= 0.0 {
        0.1 * inputs.net_radiation
    } else {
        0.5 * inputs.net_radiation
    };
    combination(inputs, 37.0, g)
}

fn combination(inputs: &SlotInputs, aero_coefficient: f64, soil_heat_flux: f64) -> f64 {
    let SlotInputs {
        temp_c,
        wind_2m,
        svp,
        avp,
        svp_slope,
        gamma,
        net_radiation,
    } = *inputs;

    let radiation_term = 0.408 * svp_slope * (net_radiation - soil_heat_flux);
    let aero_term =
        gamma * aero_coefficient / (temp_c + 273.0) * wind_2m * (svp - avp).max(0.0);
    let denom = svp_slope + gamma * (1.0 + 0.34 * wind_2m);

    ((radiation_term + aero_term) / denom).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere;
    use approx::assert_relative_eq;

    fn inputs(temp_c: f64, rh_pct: f64, wind: f64, rn: f64) -> SlotInputs {
        let svp = atmosphere::saturation_vapor_pressure(temp_c);
        SlotInputs {
            temp_c,
            wind_2m: wind,
            svp,
            avp: svp * rh_pct / 100.0,
            svp_slope: atmosphere::svp_slope(temp_c),
            gamma: atmosphere::psychrometric_constant(atmosphere::atmospheric_pressure(0.0)),
            net_radiation: rn,
        }
    }

    #[test]
    fn no_radiation_and_no_wind_means_no_demand() {
        let et = reference_et_daily(&inputs(15.0, 60.0, 0.0, 0.0));
        assert_relative_eq!(et, 0.0);
    }

    #[test]
    fn never_negative() {
        // Strongly negative net radiation, saturated air.
        let et = reference_et_daily(&inputs(5.0, 100.0, 1.0, -3.0));
        assert_eq!(et, 0.0);
    }

    #[test]
    fn demand_grows_with_radiation_and_wind() {
        let base = reference_et_daily(&inputs(20.0, 50.0, 2.0, 12.0));
        let sunnier = reference_et_daily(&inputs(20.0, 50.0, 2.0, 16.0));
        let windier = reference_et_daily(&inputs(20.0, 50.0, 4.0, 12.0));
        assert!(sunnier > base);
        assert!(windier > base);
        // A warm summer day lands in a plausible range.
        assert!(base > 2.0 && base < 8.0);
    }

    #[test]
    fn humid_air_evaporates_less() {
        let dry = reference_et_daily(&inputs(25.0, 30.0, 2.0, 14.0));
        let humid = reference_et_daily(&inputs(25.0, 90.0, 2.0, 14.0));
        assert!(humid < dry);
    }

    #[test]
    fn hourly_night_slot_reverses_soil_heat_flux() {
        // At night Rn < 0 and G = 0.5 Rn, so the radiation term shrinks
        // less than it would with the daytime fraction.
        let night = reference_et_hourly(&inputs(10.0, 80.0, 1.0, -0.2));
        let day = reference_et_hourly(&inputs(20.0, 50.0, 2.0, 2.0));
        assert!(night >= 0.0);
        assert!(day > night);
    }
}
