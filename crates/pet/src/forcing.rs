//! Gathers reconciled climate series onto one grid for the estimator.

use notus_reconcile::ReconciledSeries;
use notus_timegrid::TimeGrid;

use crate::error::PetError;

/// Per-slot meteorological inputs for one segment.
///
/// Each field is optional per slot; the estimator decides which absences
/// are fatal. Radiation can be supplied either as measured shortwave
/// (`solar`, MJ m-2 per slot) from which net radiation is derived, or as
/// pre-computed net radiation directly.
#[derive(Debug, Clone)]
pub struct PetForcing {
    segment: String,
    grid: TimeGrid,
    temperature: Vec<Option<f64>>,
    humidity: Vec<Option<f64>>,
    wind: Vec<Option<f64>>,
    solar: Vec<Option<f64>>,
    net_radiation: Vec<Option<f64>>,
}

impl PetForcing {
    /// Creates an empty forcing for `segment` over `grid`.
    pub fn new(segment: impl Into<String>, grid: TimeGrid) -> Self {
        let n = grid.len();
        Self {
            segment: segment.into(),
            grid,
            temperature: vec![None; n],
            humidity: vec![None; n],
            wind: vec![None; n],
            solar: vec![None; n],
            net_radiation: vec![None; n],
        }
    }

    /// Air temperature in degrees Celsius.
    pub fn with_temperature(self, series: &ReconciledSeries) -> Result<Self, PetError> {
        self.assign_series("temperature", series)
    }

    /// Relative humidity in percent.
    pub fn with_humidity(self, series: &ReconciledSeries) -> Result<Self, PetError> {
        self.assign_series("humidity", series)
    }

    /// Wind speed at 2 m, m s-1.
    pub fn with_wind(self, series: &ReconciledSeries) -> Result<Self, PetError> {
        self.assign_series("wind", series)
    }

    /// Incoming shortwave radiation, MJ m-2 per slot.
    pub fn with_solar(self, series: &ReconciledSeries) -> Result<Self, PetError> {
        self.assign_series("solar", series)
    }

    /// Pre-computed net radiation, MJ m-2 per slot. Takes precedence over
    /// `solar` where both are present.
    pub fn with_net_radiation(self, series: &ReconciledSeries) -> Result<Self, PetError> {
        self.assign_series("net_radiation", series)
    }

    /// Sets a field from raw per-slot values, one entry per grid slot.
    pub fn with_values(
        mut self,
        field: &'static str,
        values: Vec<Option<f64>>,
    ) -> Result<Self, PetError> {
        if values.len() != self.grid.len() {
            return Err(PetError::LengthMismatch {
                variable: field,
                expected: self.grid.len(),
                got: values.len(),
            });
        }
        *self.slot_mut(field)? = values;
        Ok(self)
    }

    fn assign_series(
        mut self,
        field: &'static str,
        series: &ReconciledSeries,
    ) -> Result<Self, PetError> {
        if series.grid().frequency() != self.grid.frequency() {
            return Err(PetError::FrequencyMismatch {
                variable: field,
                expected: self.grid.frequency().to_string(),
                got: series.grid().frequency().to_string(),
            });
        }
        let indexed: Vec<(usize, f64)> = series
            .iter()
            .filter_map(|(ts, value, _)| self.grid.index_of(ts).map(|i| (i, value)))
            .collect();
        let slots = self.slot_mut(field)?;
        for (i, value) in indexed {
            slots[i] = Some(value);
        }
        Ok(self)
    }

    fn slot_mut(&mut self, field: &'static str) -> Result<&mut Vec<Option<f64>>, PetError> {
        match field {
            "temperature" => Ok(&mut self.temperature),
            "humidity" => Ok(&mut self.humidity),
            "wind" => Ok(&mut self.wind),
            "solar" => Ok(&mut self.solar),
            "net_radiation" => Ok(&mut self.net_radiation),
            other => Err(PetError::InvalidConfig {
                reason: format!("unknown forcing field '{other}'"),
            }),
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub(crate) fn temperature(&self, i: usize) -> Option<f64> {
        self.temperature[i]
    }

    pub(crate) fn humidity(&self, i: usize) -> Option<f64> {
        self.humidity[i]
    }

    pub(crate) fn wind(&self, i: usize) -> Option<f64> {
        self.wind[i]
    }

    pub(crate) fn solar(&self, i: usize) -> Option<f64> {
        self.solar[i]
    }

    pub(crate) fn net_radiation(&self, i: usize) -> Option<f64> {
        self.net_radiation[i]
    }

    /// Names of the required inputs absent at slot `i`.
    ///
    /// Radiation counts as present if either net radiation or shortwave is
    /// set for the slot.
    pub(crate) fn missing_fields(&self, i: usize) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.temperature[i].is_none() {
            missing.push("temperature");
        }
        if self.humidity[i].is_none() {
            missing.push("humidity");
        }
        if self.wind[i].is_none() {
            missing.push("wind");
        }
        if self.net_radiation[i].is_none() && self.solar[i].is_none() {
            missing.push("radiation");
        }
        missing
    }
}
