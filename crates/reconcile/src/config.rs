//! Configuration for reconciliation.

use crate::error::ReconcileError;

/// Weighting profile used when distributing a coarse value over sub-slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisaggProfile {
    /// Equal weights (additive) or replication (intensive).
    #[default]
    Even,
    /// Cosine day-cycle weights peaking at a configurable hour.
    Diurnal,
}

/// Configuration for the reconciler.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use notus_reconcile::ReconcileConfig;
///
/// let config = ReconcileConfig::new()
///     .with_max_gap_slots(3)
///     .with_idw_power(1.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    max_gap_slots: usize,
    idw_power: f64,
    disagg_profile: DisaggProfile,
    diurnal_peak_hour: u8,
    diurnal_amplitude: f64,
}

impl ReconcileConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `max_gap_slots = 6`, `idw_power = 2.0`,
    /// `disagg_profile = Even`, `diurnal_peak_hour = 15`,
    /// `diurnal_amplitude = 0.0`.
    pub fn new() -> Self {
        Self {
            max_gap_slots: 6,
            idw_power: 2.0,
            disagg_profile: DisaggProfile::Even,
            diurnal_peak_hour: 15,
            diurnal_amplitude: 0.0,
        }
    }

    /// Sets the longest interior gap (in slots) filled by linear interpolation.
    pub fn with_max_gap_slots(mut self, n: usize) -> Self {
        self.max_gap_slots = n;
        self
    }

    /// Sets the inverse-distance weighting exponent.
    pub fn with_idw_power(mut self, p: f64) -> Self {
        self.idw_power = p;
        self
    }

    /// Sets the disaggregation weighting profile.
    pub fn with_disagg_profile(mut self, p: DisaggProfile) -> Self {
        self.disagg_profile = p;
        self
    }

    /// Sets the hour (0..=23) at which the diurnal profile peaks.
    pub fn with_diurnal_peak_hour(mut self, h: u8) -> Self {
        self.diurnal_peak_hour = h;
        self
    }

    /// Sets the diurnal anomaly amplitude for intensive variables.
    pub fn with_diurnal_amplitude(mut self, a: f64) -> Self {
        self.diurnal_amplitude = a;
        self
    }

    // --- Accessors ---

    /// Returns the longest interpolatable gap in slots.
    pub fn max_gap_slots(&self) -> usize {
        self.max_gap_slots
    }

    /// Returns the inverse-distance weighting exponent.
    pub fn idw_power(&self) -> f64 {
        self.idw_power
    }

    /// Returns the disaggregation profile.
    pub fn disagg_profile(&self) -> DisaggProfile {
        self.disagg_profile
    }

    /// Returns the diurnal peak hour.
    pub fn diurnal_peak_hour(&self) -> u8 {
        self.diurnal_peak_hour
    }

    /// Returns the diurnal anomaly amplitude.
    pub fn diurnal_amplitude(&self) -> f64 {
        self.diurnal_amplitude
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ReconcileError> {
        if !self.idw_power.is_finite() || self.idw_power <= 0.0 {
            return Err(ReconcileError::InvalidConfig {
                reason: format!(
                    "idw_power must be finite and positive, got {}",
                    self.idw_power
                ),
            });
        }
        if self.diurnal_peak_hour > 23 {
            return Err(ReconcileError::InvalidConfig {
                reason: format!(
                    "diurnal_peak_hour must be 0..=23, got {}",
                    self.diurnal_peak_hour
                ),
            });
        }
        if !self.diurnal_amplitude.is_finite() || self.diurnal_amplitude < 0.0 {
            return Err(ReconcileError::InvalidConfig {
                reason: format!(
                    "diurnal_amplitude must be finite and non-negative, got {}",
                    self.diurnal_amplitude
                ),
            });
        }
        Ok(())
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self::new()
    }
}
