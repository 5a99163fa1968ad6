use crate::error::PetError;
use crate::method::PetMethod;

/// Site and method parameters for the PET estimator.
///
/// `latitude_deg` and `elevation_m` describe the segment the forcing was
/// reconciled to; `albedo` defaults to the FAO-56 reference-crop value.
/// In strict mode a slot with missing inputs aborts the run instead of
/// being recorded as a failure.
#[derive(Debug, Clone)]
pub struct PetConfig {
    latitude_deg: f64,
    elevation_m: f64,
    albedo: f64,
    method: PetMethod,
    strict: bool,
}

impl PetConfig {
    pub fn new(latitude_deg: f64, elevation_m: f64) -> Self {
        Self {
            latitude_deg,
            elevation_m,
            albedo: 0.23,
            method: PetMethod::Daily,
            strict: false,
        }
    }

    pub fn with_albedo(mut self, albedo: f64) -> Self {
        self.albedo = albedo;
        self
    }

    pub fn with_method(mut self, method: PetMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    pub fn albedo(&self) -> f64 {
        self.albedo
    }

    pub fn method(&self) -> PetMethod {
        self.method
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn validate(&self) -> Result<(), PetError> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(PetError::InvalidConfig {
                reason: format!("latitude {} out of [-90, 90]", self.latitude_deg),
            });
        }
        if !self.elevation_m.is_finite() || self.elevation_m < 0.0 {
            return Err(PetError::InvalidConfig {
                reason: format!("elevation {} m must be non-negative", self.elevation_m),
            });
        }
        if !self.albedo.is_finite() || !(0.0..=1.0).contains(&self.albedo) {
            return Err(PetError::InvalidConfig {
                reason: format!("albedo {} out of [0, 1]", self.albedo),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PetConfig::new(41.0, 250.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.albedo(), 0.23);
        assert_eq!(config.method(), PetMethod::Daily);
        assert!(!config.strict());
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        assert!(PetConfig::new(95.0, 0.0).validate().is_err());
        assert!(PetConfig::new(41.0, -10.0).validate().is_err());
        assert!(
            PetConfig::new(41.0, 250.0)
                .with_albedo(1.5)
                .validate()
                .is_err()
        );
    }
}
