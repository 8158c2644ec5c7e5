//! Sample Validator for Finiteness and Range Checking

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Errors kept in a [`ValidationResult`] before truncating
const MAX_REPORTED_ERRORS: usize = 16;

/// Validation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Valid acceleration range; `None` accepts any finite value
    pub accel_range: Option<(f64, f64)>,
}

/// Result of validating a whole stream
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all samples are valid
    pub valid: bool,
    /// First validation errors (truncated)
    pub errors: Vec<ValidationError>,
    /// Total number of invalid samples
    pub invalid_count: usize,
    /// Number of samples checked
    pub samples_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(samples_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            invalid_count: 0,
            samples_checked,
        }
    }
}

/// Validator for raw acceleration samples
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single sample
    pub fn validate_sample(&self, index: usize, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { index, value });
        }
        if let Some((min, max)) = self.config.accel_range {
            if value < min || value > max {
                return Err(ValidationError::OutOfRange {
                    index,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Fail on the first invalid sample
    pub fn check_stream(&self, samples: &[f64]) -> Result<(), ValidationError> {
        samples
            .iter()
            .enumerate()
            .try_for_each(|(i, &v)| self.validate_sample(i, v))
    }

    /// Validate every sample, collecting a bounded error report
    pub fn validate_stream(&self, samples: &[f64]) -> ValidationResult {
        let mut result = ValidationResult::valid(samples.len());
        for (i, &v) in samples.iter().enumerate() {
            if let Err(e) = self.validate_sample(i, v) {
                result.valid = false;
                result.invalid_count += 1;
                if result.errors.len() < MAX_REPORTED_ERRORS {
                    result.errors.push(e);
                }
            }
        }
        if !result.valid {
            warn!(
                "{} of {} samples failed validation",
                result.invalid_count, result.samples_checked
            );
        }
        result
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ranged() -> Validator {
        Validator::new(ValidationConfig {
            accel_range: Some((-50.0, 50.0)),
        })
    }

    #[test]
    fn test_finite_samples_pass() {
        let validator = Validator::default();
        assert!(validator.check_stream(&[0.0, -1e6, 3.25]).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let validator = Validator::default();
        let err = validator.check_stream(&[0.0, 1.0, f64::INFINITY]).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { index: 2, .. }));
        assert!(validator.validate_sample(0, f64::NAN).is_err());
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let validator = ranged();
        assert!(validator.validate_sample(0, -50.0).is_ok());
        assert!(validator.validate_sample(0, 50.0).is_ok());
        assert!(matches!(
            validator.validate_sample(7, 50.5),
            Err(ValidationError::OutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn test_report_is_truncated() {
        let samples = vec![f64::NAN; 40];
        let result = Validator::default().validate_stream(&samples);
        assert!(!result.valid);
        assert_eq!(result.invalid_count, 40);
        assert_eq!(result.errors.len(), MAX_REPORTED_ERRORS);
        assert_eq!(result.samples_checked, 40);
    }

    proptest! {
        #[test]
        fn prop_in_range_values_pass(values in proptest::collection::vec(-50.0f64..=50.0, 0..128)) {
            prop_assert!(ranged().check_stream(&values).is_ok());
            prop_assert!(ranged().validate_stream(&values).valid);
        }
    }
}
