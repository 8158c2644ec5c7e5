//! Extractor Parameters

use crate::error::FeatureError;
use serde::{Deserialize, Serialize};

/// Accelerometer sampling rate (Hz)
pub const SAMPLE_RATE: f64 = 12_800.0;

/// Nominal shaft speed of the pump under test (rpm)
pub const SHAFT_SPEED_RPM: f64 = 1180.0;

/// Rotational fundamental, ~19.67 Hz
pub const FUNDAMENTAL_HZ: f64 = SHAFT_SPEED_RPM / 60.0;

/// Envelope-spectrum amplitude a bin must exceed to be counted
pub const ENVELOPE_THRESHOLD: f64 = 100.0;

/// Bearing noise band (Hz, inclusive)
pub const NOISE_BAND_HZ: (f64, f64) = (500.0, 2000.0);

/// Number of shaft harmonics reported (1x..5x)
pub const HARMONIC_ORDERS: usize = 5;

/// Feature extractor parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sampling rate (Hz)
    pub sample_rate: f64,
    /// Shaft rotational frequency (Hz)
    pub fundamental_hz: f64,
    /// Envelope-spectrum bin threshold
    pub envelope_threshold: f64,
    /// Inclusive band averaged for the noise feature (Hz)
    pub noise_band: (f64, f64),
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            fundamental_hz: FUNDAMENTAL_HZ,
            envelope_threshold: ENVELOPE_THRESHOLD,
            noise_band: NOISE_BAND_HZ,
        }
    }
}

impl ExtractorConfig {
    /// Reject parameters that would make every window meaningless
    pub fn validate(&self) -> Result<(), FeatureError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(FeatureError::InvalidConfig(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if !(self.fundamental_hz.is_finite() && self.fundamental_hz > 0.0) {
            return Err(FeatureError::InvalidConfig(format!(
                "fundamental_hz must be positive, got {}",
                self.fundamental_hz
            )));
        }
        let (low, high) = self.noise_band;
        if !(low <= high) {
            return Err(FeatureError::InvalidConfig(format!(
                "noise_band [{}, {}] is empty",
                low, high
            )));
        }
        Ok(())
    }
}
