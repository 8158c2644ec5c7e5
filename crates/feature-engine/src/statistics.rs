//! Statistical Features Computation
//!
//! Population (biased) moment estimators. Degenerate inputs produce NaN rather
//! than an error so a single silent window never aborts a batch.

use serde::{Deserialize, Serialize};

/// Relative variance floor below which a signal counts as constant
const DEGENERATE_RESOLUTION: f64 = 1e-15;

/// Moment statistics for a signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticalFeatures {
    /// Mean value
    pub mean: f64,
    /// Standard deviation (ddof = 0)
    pub std_dev: f64,
    /// Skewness: E[(X-μ)³] / σ³
    pub skewness: f64,
    /// Excess kurtosis: E[(X-μ)⁴] / σ⁴ - 3
    pub kurtosis: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

impl StatisticalFeatures {
    /// All statistics undefined
    pub const UNDEFINED: Self = Self {
        mean: f64::NAN,
        std_dev: f64::NAN,
        skewness: f64::NAN,
        kurtosis: f64::NAN,
        min: f64::NAN,
        max: f64::NAN,
    };

    /// Compute statistical features from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::UNDEFINED;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;

        for &v in values {
            min = min.min(v);
            max = max.max(v);
            let d = v - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }

        m2 /= n;
        m3 /= n;
        m4 /= n;

        let (skewness, kurtosis) = if is_degenerate(m2, mean) {
            (f64::NAN, f64::NAN)
        } else {
            (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
        };

        Self {
            mean,
            std_dev: m2.sqrt(),
            skewness,
            kurtosis,
            min,
            max,
        }
    }
}

fn is_degenerate(m2: f64, mean: f64) -> bool {
    m2 <= (DEGENERATE_RESOLUTION * mean) * (DEGENERATE_RESOLUTION * mean)
}

/// Root-mean-square amplitude
pub fn rms(values: &[f64]) -> f64 {
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// Excess kurtosis alone, NaN for constant input
pub fn kurtosis(values: &[f64]) -> f64 {
    StatisticalFeatures::compute(values).kurtosis
}

/// Time-domain descriptors of one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeDomainFeatures {
    pub rms: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    /// peak / rms
    pub crest_factor: f64,
    /// rms / mean(|x|)
    pub shape_factor: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// max(|x|)
    pub peak: f64,
    /// First-difference ("volatility") statistics
    pub mean_diff: f64,
    pub std_diff: f64,
    pub min_diff: f64,
    pub max_diff: f64,
}

impl TimeDomainFeatures {
    pub fn compute(samples: &[f64]) -> Self {
        let stats = StatisticalFeatures::compute(samples);
        let rms = rms(samples);
        let peak = samples.iter().fold(f64::NEG_INFINITY, |acc, v| acc.max(v.abs()));
        let mean_abs = samples.iter().map(|v| v.abs()).sum::<f64>() / samples.len() as f64;

        let diff: Vec<f64> = samples.windows(2).map(|pair| pair[1] - pair[0]).collect();
        let volatility = StatisticalFeatures::compute(&diff);

        // Unguarded: a silent window yields 0/0 = NaN here
        Self {
            rms,
            skewness: stats.skewness,
            kurtosis: stats.kurtosis,
            crest_factor: peak / rms,
            shape_factor: rms / mean_abs,
            mean: stats.mean,
            std_dev: stats.std_dev,
            peak,
            mean_diff: volatility.mean,
            std_diff: volatility.std_dev,
            min_diff: volatility.min,
            max_diff: volatility.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_computation() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = StatisticalFeatures::compute(&values);
        assert!((stats.mean - 3.0).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_std_dev_computation() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = StatisticalFeatures::compute(&values);
        // Population std dev of this dataset is exactly 2
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_data_has_zero_skew() {
        let stats = StatisticalFeatures::compute(&[-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert!(stats.skewness.abs() < 1e-12);
        // m2 = 2, m4 = 6.8 -> 6.8 / 4 - 3
        assert!((stats.kurtosis - (-1.3)).abs() < 1e-12);
    }

    #[test]
    fn test_right_tail_is_positive_skew() {
        let stats = StatisticalFeatures::compute(&[0.0, 0.0, 0.0, 0.0, 10.0]);
        assert!(stats.skewness > 1.0);
    }

    #[test]
    fn test_constant_values_are_degenerate() {
        let stats = StatisticalFeatures::compute(&[3.5; 16]);
        assert_eq!(stats.std_dev, 0.0);
        assert!(stats.skewness.is_nan());
        assert!(stats.kurtosis.is_nan());
    }

    #[test]
    fn test_empty_values() {
        let stats = StatisticalFeatures::compute(&[]);
        assert!(stats.mean.is_nan());
        assert!(stats.min.is_nan());
    }

    #[test]
    fn test_time_domain_square_wave() {
        let samples: Vec<f64> = (0..8).map(|i| if i % 2 == 0 { 2.0 } else { -2.0 }).collect();
        let features = TimeDomainFeatures::compute(&samples);
        assert!((features.rms - 2.0).abs() < 1e-12);
        assert_eq!(features.peak, 2.0);
        assert!((features.crest_factor - 1.0).abs() < 1e-12);
        assert!((features.shape_factor - 1.0).abs() < 1e-12);
        assert_eq!(features.min_diff, -4.0);
        assert_eq!(features.max_diff, 4.0);
        assert!((features.mean_diff - (-4.0 / 7.0)).abs() < 1e-12);
    }

    #[test]
    fn test_silent_window_yields_sentinels() {
        let features = TimeDomainFeatures::compute(&[0.0; 64]);
        assert_eq!(features.rms, 0.0);
        assert_eq!(features.peak, 0.0);
        assert!(features.crest_factor.is_nan());
        assert!(features.shape_factor.is_nan());
        assert!(features.skewness.is_nan());
        assert!(features.kurtosis.is_nan());
        assert_eq!(features.std_diff, 0.0);
    }
}
