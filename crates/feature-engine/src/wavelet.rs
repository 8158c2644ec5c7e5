//! Daubechies-4 Discrete Wavelet Transform
//!
//! Fixed 8-tap filter bank with half-sample symmetric boundary extension. Each
//! level produces `floor((n + 7) / 2)` approximation and detail coefficients.

use crate::error::FeatureError;
use crate::statistics::{kurtosis, rms};
use serde::{Deserialize, Serialize};

/// Decomposition depth
pub const WAVELET_LEVELS: usize = 7;

/// Taps in the db4 filters
pub const FILTER_LEN: usize = 8;

/// db4 decomposition low-pass filter
pub const DB4_DEC_LO: [f64; FILTER_LEN] = [
    -0.010597401785069032,
    0.0328830116668852,
    0.030841381835560764,
    -0.18703481171909309,
    -0.027983769416859854,
    0.6308807679298589,
    0.7148465705529157,
    0.2303778133088965,
];

/// db4 decomposition high-pass filter (quadrature mirror of the low-pass)
pub const DB4_DEC_HI: [f64; FILTER_LEN] = [
    -0.2303778133088965,
    0.7148465705529157,
    -0.6308807679298589,
    -0.027983769416859854,
    0.18703481171909309,
    0.030841381835560764,
    -0.0328830116668852,
    -0.010597401785069032,
];

/// Shortest input supporting `levels` decomposition levels
pub const fn min_len(levels: usize) -> usize {
    (FILTER_LEN - 1) << levels
}

/// Sample of the half-sample symmetric extension of `x` at `idx`
fn symmetric(x: &[f64], idx: isize) -> f64 {
    let n = x.len() as isize;
    let m = idx.rem_euclid(2 * n);
    if m < n {
        x[m as usize]
    } else {
        x[(2 * n - 1 - m) as usize]
    }
}

/// One analysis step: (approximation, detail)
pub fn dwt(signal: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = signal.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let out_len = (n + FILTER_LEN - 1) / 2;
    let mut approx = Vec::with_capacity(out_len);
    let mut detail = Vec::with_capacity(out_len);

    for o in 0..out_len {
        let i = (2 * o + 1) as isize;
        let mut lo = 0.0;
        let mut hi = 0.0;
        for j in 0..FILTER_LEN {
            let x = symmetric(signal, i - j as isize);
            lo += DB4_DEC_LO[j] * x;
            hi += DB4_DEC_HI[j] * x;
        }
        approx.push(lo);
        detail.push(hi);
    }

    (approx, detail)
}

/// Multi-level decomposition result
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Final (coarsest) approximation coefficients
    pub approximation: Vec<f64>,
    /// Detail coefficients, `details[0]` = level 1 (finest)
    pub details: Vec<Vec<f64>>,
}

/// Decompose `signal` to exactly `levels` levels, failing fast when it is too short
pub fn wavedec(signal: &[f64], levels: usize) -> Result<Decomposition, FeatureError> {
    let required = min_len(levels);
    if signal.len() < required {
        return Err(FeatureError::LengthMismatch {
            len: signal.len(),
            required,
            levels,
        });
    }

    let mut approximation = signal.to_vec();
    let mut details = Vec::with_capacity(levels);
    for _ in 0..levels {
        let (a, d) = dwt(&approximation);
        approximation = a;
        details.push(d);
    }

    Ok(Decomposition {
        approximation,
        details,
    })
}

/// RMS and kurtosis of one detail band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandStats {
    pub rms: f64,
    pub kurtosis: f64,
}

/// Per-band statistics in column order: `bands[0]` is column `cD1`, the
/// coarsest (level-7) detail band, down to `bands[6]` = `cD7`, the finest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveletFeatures {
    pub bands: [BandStats; WAVELET_LEVELS],
}

impl WaveletFeatures {
    pub fn compute(signal: &[f64]) -> Result<Self, FeatureError> {
        let decomposition = wavedec(signal, WAVELET_LEVELS)?;
        let bands = std::array::from_fn(|i| {
            let coeffs = &decomposition.details[WAVELET_LEVELS - 1 - i];
            BandStats {
                rms: rms(coeffs),
                kurtosis: kurtosis(coeffs),
            }
        });
        Ok(Self { bands })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_normalisation() {
        let lo_sum: f64 = DB4_DEC_LO.iter().sum();
        let hi_sum: f64 = DB4_DEC_HI.iter().sum();
        let lo_energy: f64 = DB4_DEC_LO.iter().map(|h| h * h).sum();
        assert!((lo_sum - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert!(hi_sum.abs() < 1e-12);
        assert!((lo_energy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_extension() {
        let x = [1.0, 2.0, 3.0];
        let ext: Vec<f64> = (-4..7).map(|i| symmetric(&x, i)).collect();
        assert_eq!(ext, vec![3.0, 3.0, 2.0, 1.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_output_lengths_per_level() {
        let signal: Vec<f64> = (0..12_800).map(|i| (i as f64 * 0.37).sin()).collect();
        let decomposition = wavedec(&signal, WAVELET_LEVELS).unwrap();
        let lengths: Vec<usize> = decomposition.details.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![6403, 3205, 1606, 806, 406, 206, 106]);
        assert_eq!(decomposition.approximation.len(), 106);
    }

    #[test]
    fn test_constant_signal_has_no_detail() {
        let (approx, detail) = dwt(&[4.0; 64]);
        assert!(detail.iter().all(|d| d.abs() < 1e-12));
        assert!(approx.iter().all(|a| (a - 4.0 * std::f64::consts::SQRT_2).abs() < 1e-12));
    }

    #[test]
    fn test_vanishing_moments_on_polynomial() {
        // db4 annihilates cubics away from the boundaries
        let signal: Vec<f64> = (0..256)
            .map(|i| {
                let t = i as f64 / 64.0;
                1.5 - t + 0.25 * t * t - 0.1 * t * t * t
            })
            .collect();
        let (_, detail) = dwt(&signal);
        for d in &detail[3..signal.len() / 2 - 1] {
            assert!(d.abs() < 1e-9, "{d}");
        }
    }

    #[test]
    fn test_too_short_fails_fast() {
        let signal = vec![1.0; min_len(WAVELET_LEVELS) - 1];
        let err = wavedec(&signal, WAVELET_LEVELS).unwrap_err();
        assert_eq!(
            err,
            FeatureError::LengthMismatch {
                len: 895,
                required: 896,
                levels: 7
            }
        );
        assert!(wavedec(&vec![1.0; 896], WAVELET_LEVELS).is_ok());
    }

    #[test]
    fn test_zero_signal_band_stats() {
        let features = WaveletFeatures::compute(&vec![0.0; 12_800]).unwrap();
        for band in &features.bands {
            assert_eq!(band.rms, 0.0);
            assert!(band.kurtosis.is_nan());
        }
    }

    #[test]
    fn test_bands_ordered_coarse_to_fine() {
        // Alternating signal sits in the finest band, column cD7
        let signal: Vec<f64> = (0..1024).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let features = WaveletFeatures::compute(&signal).unwrap();
        let finest = features.bands[WAVELET_LEVELS - 1].rms;
        assert!(finest > 1.0);
        assert!(features.bands[..WAVELET_LEVELS - 1].iter().all(|b| b.rms < finest));

        // A 170-sample period falls in the level-7 band, column cD1
        let slow: Vec<f64> = (0..12_800)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 170.0).sin())
            .collect();
        let features = WaveletFeatures::compute(&slow).unwrap();
        assert!(features.bands[0].rms > 5.0);
        assert!(features.bands[WAVELET_LEVELS - 1].rms < 0.01);
    }
}
