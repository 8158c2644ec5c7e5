//! FFT-based Frequency Analysis

use crate::config::{ExtractorConfig, HARMONIC_ORDERS};
use crate::envelope;
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Spectrum bin nearest to one shaft harmonic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicBin {
    /// Harmonic order (1 = fundamental)
    pub order: usize,
    /// Index of the nearest positive-frequency bin
    pub bin: usize,
    /// Bin frequency rounded to whole Hz
    pub freq_hz: i64,
    /// Spectrum magnitude at the bin
    pub amplitude: f64,
}

/// Frequency-domain descriptors of one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralFeatures {
    /// Magnitude-weighted mean frequency (Hz)
    pub centroid: f64,
    /// Magnitude-weighted spread around the centroid (Hz)
    pub bandwidth: f64,
    /// Frequency of the largest one-sided bin (Hz)
    pub peak_freq: f64,
    /// Envelope-spectrum bins above threshold
    pub over_envelope: usize,
    /// Mean magnitude inside the noise band
    pub noise: f64,
    /// 1x..5x shaft harmonics
    pub harmonics: [HarmonicBin; HARMONIC_ORDERS],
}

impl SpectralFeatures {
    /// Descriptors of a signal with no bins
    pub fn undefined() -> Self {
        Self {
            centroid: f64::NAN,
            bandwidth: f64::NAN,
            peak_freq: f64::NAN,
            over_envelope: 0,
            noise: f64::NAN,
            harmonics: std::array::from_fn(|i| HarmonicBin {
                order: i + 1,
                bin: 0,
                freq_hz: 0,
                amplitude: f64::NAN,
            }),
        }
    }
}

/// Signed frequency of bin `k` in an `n`-point FFT (negative half above n/2)
pub fn bin_frequency(k: usize, n: usize, sample_rate: f64) -> f64 {
    let positive = n.saturating_sub(1) / 2 + 1;
    let signed = if k < positive {
        k as f64
    } else {
        k as f64 - n as f64
    };
    signed * sample_rate / n as f64
}

/// Forward/inverse plans for one transform length
#[derive(Clone)]
struct Plans {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl Plans {
    fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
        }
    }
}

/// FFT analyzer for frequency and envelope features.
///
/// Plans for the configured window length are built once; the analyzer is
/// `Send + Sync` and can be shared by extraction workers.
pub struct FftAnalyzer {
    config: ExtractorConfig,
    plans: Plans,
}

impl FftAnalyzer {
    /// Create an analyzer with plans for `len`-sample windows
    pub fn new(config: ExtractorConfig, len: usize) -> Self {
        Self {
            config,
            plans: Plans::new(len.max(1)),
        }
    }

    fn plans_for(&self, len: usize) -> Plans {
        if self.plans.forward.len() == len {
            self.plans.clone()
        } else {
            Plans::new(len)
        }
    }

    /// Compute spectral features from a signal
    pub fn analyze(&self, signal: &[f64]) -> SpectralFeatures {
        let n = signal.len();
        if n < 2 {
            return SpectralFeatures::undefined();
        }

        let plans = self.plans_for(n);
        let spectrum = forward(&*plans.forward, signal);
        let magnitude: Vec<f64> = spectrum.iter().map(|c| c.norm()).collect();
        let fs = self.config.sample_rate;

        // One-sided (rfft) bins 0..=n/2
        let one_sided = &magnitude[..=n / 2];
        let resolution = fs / n as f64;
        let (centroid, bandwidth) = centroid_and_bandwidth(one_sided, resolution);
        let peak_freq = argmax(one_sided) as f64 * resolution;

        let harmonics = self.harmonics(&magnitude);
        let noise = self.band_mean(&magnitude);

        let env = envelope::analytic_envelope(&spectrum, &*plans.inverse);
        let env_magnitude: Vec<f64> = forward(&*plans.forward, &env).iter().map(|c| c.norm()).collect();
        let over_envelope =
            envelope::count_over_threshold(&env_magnitude[..n / 2], self.config.envelope_threshold);

        SpectralFeatures {
            centroid,
            bandwidth,
            peak_freq,
            over_envelope,
            noise,
            harmonics,
        }
    }

    /// Nearest positive-frequency bin to each multiple of the fundamental
    pub fn harmonics(&self, magnitude: &[f64]) -> [HarmonicBin; HARMONIC_ORDERS] {
        let n = magnitude.len();
        if n == 0 {
            return SpectralFeatures::undefined().harmonics;
        }
        let fs = self.config.sample_rate;
        // Positive half excluding the Nyquist bin
        let positive = n / 2;

        std::array::from_fn(|i| {
            let order = i + 1;
            let target = order as f64 * self.config.fundamental_hz;
            let bin = (0..positive)
                .min_by(|&a, &b| {
                    let da = (bin_frequency(a, n, fs) - target).abs();
                    let db = (bin_frequency(b, n, fs) - target).abs();
                    da.total_cmp(&db)
                })
                .unwrap_or(0);

            HarmonicBin {
                order,
                bin,
                freq_hz: bin_frequency(bin, n, fs).round_ties_even() as i64,
                amplitude: magnitude.get(bin).copied().unwrap_or(f64::NAN),
            }
        })
    }

    /// Mean two-sided magnitude over bins inside the noise band
    pub fn band_mean(&self, magnitude: &[f64]) -> f64 {
        let n = magnitude.len();
        let (low, high) = self.config.noise_band;
        let (sum, count) = magnitude
            .iter()
            .enumerate()
            .filter(|(k, _)| {
                let f = bin_frequency(*k, n, self.config.sample_rate);
                f >= low && f <= high
            })
            .fold((0.0, 0usize), |(sum, count), (_, m)| (sum + m, count + 1));

        // Empty band: 0/0 = NaN
        sum / count as f64
    }
}

pub(crate) fn forward(fft: &dyn Fft<f64>, signal: &[f64]) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut buffer);
    buffer
}

fn centroid_and_bandwidth(magnitude: &[f64], resolution: f64) -> (f64, f64) {
    let total: f64 = magnitude.iter().sum();
    let centroid = magnitude
        .iter()
        .enumerate()
        .map(|(k, m)| k as f64 * resolution * m)
        .sum::<f64>()
        / total;
    let spread = magnitude
        .iter()
        .enumerate()
        .map(|(k, m)| {
            let d = k as f64 * resolution - centroid;
            d * d * m
        })
        .sum::<f64>()
        / total;
    (centroid, spread.sqrt())
}

/// Index of the first maximum
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}
