//! Feature Vector Assembly

use crate::config::ExtractorConfig;
use crate::error::FeatureError;
use crate::fft::{FftAnalyzer, SpectralFeatures};
use crate::labels::FaultLabels;
use crate::statistics::TimeDomainFeatures;
use crate::wavelet::WaveletFeatures;
use segmenter::{ConditionLabel, Window, WINDOW_LEN};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of columns in a dataset row
pub const FEATURE_DIMENSION: usize = 45;

/// Number of columns the scaling/model stage consumes
pub const MODEL_INPUT_DIMENSION: usize = 35;

/// Dataset column names, in row order
pub const COLUMNS: [&str; FEATURE_DIMENSION] = [
    "time_rms",
    "time_skewness",
    "time_kurtosis",
    "time_crest_factor",
    "time_shape_factor",
    "time_mean",
    "time_std",
    "time_peak",
    "time_mean_diff",
    "time_std_diff",
    "time_min_diff",
    "time_max_diff",
    "fft_centroid",
    "fft_bandwidth",
    "fft_peak_freq",
    "fft_over_env",
    "fft_noise",
    "fft_amp_1x",
    "fft_amp_2x",
    "fft_amp_3x",
    "fft_amp_4x",
    "fft_amp_5x",
    "cD1_rms",
    "cD1_kurtosis",
    "cD2_rms",
    "cD2_kurtosis",
    "cD3_rms",
    "cD3_kurtosis",
    "cD4_rms",
    "cD4_kurtosis",
    "cD5_rms",
    "cD5_kurtosis",
    "cD6_rms",
    "cD6_kurtosis",
    "cD7_rms",
    "cD7_kurtosis",
    "normal",
    "anomaly",
    "bearing",
    "misalignment",
    "unbalance",
    "rotor",
    "cavitation",
    "vane",
    "real_normal",
];

/// Model input contract. Name and order must not change: the scaler and the
/// trained network index these positionally.
pub const MODEL_INPUT_COLUMNS: [&str; MODEL_INPUT_DIMENSION] = [
    "time_rms",
    "time_skewness",
    "time_kurtosis",
    "time_crest_factor",
    "time_shape_factor",
    "time_mean",
    "time_std",
    "time_peak",
    "time_mean_diff",
    "time_std_diff",
    "time_min_diff",
    "time_max_diff",
    "fft_centroid",
    "fft_bandwidth",
    "fft_peak_freq",
    "fft_over_env",
    "fft_amp_1x",
    "fft_amp_2x",
    "fft_amp_3x",
    "fft_amp_4x",
    "fft_amp_5x",
    "cD1_rms",
    "cD1_kurtosis",
    "cD2_rms",
    "cD2_kurtosis",
    "cD3_rms",
    "cD3_kurtosis",
    "cD4_rms",
    "cD4_kurtosis",
    "cD5_rms",
    "cD5_kurtosis",
    "cD6_rms",
    "cD6_kurtosis",
    "cD7_rms",
    "cD7_kurtosis",
];

/// Position of `fft_noise` in a row; the model input skips it
const NOISE_COLUMN: usize = 16;

/// First label column in a row
const LABEL_COLUMNS_START: usize = 36;

/// Features and labels for one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub time: TimeDomainFeatures,
    pub spectral: SpectralFeatures,
    pub wavelet: WaveletFeatures,
    pub labels: FaultLabels,
}

impl FeatureVector {
    /// Values in [`COLUMNS`] order
    pub fn to_row(&self) -> Vec<f64> {
        let t = &self.time;
        let s = &self.spectral;
        let l = &self.labels;

        let mut row = Vec::with_capacity(FEATURE_DIMENSION);
        row.extend_from_slice(&[
            t.rms,
            t.skewness,
            t.kurtosis,
            t.crest_factor,
            t.shape_factor,
            t.mean,
            t.std_dev,
            t.peak,
            t.mean_diff,
            t.std_diff,
            t.min_diff,
            t.max_diff,
        ]);
        row.extend_from_slice(&[
            s.centroid,
            s.bandwidth,
            s.peak_freq,
            s.over_envelope as f64,
            s.noise,
        ]);
        row.extend(s.harmonics.iter().map(|h| h.amplitude));
        for band in &self.wavelet.bands {
            row.push(band.rms);
            row.push(band.kurtosis);
        }
        row.extend(
            [
                l.normal,
                l.anomaly,
                l.bearing,
                l.misalignment,
                l.unbalance,
                l.rotor,
                l.cavitation,
                l.vane,
                l.real_normal,
            ]
            .map(f64::from),
        );
        row
    }

    /// Values in [`MODEL_INPUT_COLUMNS`] order
    pub fn model_input(&self) -> [f64; MODEL_INPUT_DIMENSION] {
        let row = self.to_row();
        let mut input = [0.0; MODEL_INPUT_DIMENSION];
        input[..NOISE_COLUMN].copy_from_slice(&row[..NOISE_COLUMN]);
        input[NOISE_COLUMN..].copy_from_slice(&row[NOISE_COLUMN + 1..LABEL_COLUMNS_START]);
        input
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        let idx = COLUMNS.iter().position(|c| *c == column)?;
        self.to_row().get(idx).copied()
    }

    /// Number of non-finite (sentinel) feature values
    pub fn sentinel_count(&self) -> usize {
        self.to_row()[..LABEL_COLUMNS_START]
            .iter()
            .filter(|v| !v.is_finite())
            .count()
    }
}

/// Window-to-features transform. Holds no per-window state, so one extractor
/// can serve any number of threads.
pub struct FeatureExtractor {
    fft_analyzer: FftAnalyzer,
}

impl FeatureExtractor {
    /// Create an extractor for windows of `window_len` samples
    pub fn new(config: ExtractorConfig, window_len: usize) -> Result<Self, FeatureError> {
        config.validate()?;
        Ok(Self {
            fft_analyzer: FftAnalyzer::new(config, window_len),
        })
    }

    /// Extractor with the rig's fixed parameters
    pub fn with_defaults() -> Self {
        Self {
            fft_analyzer: FftAnalyzer::new(ExtractorConfig::default(), WINDOW_LEN),
        }
    }

    /// Extract the feature vector of a segmented window
    pub fn extract(&self, window: &Window) -> Result<FeatureVector, FeatureError> {
        let features = self.extract_samples(window.samples(), window.label())?;
        debug!(
            "Window {} ({}): rms={:.4}, peak_freq={}, over_env={}",
            window.index(),
            window.label(),
            features.time.rms,
            features.spectral.peak_freq,
            features.spectral.over_envelope
        );
        Ok(features)
    }

    /// Extract features from raw samples recorded under `label`
    pub fn extract_samples(
        &self,
        samples: &[f64],
        label: ConditionLabel,
    ) -> Result<FeatureVector, FeatureError> {
        if samples.is_empty() {
            return Err(FeatureError::EmptyWindow);
        }

        // Length precondition is checked here before any spectral work
        let wavelet = WaveletFeatures::compute(samples)?;

        Ok(FeatureVector {
            time: TimeDomainFeatures::compute(samples),
            spectral: self.fft_analyzer.analyze(samples),
            wavelet,
            labels: FaultLabels::from(label),
        })
    }
}
