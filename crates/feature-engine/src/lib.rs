//! Vibration Feature Engine
//!
//! Turns a labeled acceleration window into a fixed-order feature vector:
//! time-domain statistics, spectral descriptors, envelope activity, db4
//! wavelet band statistics and the derived fault labels.

mod config;
mod envelope;
mod error;
mod features;
mod fft;
mod labels;
mod statistics;
mod wavelet;

pub use config::{
    ExtractorConfig, ENVELOPE_THRESHOLD, FUNDAMENTAL_HZ, HARMONIC_ORDERS, NOISE_BAND_HZ,
    SAMPLE_RATE, SHAFT_SPEED_RPM,
};
pub use error::FeatureError;
pub use features::{
    FeatureExtractor, FeatureVector, COLUMNS, FEATURE_DIMENSION, MODEL_INPUT_COLUMNS,
    MODEL_INPUT_DIMENSION,
};
pub use fft::{bin_frequency, FftAnalyzer, HarmonicBin, SpectralFeatures};
pub use labels::{FaultLabels, ABSENT, FAULT, WARNING};
pub use statistics::{StatisticalFeatures, TimeDomainFeatures};
pub use wavelet::{wavedec, BandStats, Decomposition, WaveletFeatures, WAVELET_LEVELS};
