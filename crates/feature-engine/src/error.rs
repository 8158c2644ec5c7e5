//! Feature Extraction Error Types

use thiserror::Error;

/// Errors that make a window unusable for feature extraction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Window holds no samples
    #[error("Window is empty")]
    EmptyWindow,

    /// Window too short for the wavelet decomposition depth
    #[error("Window of {len} samples is too short for a {levels}-level wavelet decomposition (needs {required})")]
    LengthMismatch {
        len: usize,
        required: usize,
        levels: usize,
    },

    /// Extractor parameters are unusable
    #[error("Invalid extractor config: {0}")]
    InvalidConfig(String),
}
