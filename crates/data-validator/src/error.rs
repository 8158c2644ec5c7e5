//! Validation Error Types

use thiserror::Error;

/// Errors during sample ingestion and validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Sample out of allowed range
    #[error("Sample {index} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        index: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite sample
    #[error("Sample {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Missing required column
    #[error("Missing required column: {0}")]
    MissingField(String),

    /// Underlying read failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ValidationError {
    fn from(err: std::io::Error) -> Self {
        ValidationError::Io(err.to_string())
    }
}
