//! Pipeline Error Types

use data_validator::ValidationError;
use feature_engine::FeatureError;
use segmenter::SegmentError;
use thiserror::Error;

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Raw stream failed ingest or validation
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Stream could not be segmented
    #[error("Segmentation failed: {0}")]
    Segment(#[from] SegmentError),

    /// Extractor could not be built
    #[error("Feature extractor setup failed: {0}")]
    Feature(#[from] FeatureError),

    /// A single window failed extraction
    #[error("Feature extraction failed for window {index}: {source}")]
    Extraction {
        index: usize,
        #[source]
        source: FeatureError,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Worker pool could not be started
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Dataset encoding error
    #[error("Encoding error: {0}")]
    Encode(String),

    /// Output write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Encode(err.to_string())
    }
}

impl From<postcard::Error> for PipelineError {
    fn from(err: postcard::Error) -> Self {
        PipelineError::Encode(err.to_string())
    }
}
