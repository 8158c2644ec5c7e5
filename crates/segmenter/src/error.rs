//! Segmentation Error Types

use thiserror::Error;

/// Errors that abort segmentation of a raw stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// No samples at all
    #[error("Raw stream is empty")]
    EmptyStream,

    /// Stream shorter than a single window
    #[error("Raw stream of {len} samples cannot fill one window of {window_len} samples")]
    TooShort { len: usize, window_len: usize },

    /// Window length of zero
    #[error("Window length must be positive")]
    ZeroWindowLength,

    /// Label table is malformed
    #[error("Invalid label schedule: {0}")]
    InvalidSchedule(String),

    /// Window lies past the last bounded band of the schedule
    #[error("Window {index} (ending at sample {end_sample}) is not covered by the label schedule")]
    Unlabeled { index: usize, end_sample: u64 },
}
