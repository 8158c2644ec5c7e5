//! Vibration Stream Segmenter
//!
//! Cuts a raw single-channel acceleration stream into fixed-length windows and
//! tags each with the machine condition recorded at that point of the session.

mod error;
mod label;
mod schedule;
mod segmenter;

pub use error::SegmentError;
pub use label::{ConditionLabel, LabelError};
pub use schedule::{LabelBand, LabelSchedule};
pub use segmenter::{SegmentReport, Segmentation, Segmenter, SegmenterConfig, WINDOW_LEN};

/// Fixed-length, labeled slice of the raw stream
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    index: usize,
    end_sample: u64,
    label: ConditionLabel,
    samples: Box<[f64]>,
}

impl Window {
    pub(crate) fn new(index: usize, end_sample: u64, label: ConditionLabel, samples: &[f64]) -> Self {
        Self {
            index,
            end_sample,
            label,
            samples: samples.into(),
        }
    }

    /// Position of the window in the stream before filtering
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based ordinal of the window's last sample within the stream
    pub fn end_sample(&self) -> u64 {
        self.end_sample
    }

    pub fn label(&self) -> ConditionLabel {
        self.label
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
