//! Stream Segmentation
//!
//! Single sequential scan: cut fixed-length windows, label each by the ordinal
//! of its last sample, drop excluded conditions, then drop exact duplicates.

use crate::error::SegmentError;
use crate::label::ConditionLabel;
use crate::schedule::LabelSchedule;
use crate::Window;
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tracing::{debug, info};

/// Samples per window (one second at 12.8 kHz)
pub const WINDOW_LEN: usize = 12_800;

/// Segmenter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Samples per window
    pub window_len: usize,
    /// Conditions treated as out-of-distribution and dropped
    pub excluded: Vec<ConditionLabel>,
    /// Cumulative-position label table
    pub schedule: LabelSchedule,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            window_len: WINDOW_LEN,
            excluded: vec![ConditionLabel::MisWarning, ConditionLabel::CaviFault],
            schedule: LabelSchedule::default(),
        }
    }
}

/// Counts gathered during one segmentation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    /// Complete windows cut from the stream
    pub windows_formed: usize,
    /// Trailing samples that did not fill a window
    pub tail_discarded: usize,
    /// Windows dropped for an excluded condition
    pub excluded: usize,
    /// Windows dropped as exact duplicates of an earlier window
    pub duplicates: usize,
}

/// Output of [`Segmenter::segment`]
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Surviving windows in stream order
    pub windows: Vec<Window>,
    pub report: SegmentReport,
}

/// Cuts a raw acceleration stream into labeled windows
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    /// Create a segmenter, rejecting a zero window length
    pub fn new(config: SegmenterConfig) -> Result<Self, SegmentError> {
        if config.window_len == 0 {
            return Err(SegmentError::ZeroWindowLength);
        }
        Ok(Self { config })
    }

    /// Segment a raw stream into labeled, filtered, deduplicated windows
    pub fn segment(&self, stream: &[f64]) -> Result<Segmentation, SegmentError> {
        let window_len = self.config.window_len;
        if stream.is_empty() {
            return Err(SegmentError::EmptyStream);
        }
        if stream.len() < window_len {
            return Err(SegmentError::TooShort {
                len: stream.len(),
                window_len,
            });
        }

        let chunks = stream.chunks_exact(window_len);
        let mut report = SegmentReport {
            tail_discarded: chunks.remainder().len(),
            ..Default::default()
        };

        let mut windows: Vec<Window> = Vec::with_capacity(stream.len() / window_len);
        // (label, fingerprint) -> positions in `windows` sharing that key
        let mut seen: HashMap<(ConditionLabel, u64), Vec<usize>> = HashMap::new();

        for (index, chunk) in chunks.enumerate() {
            report.windows_formed += 1;
            let end_sample = ((index + 1) * window_len) as u64;
            let label = self
                .config
                .schedule
                .label_for(end_sample)
                .ok_or(SegmentError::Unlabeled { index, end_sample })?;

            if self.config.excluded.contains(&label) {
                report.excluded += 1;
                continue;
            }

            let bucket = seen.entry((label, fingerprint(chunk))).or_default();
            if bucket.iter().any(|&pos| same_samples(windows[pos].samples(), chunk)) {
                debug!("Window {} ({}) duplicates an earlier window, dropped", index, label);
                report.duplicates += 1;
                continue;
            }

            bucket.push(windows.len());
            windows.push(Window::new(index, end_sample, label, chunk));
        }

        if report.tail_discarded > 0 {
            debug!("Discarded {} trailing samples", report.tail_discarded);
        }

        info!(
            "Segmented {} samples: formed={}, excluded={}, duplicates={}, kept={}",
            stream.len(),
            report.windows_formed,
            report.excluded,
            report.duplicates,
            windows.len()
        );

        counter!("segmenter_windows_formed_total").increment(report.windows_formed as u64);
        counter!("segmenter_windows_dropped_total", "reason" => "excluded")
            .increment(report.excluded as u64);
        counter!("segmenter_windows_dropped_total", "reason" => "duplicate")
            .increment(report.duplicates as u64);

        Ok(Segmentation { windows, report })
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            config: SegmenterConfig::default(),
        }
    }
}

/// Bit pattern used for duplicate detection: `-0.0` folds onto `0.0` and every
/// NaN payload onto one value, so NaN windows deduplicate like any other
fn canonical_bits(x: f64) -> u64 {
    if x == 0.0 {
        0
    } else if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

fn fingerprint(samples: &[f64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for &x in samples {
        canonical_bits(x).hash(&mut hasher);
    }
    hasher.finish()
}

fn same_samples(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(&x, &y)| canonical_bits(x) == canonical_bits(y))
}
