//! Pipeline Runner
//!
//! Segmentation is one sequential pass; extraction fans out over a rayon pool
//! and collects back in window order.

use crate::settings::PipelineConfig;
use crate::dataset::{FeatureDataset, FeatureRecord};
use crate::error::PipelineError;
use data_validator::{ValidationResult, Validator};
use feature_engine::FeatureExtractor;
use metrics::counter;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use segmenter::{Segmentation, Segmenter};
use std::time::Instant;
use tracing::{info, warn};

/// Raw stream to feature dataset
pub struct Pipeline {
    validator: Validator,
    segmenter: Segmenter,
    extractor: FeatureExtractor,
    pool: ThreadPool,
}

impl Pipeline {
    /// Build every stage up front so a bad config fails before any data is read
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let segmenter = Segmenter::new(config.segmenter.clone())?;
        let extractor = FeatureExtractor::new(config.extractor, config.segmenter.window_len)?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("extract-{i}"))
            .build()
            .map_err(|e| PipelineError::WorkerPool(e.to_string()))?;

        info!(
            "Pipeline ready: window_len={}, workers={}, excluded={:?}",
            config.segmenter.window_len,
            pool.current_num_threads(),
            config.segmenter.excluded
        );

        Ok(Self {
            validator: Validator::new(config.validation.clone()),
            segmenter,
            extractor,
            pool,
        })
    }

    /// Check every sample, reporting a bounded list of the bad ones
    pub fn validate(&self, stream: &[f64]) -> ValidationResult {
        self.validator.validate_stream(stream)
    }

    /// Validate, segment and extract features from a raw acceleration stream
    pub fn run(&self, stream: &[f64]) -> Result<FeatureDataset, PipelineError> {
        let start = Instant::now();
        self.validator.check_stream(stream)?;

        let Segmentation { windows, report } = self.segmenter.segment(stream)?;

        let records = self.pool.install(|| {
            windows
                .par_iter()
                .map(|window| {
                    self.extractor
                        .extract(window)
                        .map(|features| FeatureRecord::new(window, features))
                        .map_err(|source| PipelineError::Extraction {
                            index: window.index(),
                            source,
                        })
                })
                .collect::<Result<Vec<_>, _>>()
        })?;

        counter!("pipeline_windows_extracted_total").increment(records.len() as u64);

        let dataset = FeatureDataset::new(records, report);
        let sentinels = dataset.sentinel_count();
        if sentinels > 0 {
            counter!("pipeline_sentinel_values_total").increment(sentinels as u64);
            warn!("{} feature values are NaN or infinite", sentinels);
        }

        info!(
            "Extracted {} feature rows in {}ms",
            dataset.len(),
            start.elapsed().as_millis()
        );
        Ok(dataset)
    }
}
