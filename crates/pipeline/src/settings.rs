//! Pipeline Configuration
//!
//! Defaults reproduce the test-rig session. A TOML file and `VIBE__`-prefixed
//! environment variables override them, e.g. `VIBE__WORKERS=4` or
//! `VIBE__SEGMENTER__WINDOW_LEN=6400`.

use crate::error::PipelineError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use data_validator::{ValidationConfig, DEFAULT_COLUMN};
use feature_engine::ExtractorConfig;
use segmenter::SegmenterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "VIBE";

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub segmenter: SegmenterConfig,
    pub extractor: ExtractorConfig,
    pub validation: ValidationConfig,
    /// Input column holding acceleration samples
    pub input_column: String,
    /// Extraction threads (0 = one per core)
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            segmenter: SegmenterConfig::default(),
            extractor: ExtractorConfig::default(),
            validation: ValidationConfig::default(),
            input_column: DEFAULT_COLUMN.to_string(),
            workers: 0,
        }
    }
}

impl PipelineConfig {
    /// Load defaults, then the optional TOML file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        Self::finish(builder)
    }

    /// Parse TOML text, with environment overrides applied on top
    pub fn from_toml(text: &str) -> Result<Self, PipelineError> {
        Self::finish(Config::builder().add_source(File::from_str(text, FileFormat::Toml)))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, PipelineError> {
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
