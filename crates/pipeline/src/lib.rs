//! Vibration Feature Pipeline
//!
//! Reads a raw acceleration recording, segments it into labeled windows,
//! extracts one feature row per window and exports the resulting dataset.

mod dataset;
mod error;
mod logging;
mod runner;
mod settings;

pub use dataset::{ExportFormat, FeatureDataset, FeatureRecord};
pub use error::PipelineError;
pub use logging::init_logging;
pub use runner::Pipeline;
pub use settings::{PipelineConfig, ENV_PREFIX};
