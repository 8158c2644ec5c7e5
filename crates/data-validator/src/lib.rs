//! Raw Stream Ingestion and Validation
//!
//! Reads the single acceleration column of a recording and checks that every
//! sample is usable before segmentation.

mod error;
mod reader;
mod validator;

pub use error::ValidationError;
pub use reader::{SampleReader, DEFAULT_COLUMN};
pub use validator::{ValidationConfig, ValidationResult, Validator};
