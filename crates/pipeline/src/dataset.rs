//! Feature Dataset and Export

use crate::error::PipelineError;
use feature_engine::{FeatureVector, COLUMNS, MODEL_INPUT_DIMENSION};
use segmenter::{ConditionLabel, SegmentReport, Window};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// One dataset row: the features of a window plus where it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Window position in the stream before filtering
    pub window_index: usize,
    pub end_sample: u64,
    pub label: ConditionLabel,
    pub features: FeatureVector,
}

impl FeatureRecord {
    pub fn new(window: &Window, features: FeatureVector) -> Self {
        Self {
            window_index: window.index(),
            end_sample: window.end_sample(),
            label: window.label(),
            features,
        }
    }
}

/// Output encoding for a dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Header row of column names, one row per window
    #[default]
    Csv,
    /// Array of objects keyed by column name
    Json,
    /// postcard-encoded `Vec<FeatureRecord>`
    Postcard,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "postcard" | "bin" => Ok(ExportFormat::Postcard),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Postcard => "postcard",
        };
        f.write_str(name)
    }
}

/// Ordered feature rows produced by one pipeline run
#[derive(Debug, Clone, Default)]
pub struct FeatureDataset {
    records: Vec<FeatureRecord>,
    report: SegmentReport,
}

impl FeatureDataset {
    pub fn new(records: Vec<FeatureRecord>, report: SegmentReport) -> Self {
        Self { records, report }
    }

    /// Rows in window order
    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    /// Segmentation counts behind this dataset
    pub fn report(&self) -> &SegmentReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows eligible for training (`real_normal == 1`)
    pub fn training_subset(&self) -> FeatureDataset {
        let records = self
            .records
            .iter()
            .filter(|r| r.features.labels.real_normal == 1)
            .cloned()
            .collect();
        Self::new(records, self.report)
    }

    /// Model-input projection of every row
    pub fn model_inputs(&self) -> Vec<[f64; MODEL_INPUT_DIMENSION]> {
        self.records.iter().map(|r| r.features.model_input()).collect()
    }

    /// Non-finite feature cells across all rows
    pub fn sentinel_count(&self) -> usize {
        self.records.iter().map(|r| r.features.sentinel_count()).sum()
    }

    /// Rows per condition
    pub fn label_counts(&self) -> BTreeMap<ConditionLabel, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.label).or_insert(0) += 1;
        }
        counts
    }

    /// Write the dataset in `format`
    pub fn export<W: Write>(&self, format: ExportFormat, mut writer: W) -> Result<(), PipelineError> {
        match format {
            ExportFormat::Csv => self.write_csv(&mut writer)?,
            ExportFormat::Json => serde_json::to_writer(&mut writer, &self.to_json())?,
            ExportFormat::Postcard => writer.write_all(&self.to_postcard()?)?,
        }
        writer.flush()?;
        Ok(())
    }

    /// CSV with a [`COLUMNS`] header. Non-finite cells are written as `NaN`/`inf`.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", COLUMNS.join(","))?;
        for record in &self.records {
            let row = record.features.to_row();
            let mut line = String::with_capacity(row.len() * 12);
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    line.push(',');
                }
                line.push_str(&value.to_string());
            }
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }

    /// JSON array of row objects; non-finite cells become `null`
    pub fn to_json(&self) -> Value {
        let rows = self
            .records
            .iter()
            .map(|record| {
                let row: Map<String, Value> = COLUMNS
                    .iter()
                    .zip(record.features.to_row())
                    .map(|(name, value)| (name.to_string(), Value::from(value)))
                    .collect();
                Value::Object(row)
            })
            .collect();
        Value::Array(rows)
    }

    /// Compact binary encoding of the records
    pub fn to_postcard(&self) -> Result<Vec<u8>, PipelineError> {
        Ok(postcard::to_allocvec(&self.records)?)
    }

    /// Decode records written by [`FeatureDataset::to_postcard`]
    pub fn records_from_postcard(bytes: &[u8]) -> Result<Vec<FeatureRecord>, PipelineError> {
        Ok(postcard::from_bytes(bytes)?)
    }
}
