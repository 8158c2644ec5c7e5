//! Acceleration Column Reader

use crate::error::ValidationError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Column holding the acceleration samples in a recording export
pub const DEFAULT_COLUMN: &str = "accel";

/// Reads one numeric column from delimited text, one sample per row
#[derive(Debug, Clone)]
pub struct SampleReader {
    column: String,
    delimiter: char,
}

impl SampleReader {
    /// Reader selecting `column` when the header has several columns
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            delimiter: ',',
        }
    }

    /// Use a different field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read all samples from a file
    pub fn read_path(&self, path: &Path) -> Result<Vec<f64>, ValidationError> {
        let file = File::open(path)?;
        let samples = self.read(BufReader::new(file))?;
        info!("Read {} samples from {}", samples.len(), path.display());
        Ok(samples)
    }

    /// Read all samples from a buffered source
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Vec<f64>, ValidationError> {
        let mut samples = Vec::new();
        let mut column: Option<usize> = None;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let fields: Vec<&str> = trimmed.split(self.delimiter).map(str::trim).collect();

            let idx = match column {
                Some(idx) => idx,
                None => {
                    let is_header = fields.iter().any(|f| f.parse::<f64>().is_err());
                    let idx = self.select_column(&fields, is_header, line_no)?;
                    column = Some(idx);
                    if is_header {
                        debug!("Header on line {}, using column {}", line_no, idx);
                        continue;
                    }
                    idx
                }
            };

            let field = fields.get(idx).ok_or_else(|| {
                ValidationError::InvalidFormat(format!(
                    "line {}: expected at least {} columns, found {}",
                    line_no,
                    idx + 1,
                    fields.len()
                ))
            })?;

            let value = field.parse::<f64>().map_err(|_| {
                ValidationError::InvalidFormat(format!("line {}: {:?} is not a number", line_no, field))
            })?;
            samples.push(value);
        }

        Ok(samples)
    }

    fn select_column(
        &self,
        fields: &[&str],
        is_header: bool,
        line_no: usize,
    ) -> Result<usize, ValidationError> {
        if fields.len() == 1 {
            return Ok(0);
        }
        if !is_header {
            return Err(ValidationError::InvalidFormat(format!(
                "line {}: {} columns but no header to pick {:?} from",
                line_no,
                fields.len(),
                self.column
            )));
        }
        fields
            .iter()
            .position(|f| f.eq_ignore_ascii_case(&self.column))
            .ok_or_else(|| ValidationError::MissingField(self.column.clone()))
    }
}

impl Default for SampleReader {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<Vec<f64>, ValidationError> {
        SampleReader::default().read(Cursor::new(text))
    }

    #[test]
    fn test_bare_column() {
        assert_eq!(read("1.5\n-2\n\n3e-2\n").unwrap(), vec![1.5, -2.0, 0.03]);
    }

    #[test]
    fn test_single_header_column() {
        assert_eq!(read("acceleration\n0.1\n0.2\n").unwrap(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_named_column_from_wide_export() {
        let text = "time,accel,temp\n0,0.5,30\n1,-0.25,30\n";
        assert_eq!(read(text).unwrap(), vec![0.5, -0.25]);
    }

    #[test]
    fn test_custom_delimiter_and_column() {
        let reader = SampleReader::new("ch1").with_delimiter(';');
        let samples = reader.read(Cursor::new("ch0;ch1\n1;2\n3;4\n")).unwrap();
        assert_eq!(samples, vec![2.0, 4.0]);
    }

    #[test]
    fn test_missing_column() {
        let err = read("time,temp\n0,30\n").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("accel".into()));
    }

    #[test]
    fn test_bad_value_names_line() {
        let err = read("accel\n0.1\nabc\n").unwrap_err();
        match err {
            ValidationError::InvalidFormat(msg) => assert!(msg.starts_with("line 3")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_row() {
        let err = read("time,accel\n0,1\n5\n").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat(_)));
    }

    #[test]
    fn test_wide_rows_without_header() {
        assert!(read("1,2\n3,4\n").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(read("").unwrap().is_empty());
    }
}
