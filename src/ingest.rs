//! Decoding of uploaded result files into records
//!
//! The engines never see the tabular format; they receive records from a
//! [`RecordParser`]. The CSV parser expects the header row written by the test
//! harness:
//!
//! ```text
//! Page,Date,Computer Name,Version,Method,Time(Seconds)
//! Home_Load,2024-03-01 10:00,BUILD-07,2.4.0,Chrome,1.25
//! ```
//!
//! `Page` and `Time(Seconds)` are required; the other columns default to an
//! empty string when absent.

use crate::record::TimedOperationRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Column holding the operation name
pub const COL_PAGE: &str = "Page";
/// Column holding the timestamp
pub const COL_DATE: &str = "Date";
/// Column holding the machine name
pub const COL_MACHINE: &str = "Computer Name";
/// Column holding the version label
pub const COL_VERSION: &str = "Version";
/// Column holding the test method
pub const COL_METHOD: &str = "Method";
/// Column holding the elapsed seconds
pub const COL_TIME: &str = "Time(Seconds)";

/// Default maximum number of data rows accepted from one file
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Errors raised while decoding a result file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Missing value for '{column}' at line {line}")]
    MissingField { line: usize, column: String },

    #[error("Invalid duration '{value}' at line {line}: expected a finite number of seconds")]
    InvalidDuration { line: usize, value: String },

    #[error("Negative duration {value} at line {line}")]
    NegativeDuration { line: usize, value: f64 },

    #[error("Row limit exceeded: more than {limit} rows")]
    TooManyRows { limit: usize },

    #[error("Invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),
}

/// Result type for ingestion
pub type Result<T> = std::result::Result<T, ParseError>;

/// Turns raw file bytes into records
pub trait RecordParser {
    /// Decode a complete file
    fn parse(&self, bytes: &[u8]) -> Result<Vec<TimedOperationRecord>>;

    /// Read and decode a file from disk
    fn parse_file(&self, path: &Path) -> Result<Vec<TimedOperationRecord>> {
        let bytes = std::fs::read(path)?;
        let records = self.parse(&bytes)?;
        tracing::info!(path = %path.display(), records = records.len(), "ingested result file");
        Ok(records)
    }
}

/// CSV decoding options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Field delimiter
    pub delimiter: char,
    /// Maximum number of data rows
    pub max_rows: usize,
    /// Trim whitespace around every field
    pub trim: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            max_rows: DEFAULT_MAX_ROWS,
            trim: true,
        }
    }
}

/// CSV implementation of [`RecordParser`]
#[derive(Debug, Clone, Default)]
pub struct CsvRecordParser {
    config: IngestConfig,
}

/// Positions of the known columns in the header row
struct ColumnIndex {
    page: usize,
    time: usize,
    date: Option<usize>,
    machine: Option<usize>,
    version: Option<usize>,
    method: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        Ok(Self {
            page: find(COL_PAGE).ok_or_else(|| ParseError::MissingColumn(COL_PAGE.to_string()))?,
            time: find(COL_TIME).ok_or_else(|| ParseError::MissingColumn(COL_TIME.to_string()))?,
            date: find(COL_DATE),
            machine: find(COL_MACHINE),
            version: find(COL_VERSION),
            method: find(COL_METHOD),
        })
    }
}

impl CsvRecordParser {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    fn delimiter(&self) -> Result<u8> {
        let c = self.config.delimiter;
        if c.is_ascii() {
            Ok(c as u8)
        } else {
            Err(ParseError::InvalidDelimiter(c))
        }
    }
}

impl RecordParser for CsvRecordParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<TimedOperationRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter()?)
            .has_headers(true)
            .trim(if self.config.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(bytes);

        let headers = reader.headers().map_err(|e| ParseError::Csv {
            line: 1,
            message: e.to_string(),
        })?;
        let columns = ColumnIndex::from_headers(headers)?;

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let row = result.map_err(|e| ParseError::Csv {
                line: e.position().map_or(row_idx + 2, |p| p.line() as usize),
                message: e.to_string(),
            })?;

            // Blank lines carry no data
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            if records.len() >= self.config.max_rows {
                return Err(ParseError::TooManyRows {
                    limit: self.config.max_rows,
                });
            }

            let line = row.position().map_or(row_idx + 2, |p| p.line() as usize);
            records.push(decode_row(&row, &columns, line)?);
        }

        tracing::debug!(rows = records.len(), "decoded CSV rows");
        Ok(records)
    }
}

fn decode_row(
    row: &csv::StringRecord,
    columns: &ColumnIndex,
    line: usize,
) -> Result<TimedOperationRecord> {
    let optional = |idx: Option<usize>| {
        idx.and_then(|i| row.get(i))
            .unwrap_or_default()
            .to_string()
    };

    let operation_name = row.get(columns.page).unwrap_or_default();
    if operation_name.trim().is_empty() {
        return Err(ParseError::MissingField {
            line,
            column: COL_PAGE.to_string(),
        });
    }

    let raw_time = row.get(columns.time).unwrap_or_default().trim();
    if raw_time.is_empty() {
        return Err(ParseError::MissingField {
            line,
            column: COL_TIME.to_string(),
        });
    }

    Ok(TimedOperationRecord {
        operation_name: operation_name.to_string(),
        timestamp: optional(columns.date),
        machine_name: optional(columns.machine),
        version: optional(columns.version),
        method: optional(columns.method),
        elapsed_seconds: parse_seconds(raw_time, line)?,
    })
}

/// Parse an elapsed-seconds field; must be finite and non-negative
pub fn parse_seconds(raw: &str, line: usize) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|_| ParseError::InvalidDuration {
        line,
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(ParseError::InvalidDuration {
            line,
            value: raw.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ParseError::NegativeDuration { line, value });
    }

    Ok(value)
}
