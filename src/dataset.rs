//! Validated record sets
//!
//! A `Dataset` is the unit the engines work on: one uploaded result file,
//! labelled with its build/version. Construction rejects records whose
//! duration is not a finite, non-negative number, so nothing downstream ever
//! sees NaN or infinity coming from input.

use crate::record::TimedOperationRecord;
use serde::Serialize;
use thiserror::Error;

/// Label used when a dataset carries no version
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Errors raised while constructing a dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("Record {index} ({name}) has a non-finite duration")]
    NonFiniteDuration { index: usize, name: String },

    #[error("Record {index} ({name}) has a negative duration: {value}")]
    NegativeDuration {
        index: usize,
        name: String,
        value: f64,
    },
}

/// Result type for dataset construction
pub type Result<T> = std::result::Result<T, DatasetError>;

/// A labelled, validated sequence of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    label: String,
    records: Vec<TimedOperationRecord>,
}

impl Dataset {
    /// Build a dataset with an explicit label
    pub fn new(label: impl Into<String>, records: Vec<TimedOperationRecord>) -> Result<Self> {
        validate_records(&records)?;
        let label = label.into();

        tracing::debug!(label = %label, records = records.len(), "dataset loaded");

        Ok(Self { label, records })
    }

    /// Build a dataset labelled by the version of its first record
    ///
    /// Falls back to `"Unknown"` when the dataset is empty or the first
    /// record has a blank version.
    pub fn from_records(records: Vec<TimedOperationRecord>) -> Result<Self> {
        let label = version_label(&records);
        Self::new(label, records)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn records(&self) -> &[TimedOperationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Check every record's duration is finite and non-negative
pub fn validate_records(records: &[TimedOperationRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        let value = record.elapsed_seconds;
        if !value.is_finite() {
            return Err(DatasetError::NonFiniteDuration {
                index,
                name: record.operation_name.clone(),
            });
        }
        if value < 0.0 {
            return Err(DatasetError::NegativeDuration {
                index,
                name: record.operation_name.clone(),
                value,
            });
        }
    }
    Ok(())
}

/// Version label taken from the first record
pub fn version_label(records: &[TimedOperationRecord]) -> String {
    records
        .first()
        .map(|r| r.version.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_LABEL)
        .to_string()
}
