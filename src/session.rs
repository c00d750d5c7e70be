//! Analysis sessions
//!
//! Every ingestion produces a fresh session value holding the dataset(s) and
//! their grouped summaries. A new upload builds a new session; nothing is
//! updated in place. Metrics are recomputed on demand from the held records.

use crate::comparison::ComparisonReport;
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::filter::NameFilter;
use crate::grouping::group;
use crate::ingest::{CsvRecordParser, RecordParser};
use crate::metrics::{compute_metrics_with_top_n, SingleDatasetMetrics};
use crate::record::{SubjectSummary, TimedOperationRecord};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a result file into a dataset labelled by its version column
pub fn load_dataset(path: &Path, config: &AnalysisConfig) -> Result<Dataset> {
    let parser = CsvRecordParser::new(config.ingest.clone());
    let records = parser
        .parse_file(path)
        .with_context(|| format!("Failed to load results from {}", path.display()))?;
    Dataset::from_records(records)
        .with_context(|| format!("Invalid results in {}", path.display()))
}

/// Single-dataset session
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    source: String,
    dataset: Dataset,
    summaries: Vec<SubjectSummary>,
}

impl AnalysisSession {
    /// Build a session from an already validated dataset
    pub fn new(source: impl Into<String>, dataset: Dataset) -> Self {
        let summaries = group(&dataset);
        Self {
            source: source.into(),
            dataset,
            summaries,
        }
    }

    /// Ingest a file and build a session for it
    pub fn from_file(path: &Path, config: &AnalysisConfig) -> Result<Self> {
        let dataset = load_dataset(path, config)?;
        Ok(Self::new(path.display().to_string(), dataset))
    }

    /// Name of the file (or other source) the records came from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Per-subject summaries, in first-seen order
    pub fn summaries(&self) -> &[SubjectSummary] {
        &self.summaries
    }

    /// Descriptive statistics for the whole dataset
    pub fn metrics(&self, config: &AnalysisConfig) -> SingleDatasetMetrics {
        compute_metrics_with_top_n(&self.dataset, config.top_n)
    }

    /// Records whose name matches the filter
    pub fn search(&self, filter: &NameFilter) -> Vec<&TimedOperationRecord> {
        filter.apply(self.dataset.records())
    }
}

/// Two-dataset session: baseline (A) against candidate (B)
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    baseline: AnalysisSession,
    candidate: AnalysisSession,
}

impl ComparisonSession {
    pub fn new(baseline: AnalysisSession, candidate: AnalysisSession) -> Self {
        Self {
            baseline,
            candidate,
        }
    }

    /// Ingest both files and build the session
    pub fn from_files(baseline: &Path, candidate: &Path, config: &AnalysisConfig) -> Result<Self> {
        Ok(Self::new(
            AnalysisSession::from_file(baseline, config)?,
            AnalysisSession::from_file(candidate, config)?,
        ))
    }

    pub fn baseline(&self) -> &AnalysisSession {
        &self.baseline
    }

    pub fn candidate(&self) -> &AnalysisSession {
        &self.candidate
    }

    /// Replace the candidate side, keeping the baseline
    pub fn with_candidate(self, candidate: AnalysisSession) -> Self {
        Self {
            baseline: self.baseline,
            candidate,
        }
    }

    /// Compare the two datasets; `None` when either one is empty
    pub fn compare(&self, config: &AnalysisConfig, filter: &NameFilter) -> Option<ComparisonReport> {
        ComparisonReport::build(
            self.baseline.dataset(),
            self.candidate.dataset(),
            &config.thresholds,
            filter,
        )
    }
}
