//! JSON output format for analysis and comparison reports
//!
//! Non-finite numbers (undefined percentage differences) serialize as `null`.

use crate::comparison::ComparisonReport;
use crate::metrics::SingleDatasetMetrics;
use crate::record::{SubjectSummary, TimedOperationRecord};
use crate::session::AnalysisSession;
use serde::Serialize;

const FORMAT_NAME: &str = "perfcmp-json-v1";

/// Single-dataset analysis payload
#[derive(Debug, Clone, Serialize)]
pub struct JsonAnalysis {
    /// Where the records came from
    pub source: String,
    /// Dataset version label
    pub label: String,
    pub metrics: SingleDatasetMetrics,
    pub summaries: Vec<SubjectSummary>,
    /// Records matching the search term (if one was given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<TimedOperationRecord>>,
}

/// Report body
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum JsonReport {
    Analysis(JsonAnalysis),
    Comparison(ComparisonReport),
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Crate version that produced the output
    pub version: String,
    /// Format name
    pub format: String,
    pub report: JsonReport,
}

impl JsonOutput {
    fn wrap(report: JsonReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: FORMAT_NAME.to_string(),
            report,
        }
    }

    /// Wrap a single-dataset analysis
    pub fn analysis(
        session: &AnalysisSession,
        metrics: SingleDatasetMetrics,
        matches: Option<Vec<&TimedOperationRecord>>,
    ) -> Self {
        Self::wrap(JsonReport::Analysis(JsonAnalysis {
            source: session.source().to_string(),
            label: session.dataset().label().to_string(),
            metrics,
            summaries: session.summaries().to_vec(),
            matches: matches.map(|m| m.into_iter().cloned().collect()),
        }))
    }

    /// Wrap a comparison report
    pub fn comparison(report: ComparisonReport) -> Self {
        Self::wrap(JsonReport::Comparison(report))
    }

    /// Serialize to pretty JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
