//! Record model shared by the grouping, metrics and comparison engines
//!
//! An operation name is structured as `<subject>_<rest>`; the rest carries a
//! case-sensitive phase marker (`Load`, `Run` or `Save`) as a plain substring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the subject identifier and the rest of an operation name
pub const SUBJECT_DELIMITER: char = '_';

/// One timed operation observation (one row of an uploaded result file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedOperationRecord {
    /// Operation name, e.g. `Home_Load`
    pub operation_name: String,
    /// Free-form timestamp as recorded by the test harness
    pub timestamp: String,
    /// Machine the test ran on
    pub machine_name: String,
    /// Build/version label of the dataset
    pub version: String,
    /// Test method (not used by aggregation)
    pub method: String,
    /// Elapsed wall-clock time in seconds
    pub elapsed_seconds: f64,
}

impl TimedOperationRecord {
    /// Create a record with only a name and a duration; other fields empty
    pub fn new(operation_name: impl Into<String>, elapsed_seconds: f64) -> Self {
        Self {
            operation_name: operation_name.into(),
            timestamp: String::new(),
            machine_name: String::new(),
            version: String::new(),
            method: String::new(),
            elapsed_seconds,
        }
    }

    /// Set the version label
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Subject identifier: everything before the first `_`
    ///
    /// A name without a delimiter is its own subject.
    pub fn subject_id(&self) -> &str {
        subject_of(&self.operation_name)
    }

    /// Phase by marker priority (Load, Run, Save)
    pub fn phase(&self) -> Option<Phase> {
        Phase::classify(&self.operation_name)
    }

    /// Whether the operation name carries the given marker anywhere
    pub fn has_marker(&self, phase: Phase) -> bool {
        phase.matches(&self.operation_name)
    }
}

/// Subject identifier of an operation name
pub fn subject_of(operation_name: &str) -> &str {
    operation_name
        .split(SUBJECT_DELIMITER)
        .next()
        .unwrap_or(operation_name)
}

/// Test phase inferred from a substring marker in the operation name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Load,
    Run,
    Save,
}

impl Phase {
    /// All phases in classification priority order
    pub const ALL: [Phase; 3] = [Phase::Load, Phase::Run, Phase::Save];

    /// Case-sensitive marker searched for in operation names
    pub fn marker(self) -> &'static str {
        match self {
            Phase::Load => "Load",
            Phase::Run => "Run",
            Phase::Save => "Save",
        }
    }

    /// Plain substring test, no word boundaries
    pub fn matches(self, operation_name: &str) -> bool {
        operation_name.contains(self.marker())
    }

    /// First phase whose marker appears in the name, tested Load, Run, Save
    ///
    /// `ReloadRun` is a Load operation.
    pub fn classify(operation_name: &str) -> Option<Phase> {
        Self::ALL.into_iter().find(|p| p.matches(operation_name))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Phase column of the paired-test table; sorts Load < Run < Save < Unclassified
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseClass {
    Load,
    Run,
    Save,
    Unclassified,
}

impl From<Option<Phase>> for PhaseClass {
    fn from(phase: Option<Phase>) -> Self {
        match phase {
            Some(Phase::Load) => PhaseClass::Load,
            Some(Phase::Run) => PhaseClass::Run,
            Some(Phase::Save) => PhaseClass::Save,
            None => PhaseClass::Unclassified,
        }
    }
}

impl fmt::Display for PhaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PhaseClass::Load => "Load",
            PhaseClass::Run => "Run",
            PhaseClass::Save => "Save",
            PhaseClass::Unclassified => "unclassified",
        };
        f.write_str(label)
    }
}

/// Per-subject summary of phase timings
///
/// Each phase field holds the last matching record seen for the subject;
/// repeated records for the same phase overwrite rather than accumulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub subject_id: String,
    pub load_time: f64,
    pub run_time: f64,
    pub save_time: f64,
}

impl SubjectSummary {
    /// New summary with all phases at zero
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            load_time: 0.0,
            run_time: 0.0,
            save_time: 0.0,
        }
    }

    /// Time recorded for a phase
    pub fn time(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Load => self.load_time,
            Phase::Run => self.run_time,
            Phase::Save => self.save_time,
        }
    }

    /// Overwrite the time recorded for a phase
    pub fn set_time(&mut self, phase: Phase, seconds: f64) {
        match phase {
            Phase::Load => self.load_time = seconds,
            Phase::Run => self.run_time = seconds,
            Phase::Save => self.save_time = seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_id_prefix() {
        let record = TimedOperationRecord::new("Home_Load_Cold", 1.0);
        assert_eq!(record.subject_id(), "Home");
    }

    #[test]
    fn test_subject_id_without_delimiter() {
        let record = TimedOperationRecord::new("Checkout", 1.0);
        assert_eq!(record.subject_id(), "Checkout");
    }

    #[test]
    fn test_subject_id_leading_delimiter() {
        assert_eq!(subject_of("_Load"), "");
    }

    #[test]
    fn test_phase_priority_load_before_run() {
        assert_eq!(Phase::classify("ReloadRun"), Some(Phase::Load));
        assert_eq!(Phase::classify("Page_RunSave"), Some(Phase::Run));
        assert_eq!(Phase::classify("Page_Save"), Some(Phase::Save));
    }

    #[test]
    fn test_phase_markers_case_sensitive() {
        assert_eq!(Phase::classify("home_load"), None);
        assert_eq!(Phase::classify("Home_LOAD"), None);
    }

    #[test]
    fn test_has_marker_ignores_priority() {
        let record = TimedOperationRecord::new("ReloadRun", 1.0);
        assert!(record.has_marker(Phase::Load));
        assert!(record.has_marker(Phase::Run));
        assert!(!record.has_marker(Phase::Save));
    }

    #[test]
    fn test_phase_class_ordering() {
        assert!(PhaseClass::Load < PhaseClass::Run);
        assert!(PhaseClass::Run < PhaseClass::Save);
        assert!(PhaseClass::Save < PhaseClass::Unclassified);
        assert_eq!(PhaseClass::from(None), PhaseClass::Unclassified);
    }

    #[test]
    fn test_summary_set_time_overwrites() {
        let mut summary = SubjectSummary::new("Home");
        summary.set_time(Phase::Load, 1.0);
        summary.set_time(Phase::Load, 9.0);
        assert_eq!(summary.time(Phase::Load), 9.0);
        assert_eq!(summary.run_time, 0.0);
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        let json = serde_json::to_string(&PhaseClass::Unclassified).unwrap();
        assert_eq!(json, "\"unclassified\"");
    }
}
