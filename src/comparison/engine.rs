// Two-dataset comparison: totals, counts, differences and the final report
//
// Dataset A is the baseline, dataset B the candidate. Differences are the
// percentage change of B relative to A; a zero baseline total leaves the
// difference non-finite and its severity undefined.

use crate::comparison::config::SeverityThresholds;
use crate::comparison::join::{degradations, paired_tests, phase_series, PairedTest, SeriesPoint};
use crate::comparison::severity::{classify, percent_change, Severity};
use crate::dataset::Dataset;
use crate::filter::NameFilter;
use crate::metrics::{phase_total, total_duration, PhaseCounts};
use crate::record::{Phase, TimedOperationRecord};
use serde::Serialize;

/// Overall and per-phase time totals of one dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DatasetTotals {
    pub total_time: f64,
    pub load_time: f64,
    pub run_time: f64,
    pub save_time: f64,
}

impl DatasetTotals {
    /// Sum all records and each phase's marker subset
    pub(crate) fn from_records(records: &[TimedOperationRecord]) -> Self {
        Self {
            total_time: total_duration(records),
            load_time: phase_total(records, Phase::Load),
            run_time: phase_total(records, Phase::Run),
            save_time: phase_total(records, Phase::Save),
        }
    }

    /// Total for one phase
    pub fn phase(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Load => self.load_time,
            Phase::Run => self.run_time,
            Phase::Save => self.save_time,
        }
    }
}

/// Percentage change of the candidate relative to the baseline
///
/// Each value is rounded to 2 decimals and may be non-finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Differences {
    pub total_time: f64,
    pub load_time: f64,
    pub save_time: f64,
}

impl Differences {
    fn between(a: &DatasetTotals, b: &DatasetTotals) -> Self {
        Self {
            total_time: percent_change(a.total_time, b.total_time),
            load_time: percent_change(a.load_time, b.load_time),
            save_time: percent_change(a.save_time, b.save_time),
        }
    }
}

/// Per-phase flags raised when the two datasets have different test counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountMismatch {
    pub load: bool,
    pub run: bool,
    pub save: bool,
}

impl CountMismatch {
    fn between(a: &PhaseCounts, b: &PhaseCounts) -> Self {
        Self {
            load: a.load != b.load,
            run: a.run != b.run,
            save: a.save != b.save,
        }
    }

    /// Flag for one phase
    pub fn get(&self, phase: Phase) -> bool {
        match phase {
            Phase::Load => self.load,
            Phase::Run => self.run,
            Phase::Save => self.save,
        }
    }

    /// Whether any phase is mismatched
    pub fn any(&self) -> bool {
        self.load || self.run || self.save
    }
}

/// Aggregates and paired table for a baseline/candidate pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMetrics {
    pub totals_a: DatasetTotals,
    pub totals_b: DatasetTotals,
    pub counts_a: PhaseCounts,
    pub counts_b: PhaseCounts,
    pub differences: Differences,
    pub count_mismatch: CountMismatch,
    pub paired_tests: Vec<PairedTest>,
}

impl ComparisonMetrics {
    /// Absolute change of the overall total in seconds
    pub fn total_delta(&self) -> f64 {
        self.totals_b.total_time - self.totals_a.total_time
    }
}

/// Compare a baseline dataset against a candidate
///
/// Both sides are [`Dataset`]s, so totals and percentages are never fed a
/// NaN or infinite duration. Returns `None` when either side is empty;
/// callers must check before use.
///
/// # Example
/// ```
/// use perfcmp::comparison::compare;
/// use perfcmp::dataset::Dataset;
/// use perfcmp::record::TimedOperationRecord;
///
/// let a = Dataset::from_records(vec![TimedOperationRecord::new("Login_Load", 2.0)]).unwrap();
/// let b = Dataset::from_records(vec![TimedOperationRecord::new("Login_Load", 3.0)]).unwrap();
/// let empty = Dataset::from_records(vec![]).unwrap();
///
/// let metrics = compare(&a, &b).unwrap();
/// assert_eq!(metrics.differences.load_time, 50.0);
/// assert!(compare(&empty, &b).is_none());
/// ```
pub fn compare(baseline: &Dataset, candidate: &Dataset) -> Option<ComparisonMetrics> {
    if baseline.is_empty() || candidate.is_empty() {
        tracing::debug!(
            baseline = baseline.len(),
            candidate = candidate.len(),
            "comparison skipped, a dataset is empty"
        );
        return None;
    }

    let totals_a = DatasetTotals::from_records(baseline.records());
    let totals_b = DatasetTotals::from_records(candidate.records());
    let counts_a = PhaseCounts::from_records(baseline.records());
    let counts_b = PhaseCounts::from_records(candidate.records());
    let paired = paired_tests(baseline, candidate);

    tracing::debug!(
        baseline = baseline.len(),
        candidate = candidate.len(),
        paired = paired.len(),
        "joined datasets by operation name"
    );

    Some(ComparisonMetrics {
        differences: Differences::between(&totals_a, &totals_b),
        count_mismatch: CountMismatch::between(&counts_a, &counts_b),
        totals_a,
        totals_b,
        counts_a,
        counts_b,
        paired_tests: paired,
    })
}

/// Severity of each difference; `None` where the difference is non-finite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifferenceSeverities {
    pub total_time: Option<Severity>,
    pub load_time: Option<Severity>,
    pub save_time: Option<Severity>,
}

impl DifferenceSeverities {
    /// Classify every difference against the thresholds
    pub fn classify(differences: &Differences, thresholds: &SeverityThresholds) -> Self {
        Self {
            total_time: classify(differences.total_time, thresholds),
            load_time: classify(differences.load_time, thresholds),
            save_time: classify(differences.save_time, thresholds),
        }
    }

    /// Whether any difference is critical
    pub fn any_critical(&self) -> bool {
        [self.total_time, self.load_time, self.save_time]
            .iter()
            .any(|s| *s == Some(Severity::Critical))
    }
}

/// Per-phase comparison series
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhaseSeries {
    pub load: Vec<SeriesPoint>,
    pub run: Vec<SeriesPoint>,
    pub save: Vec<SeriesPoint>,
}

impl PhaseSeries {
    /// Series for one phase
    pub fn get(&self, phase: Phase) -> &[SeriesPoint] {
        match phase {
            Phase::Load => &self.load,
            Phase::Run => &self.run,
            Phase::Save => &self.save,
        }
    }
}

/// Everything the reporting surface needs about a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub baseline_label: String,
    pub candidate_label: String,
    pub metrics: ComparisonMetrics,
    pub severities: DifferenceSeverities,
    /// Raised when any of the overall, load or save differences is critical
    pub significant_deviation: bool,
    pub degradations: Vec<PairedTest>,
    pub series: PhaseSeries,
    pub thresholds: SeverityThresholds,
}

impl ComparisonReport {
    /// Compare two datasets and classify the result
    ///
    /// `filter` narrows the per-phase series only; totals, counts and the
    /// paired table always cover the full datasets. Returns `None` when either
    /// dataset is empty.
    pub fn build(
        baseline: &Dataset,
        candidate: &Dataset,
        thresholds: &SeverityThresholds,
        filter: &NameFilter,
    ) -> Option<Self> {
        let metrics = compare(baseline, candidate)?;
        let severities = DifferenceSeverities::classify(&metrics.differences, thresholds);
        let significant_deviation = severities.any_critical();

        if significant_deviation {
            tracing::info!(
                baseline = baseline.label(),
                candidate = candidate.label(),
                total = metrics.differences.total_time,
                load = metrics.differences.load_time,
                save = metrics.differences.save_time,
                "significant deviation between datasets"
            );
        }
        if metrics.count_mismatch.any() {
            tracing::warn!(
                mismatch = ?metrics.count_mismatch,
                "datasets cover different test sets"
            );
        }

        let series = PhaseSeries {
            load: phase_series(baseline, candidate, Phase::Load, filter),
            run: phase_series(baseline, candidate, Phase::Run, filter),
            save: phase_series(baseline, candidate, Phase::Save, filter),
        };

        Some(Self {
            baseline_label: baseline.label().to_string(),
            candidate_label: candidate.label().to_string(),
            degradations: degradations(&metrics.paired_tests),
            metrics,
            severities,
            significant_deviation,
            series,
            thresholds: *thresholds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dataset::DatasetError;

    fn rec(name: &str, secs: f64) -> TimedOperationRecord {
        TimedOperationRecord::new(name, secs)
    }

    fn dataset(records: Vec<TimedOperationRecord>) -> Dataset {
        Dataset::from_records(records).unwrap()
    }

    #[test]
    fn test_compare_empty_side_is_none() {
        let b = dataset(vec![rec("A_Load", 1.0)]);
        let empty = dataset(vec![]);
        assert!(compare(&empty, &b).is_none());
        assert!(compare(&b, &empty).is_none());
        assert!(compare(&empty, &empty).is_none());
    }

    #[test]
    fn test_compare_login_load_scenario() {
        let a = dataset(vec![rec("Login_Load", 2.0)]);
        let b = dataset(vec![rec("Login_Load", 3.0)]);
        let metrics = compare(&a, &b).unwrap();

        assert_eq!(metrics.totals_a.load_time, 2.0);
        assert_eq!(metrics.totals_b.load_time, 3.0);
        assert_eq!(metrics.differences.load_time, 50.0);
        assert_eq!(metrics.differences.total_time, 50.0);
        assert_eq!(metrics.paired_tests[0].delta, 1.0);

        let severities =
            DifferenceSeverities::classify(&metrics.differences, &SeverityThresholds::default());
        assert_eq!(severities.load_time, Some(Severity::Critical));
        assert!(severities.any_critical());
    }

    #[test]
    fn test_compare_zero_save_total_is_undefined() {
        let a = dataset(vec![rec("A_Load", 2.0)]);
        let b = dataset(vec![rec("A_Load", 2.0), rec("A_Save", 1.0)]);
        let metrics = compare(&a, &b).unwrap();
        assert!(metrics.differences.save_time.is_infinite());

        let severities =
            DifferenceSeverities::classify(&metrics.differences, &SeverityThresholds::default());
        assert_eq!(severities.save_time, None);
        assert_eq!(severities.load_time, Some(Severity::Ok));
    }

    #[test]
    fn test_count_mismatch_per_phase() {
        let a = dataset(vec![
            rec("A_Load", 1.0),
            rec("B_Load", 1.0),
            rec("C_Load", 1.0),
            rec("A_Run", 1.0),
        ]);
        let b = dataset(vec![rec("A_Load", 1.0), rec("B_Load", 1.0), rec("A_Run", 1.0)]);
        let metrics = compare(&a, &b).unwrap();
        assert!(metrics.count_mismatch.load);
        assert!(!metrics.count_mismatch.run);
        assert!(!metrics.count_mismatch.save);
        assert!(metrics.count_mismatch.any());
    }

    #[test]
    fn test_total_delta_absolute() {
        let a = dataset(vec![rec("A_Load", 1.0), rec("A_Run", 2.0)]);
        let b = dataset(vec![rec("A_Load", 1.5), rec("A_Run", 2.0)]);
        let metrics = compare(&a, &b).unwrap();
        assert_eq!(metrics.total_delta(), 0.5);
    }

    #[test]
    fn test_run_difference_not_part_of_alert() {
        let a = dataset(vec![rec("A_Load", 10.0), rec("A_Run", 1.0)]);
        let b = dataset(vec![rec("A_Load", 10.0), rec("A_Run", 1.5)]);
        let metrics = compare(&a, &b).unwrap();
        let severities =
            DifferenceSeverities::classify(&metrics.differences, &SeverityThresholds::default());
        // total: 11 -> 11.5 = 4.55%
        assert_eq!(metrics.differences.total_time, 4.55);
        assert!(!severities.any_critical());
    }

    #[test]
    fn test_compare_inputs_reject_nan_duration() {
        let err = Dataset::from_records(vec![rec("Home_Load", f64::NAN)]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::NonFiniteDuration {
                index: 0,
                name: "Home_Load".to_string(),
            }
        );
    }
}
