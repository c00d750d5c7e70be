// Asymmetric join of two datasets by exact operation name
//
// Every baseline record looks up the FIRST candidate record with the same
// name. Baseline records without a match are dropped; candidate-only records
// never appear.

use crate::comparison::severity::round_to_hundredths;
use crate::dataset::Dataset;
use crate::filter::NameFilter;
use crate::record::{Phase, PhaseClass, TimedOperationRecord};
use serde::Serialize;
use std::collections::HashMap;

/// One row of the paired-test table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedTest {
    pub name: String,
    pub phase: PhaseClass,
    /// Baseline elapsed seconds
    pub time_a: f64,
    /// Candidate elapsed seconds
    pub time_b: f64,
    /// `time_b - time_a`; positive means the candidate is slower
    pub delta: f64,
}

impl PairedTest {
    /// Whether the candidate took longer than the baseline
    ///
    /// Compared at the 2-decimal precision the reports show, so sub-10ms
    /// jitter that rounds to the same value is not a degradation.
    pub fn is_degraded(&self) -> bool {
        round_to_hundredths(self.time_b) > round_to_hundredths(self.time_a)
    }
}

/// One bar of a per-phase comparison series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub name: String,
    pub baseline: f64,
    pub candidate: f64,
}

/// Index of the first candidate record per operation name
struct FirstMatchIndex<'a> {
    by_name: HashMap<&'a str, &'a TimedOperationRecord>,
}

impl<'a> FirstMatchIndex<'a> {
    fn new(candidate: &'a [TimedOperationRecord]) -> Self {
        let mut by_name = HashMap::with_capacity(candidate.len());
        for record in candidate {
            by_name
                .entry(record.operation_name.as_str())
                .or_insert(record);
        }
        Self { by_name }
    }

    fn get(&self, name: &str) -> Option<&'a TimedOperationRecord> {
        self.by_name.get(name).copied()
    }
}

/// Build the paired-test table
///
/// Sorted by phase (Load, Run, Save, unclassified), then by name. Duplicate
/// names in the baseline each produce a row against the same first match.
///
/// # Example
/// ```
/// use perfcmp::comparison::paired_tests;
/// use perfcmp::dataset::Dataset;
/// use perfcmp::record::{PhaseClass, TimedOperationRecord};
///
/// let a = Dataset::from_records(vec![TimedOperationRecord::new("Login_Load", 2.0)]).unwrap();
/// let b = Dataset::from_records(vec![TimedOperationRecord::new("Login_Load", 3.0)]).unwrap();
/// let table = paired_tests(&a, &b);
/// assert_eq!(table.len(), 1);
/// assert_eq!(table[0].phase, PhaseClass::Load);
/// assert_eq!(table[0].delta, 1.0);
/// ```
pub fn paired_tests(baseline: &Dataset, candidate: &Dataset) -> Vec<PairedTest> {
    let baseline = baseline.records();
    let index = FirstMatchIndex::new(candidate.records());

    let mut table: Vec<PairedTest> = baseline
        .iter()
        .filter_map(|a| {
            let b = index.get(&a.operation_name)?;
            Some(PairedTest {
                name: a.operation_name.clone(),
                phase: PhaseClass::from(a.phase()),
                time_a: a.elapsed_seconds,
                time_b: b.elapsed_seconds,
                delta: b.elapsed_seconds - a.elapsed_seconds,
            })
        })
        .collect();

    table.sort_by(|x, y| x.phase.cmp(&y.phase).then_with(|| x.name.cmp(&y.name)));

    let unmatched = baseline.len() - table.len();
    if unmatched > 0 {
        tracing::debug!(unmatched, "baseline records without a candidate match");
    }

    table
}

/// Comparison series for one phase
///
/// Includes every baseline record whose name carries the phase marker (plain
/// substring, so a name may appear in several phases) and passes `filter`,
/// paired with its first candidate match. Sorted descending by baseline time.
pub fn phase_series(
    baseline: &Dataset,
    candidate: &Dataset,
    phase: Phase,
    filter: &NameFilter,
) -> Vec<SeriesPoint> {
    let index = FirstMatchIndex::new(candidate.records());

    let mut series: Vec<SeriesPoint> = baseline
        .records()
        .iter()
        .filter(|a| a.has_marker(phase) && filter.matches(&a.operation_name))
        .filter_map(|a| {
            let b = index.get(&a.operation_name)?;
            Some(SeriesPoint {
                name: a.operation_name.clone(),
                baseline: a.elapsed_seconds,
                candidate: b.elapsed_seconds,
            })
        })
        .collect();

    series.sort_by(|x, y| {
        y.baseline
            .partial_cmp(&x.baseline)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    series
}

/// Paired tests where the candidate is slower, in table order
pub fn degradations(table: &[PairedTest]) -> Vec<PairedTest> {
    table.iter().filter(|t| t.is_degraded()).cloned().collect()
}
