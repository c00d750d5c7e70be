//! Single-dataset descriptive statistics
//!
//! Totals, Load-phase average and median, per-phase counts and the slowest
//! operations. Entry points take a [`Dataset`], so no NaN or infinite
//! duration can reach a sum or a median.

use crate::dataset::Dataset;
use crate::record::{Phase, TimedOperationRecord};
use serde::Serialize;
use std::cmp::Ordering;

/// Number of slowest operations reported by default
pub const DEFAULT_TOP_N: usize = 5;

/// Record counts per phase marker
///
/// Counts are independent substring tests, so a name carrying two markers is
/// counted under both; a name carrying none is counted under neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseCounts {
    pub load: usize,
    pub run: usize,
    pub save: usize,
}

impl PhaseCounts {
    /// Count records per marker
    pub(crate) fn from_records(records: &[TimedOperationRecord]) -> Self {
        Self {
            load: phase_count(records, Phase::Load),
            run: phase_count(records, Phase::Run),
            save: phase_count(records, Phase::Save),
        }
    }

    /// Count for one phase
    pub fn get(&self, phase: Phase) -> usize {
        match phase {
            Phase::Load => self.load,
            Phase::Run => self.run,
            Phase::Save => self.save,
        }
    }
}

/// Descriptive statistics for one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleDatasetMetrics {
    /// Sum of all elapsed seconds
    pub total_duration: f64,
    /// Mean of Load records, 0 when there are none
    pub average_load_time: f64,
    /// Median of Load records, 0 when there are none
    pub median_load_time: f64,
    pub counts_by_phase: PhaseCounts,
    /// Slowest records, descending; ties keep input order
    pub top_n_slowest: Vec<TimedOperationRecord>,
}

/// Compute metrics with the default top-5 ranking
///
/// # Example
/// ```
/// use perfcmp::dataset::Dataset;
/// use perfcmp::metrics::compute_metrics;
/// use perfcmp::record::TimedOperationRecord;
///
/// let dataset = Dataset::from_records(vec![
///     TimedOperationRecord::new("A_Load", 1.0),
///     TimedOperationRecord::new("B_Load", 3.0),
///     TimedOperationRecord::new("C_Run", 2.0),
/// ])
/// .unwrap();
/// let metrics = compute_metrics(&dataset);
/// assert_eq!(metrics.total_duration, 6.0);
/// assert_eq!(metrics.median_load_time, 2.0);
/// assert_eq!(metrics.counts_by_phase.run, 1);
/// ```
pub fn compute_metrics(dataset: &Dataset) -> SingleDatasetMetrics {
    compute_metrics_with_top_n(dataset, DEFAULT_TOP_N)
}

/// Compute metrics keeping the `top_n` slowest records
pub fn compute_metrics_with_top_n(dataset: &Dataset, top_n: usize) -> SingleDatasetMetrics {
    let records = dataset.records();
    let load_times = phase_durations(records, Phase::Load);

    SingleDatasetMetrics {
        total_duration: total_duration(records),
        average_load_time: mean(&load_times),
        median_load_time: median(&load_times),
        counts_by_phase: PhaseCounts::from_records(records),
        top_n_slowest: top_n_slowest(records, top_n),
    }
}

/// Sum of all elapsed seconds
pub(crate) fn total_duration(records: &[TimedOperationRecord]) -> f64 {
    records.iter().map(|r| r.elapsed_seconds).sum()
}

/// Sum of elapsed seconds for records carrying the phase marker
pub(crate) fn phase_total(records: &[TimedOperationRecord], phase: Phase) -> f64 {
    records
        .iter()
        .filter(|r| r.has_marker(phase))
        .map(|r| r.elapsed_seconds)
        .sum()
}

/// Number of records carrying the phase marker
pub(crate) fn phase_count(records: &[TimedOperationRecord], phase: Phase) -> usize {
    records.iter().filter(|r| r.has_marker(phase)).count()
}

/// Durations of records carrying the phase marker, in input order
pub(crate) fn phase_durations(records: &[TimedOperationRecord], phase: Phase) -> Vec<f64> {
    records
        .iter()
        .filter(|r| r.has_marker(phase))
        .map(|r| r.elapsed_seconds)
        .collect()
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median, 0 for an empty slice
///
/// Even lengths average the two central values.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// The `n` slowest records, descending by elapsed time
///
/// Uses a stable sort, so equal durations keep their input order.
pub(crate) fn top_n_slowest(records: &[TimedOperationRecord], n: usize) -> Vec<TimedOperationRecord> {
    let mut sorted: Vec<&TimedOperationRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.elapsed_seconds
            .partial_cmp(&a.elapsed_seconds)
            .unwrap_or(Ordering::Equal)
    });
    sorted.into_iter().take(n).cloned().collect()
}
