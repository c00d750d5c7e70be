// Baseline vs. candidate comparison of two performance datasets
//
// Joins two record sets by exact operation name, sums overall and per-phase
// totals for both sides, expresses the change as a percentage of the baseline
// and bands each change into ok / warning / critical.
//
// - `config`:   severity thresholds (10% / 20% by default)
// - `severity`: percentage change, rounding, banding
// - `join`:     paired-test table, per-phase series, degradations
// - `engine`:   `compare()` and the classified `ComparisonReport`

mod config;
mod engine;
mod join;
mod severity;

pub use config::SeverityThresholds;
pub use engine::{
    compare, ComparisonMetrics, ComparisonReport, CountMismatch, DatasetTotals,
    DifferenceSeverities, Differences, PhaseSeries,
};
pub use join::{degradations, paired_tests, phase_series, PairedTest, SeriesPoint};
pub use severity::{classify, percent_change, round_to_hundredths, Severity};
