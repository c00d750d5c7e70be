//! Human-readable text reports
//!
//! Rendering lives here so the metric and comparison types stay free of
//! formatting concerns. Seconds are printed with 2 decimals and an `s` suffix.

use crate::comparison::{ComparisonReport, SeriesPoint, Severity};
use crate::metrics::SingleDatasetMetrics;
use crate::record::{Phase, SubjectSummary, TimedOperationRecord};

/// Format seconds as `1.23s`
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}s", seconds)
}

/// Format a signed percentage as `+12.50%`; non-finite values print as `n/a`
pub fn format_percent(pct: f64) -> String {
    if pct.is_finite() {
        format!("{:+.2}%", pct)
    } else {
        "n/a".to_string()
    }
}

fn severity_marker(severity: Option<Severity>) -> &'static str {
    severity.map_or("❔", Severity::marker)
}

impl SingleDatasetMetrics {
    /// Render the metrics as a text report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "Total duration:      {}\n",
            format_seconds(self.total_duration)
        ));
        report.push_str(&format!(
            "Average load time:   {}\n",
            format_seconds(self.average_load_time)
        ));
        report.push_str(&format!(
            "Median load time:    {}\n",
            format_seconds(self.median_load_time)
        ));
        report.push_str(&format!(
            "Tests:               {} load, {} run, {} save\n",
            self.counts_by_phase.load, self.counts_by_phase.run, self.counts_by_phase.save
        ));

        if !self.top_n_slowest.is_empty() {
            report.push_str(&format!(
                "\n🐢 Slowest operations ({}):\n",
                self.top_n_slowest.len()
            ));
            for (rank, record) in self.top_n_slowest.iter().enumerate() {
                report.push_str(&format!(
                    "  {:>2}. {:<40} {:>10}\n",
                    rank + 1,
                    record.operation_name,
                    format_seconds(record.elapsed_seconds)
                ));
            }
        }

        report
    }
}

/// Render the per-subject Load/Run/Save table
pub fn summaries_to_string(summaries: &[SubjectSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<30} {:>10} {:>10} {:>10}\n",
        "Subject", "Load", "Run", "Save"
    ));
    out.push_str(&format!("{}\n", "─".repeat(63)));
    for summary in summaries {
        out.push_str(&format!(
            "{:<30} {:>10} {:>10} {:>10}\n",
            summary.subject_id,
            format_seconds(summary.load_time),
            format_seconds(summary.run_time),
            format_seconds(summary.save_time)
        ));
    }
    out
}

/// Render a record listing (search results)
pub fn records_to_string(records: &[&TimedOperationRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "  {:<40} {:>10}  {}\n",
            record.operation_name,
            format_seconds(record.elapsed_seconds),
            record.timestamp
        ));
    }
    out
}

fn series_to_string(phase: Phase, points: &[SeriesPoint]) -> String {
    let mut out = format!("\n📈 {} comparison ({} tests):\n", phase, points.len());
    for point in points {
        out.push_str(&format!(
            "  {:<40} {:>10} {:>10}\n",
            point.name,
            format_seconds(point.baseline),
            format_seconds(point.candidate)
        ));
    }
    out
}

impl ComparisonReport {
    /// Render the comparison as a text report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let metrics = &self.metrics;

        if self.significant_deviation {
            report.push_str("❌ SIGNIFICANT DEVIATION DETECTED\n\n");
        } else {
            report.push_str("✅ NO SIGNIFICANT DEVIATION\n\n");
        }

        report.push_str(&format!(
            "Baseline (A): {}\nCandidate (B): {}\n",
            self.baseline_label, self.candidate_label
        ));
        report.push_str(&format!(
            "Thresholds: warning > {}%, critical > {}%\n\n",
            self.thresholds.warning_pct, self.thresholds.critical_pct
        ));

        report.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12}\n",
            "", "A", "B", "Change"
        ));
        let rows = [
            (
                "Overall",
                metrics.totals_a.total_time,
                metrics.totals_b.total_time,
                Some((metrics.differences.total_time, self.severities.total_time)),
            ),
            (
                "Load",
                metrics.totals_a.load_time,
                metrics.totals_b.load_time,
                Some((metrics.differences.load_time, self.severities.load_time)),
            ),
            (
                "Run",
                metrics.totals_a.run_time,
                metrics.totals_b.run_time,
                None,
            ),
            (
                "Save",
                metrics.totals_a.save_time,
                metrics.totals_b.save_time,
                Some((metrics.differences.save_time, self.severities.save_time)),
            ),
        ];
        for (label, a, b, change) in rows {
            let change = match change {
                Some((pct, severity)) => {
                    format!("{:>12} {}", format_percent(pct), severity_marker(severity))
                }
                None => String::new(),
            };
            report.push_str(&format!(
                "{:<10} {:>12} {:>12} {}\n",
                label,
                format_seconds(a),
                format_seconds(b),
                change
            ));
        }
        report.push_str(&format!(
            "\nTotal delta: {:+.2}s\n",
            metrics.total_delta()
        ));

        if metrics.count_mismatch.any() {
            report.push_str("\n⚠️  Test count mismatch:\n");
            for phase in Phase::ALL {
                if metrics.count_mismatch.get(phase) {
                    report.push_str(&format!(
                        "  {}: {} vs {}\n",
                        phase,
                        metrics.counts_a.get(phase),
                        metrics.counts_b.get(phase)
                    ));
                }
            }
        }

        if !self.degradations.is_empty() {
            report.push_str(&format!(
                "\n🔻 Degradations ({}):\n",
                self.degradations.len()
            ));
            for test in &self.degradations {
                report.push_str(&format!(
                    "  {:<40} {:>10} -> {:>10} ({:+.2}s)\n",
                    test.name,
                    format_seconds(test.time_a),
                    format_seconds(test.time_b),
                    test.delta
                ));
            }
        }

        for phase in Phase::ALL {
            let points = self.series.get(phase);
            if !points.is_empty() {
                report.push_str(&series_to_string(phase, points));
            }
        }

        report
    }
}
