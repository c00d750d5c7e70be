// Percentage differences and their severity bands

use crate::comparison::config::SeverityThresholds;
use serde::Serialize;
use std::fmt;

/// Severity band of a percentage difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    /// Short marker used in text reports
    pub fn marker(self) -> &'static str {
        match self {
            Severity::Ok => "✅",
            Severity::Warning => "⚠️ ",
            Severity::Critical => "❌",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Band a percentage difference by its magnitude
///
/// Returns `None` for non-finite differences (zero baseline), which are
/// undefined rather than ok.
///
/// # Example
/// ```
/// use perfcmp::comparison::{classify, Severity, SeverityThresholds};
///
/// let t = SeverityThresholds::default();
/// assert_eq!(classify(50.0, &t), Some(Severity::Critical));
/// assert_eq!(classify(-15.0, &t), Some(Severity::Warning));
/// assert_eq!(classify(20.0, &t), Some(Severity::Warning));
/// assert_eq!(classify(f64::INFINITY, &t), None);
/// ```
pub fn classify(difference_pct: f64, thresholds: &SeverityThresholds) -> Option<Severity> {
    if !difference_pct.is_finite() {
        return None;
    }

    let magnitude = difference_pct.abs();
    if magnitude > thresholds.critical_pct {
        Some(Severity::Critical)
    } else if magnitude > thresholds.warning_pct {
        Some(Severity::Warning)
    } else {
        Some(Severity::Ok)
    }
}

/// Percentage change of `candidate` relative to `baseline`, rounded to 2 decimals
///
/// `(candidate / baseline - 1) * 100`. A zero baseline yields a non-finite
/// value per IEEE semantics (infinite, or NaN when both are zero).
pub fn percent_change(baseline: f64, candidate: f64) -> f64 {
    round_to_hundredths((candidate / baseline - 1.0) * 100.0)
}

/// Round half away from zero to 2 decimal places; non-finite passes through
pub fn round_to_hundredths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    (value * 100.0).round() / 100.0
}
