// Severity thresholds for percentage differences between two datasets
//
// A difference is banded by its magnitude: above `critical_pct` is critical,
// above `warning_pct` (and up to critical) is a warning, anything else is ok.

use serde::{Deserialize, Serialize};

/// Percentage thresholds used to band a difference into a severity
///
/// # Example
/// ```
/// use perfcmp::comparison::SeverityThresholds;
///
/// let thresholds = SeverityThresholds::default();
/// assert_eq!(thresholds.warning_pct, 10.0);
/// assert_eq!(thresholds.critical_pct, 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityThresholds {
    /// Magnitude (in percent) above which a difference is a warning
    pub warning_pct: f64,

    /// Magnitude (in percent) above which a difference is critical
    ///
    /// Exceeding this on any of the overall, load or save differences raises
    /// the significant-deviation alert.
    pub critical_pct: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            warning_pct: 10.0,
            critical_pct: 20.0,
        }
    }
}

impl SeverityThresholds {
    /// Tighter bands for release gating
    pub fn strict() -> Self {
        Self {
            warning_pct: 5.0,
            critical_pct: 10.0,
        }
    }

    /// Looser bands for noisy environments
    pub fn permissive() -> Self {
        Self {
            warning_pct: 20.0,
            critical_pct: 40.0,
        }
    }

    /// Validate thresholds
    pub fn validate(&self) -> Result<(), String> {
        if !self.warning_pct.is_finite() || self.warning_pct < 0.0 {
            return Err(format!(
                "warning_pct must be a non-negative number, got {}",
                self.warning_pct
            ));
        }

        if !self.critical_pct.is_finite() || self.critical_pct < 0.0 {
            return Err(format!(
                "critical_pct must be a non-negative number, got {}",
                self.critical_pct
            ));
        }

        if self.warning_pct >= self.critical_pct {
            return Err(format!(
                "warning_pct ({}) must be below critical_pct ({})",
                self.warning_pct, self.critical_pct
            ));
        }

        Ok(())
    }
}
