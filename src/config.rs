//! Analysis configuration
//!
//! Loaded from an optional TOML file; every field has a default, so a file
//! only needs the values it changes:
//!
//! ```toml
//! top_n = 10
//!
//! [thresholds]
//! warning_pct = 5.0
//! critical_pct = 15.0
//!
//! [ingest]
//! delimiter = ";"
//! ```

use crate::comparison::SeverityThresholds;
use crate::ingest::IngestConfig;
use crate::metrics::DEFAULT_TOP_N;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings shared by single-dataset analysis and comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Severity bands for percentage differences
    pub thresholds: SeverityThresholds,

    /// Number of slowest operations to report
    pub top_n: usize,

    /// CSV decoding options
    pub ingest: IngestConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            thresholds: SeverityThresholds::default(),
            top_n: DEFAULT_TOP_N,
            ingest: IngestConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Default settings with strict severity bands
    pub fn strict() -> Self {
        Self {
            thresholds: SeverityThresholds::strict(),
            ..Self::default()
        }
    }

    /// Default settings with permissive severity bands
    pub fn permissive() -> Self {
        Self {
            thresholds: SeverityThresholds::permissive(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file can't be read, isn't valid TOML, or holds
    /// values that fail [`AnalysisConfig::validate`].
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        tracing::debug!(?config, "loaded analysis config");
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.thresholds.validate()?;

        if self.top_n == 0 {
            return Err("top_n must be at least 1".to_string());
        }

        if self.ingest.max_rows == 0 {
            return Err("ingest.max_rows must be at least 1".to_string());
        }

        if !self.ingest.delimiter.is_ascii() {
            return Err(format!(
                "ingest.delimiter must be an ASCII character, got {:?}",
                self.ingest.delimiter
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.thresholds.critical_pct, 20.0);
        assert_eq!(config.ingest.delimiter, ',');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(AnalysisConfig::strict().thresholds.critical_pct, 10.0);
        assert_eq!(AnalysisConfig::permissive().thresholds.critical_pct, 40.0);
        assert_eq!(AnalysisConfig::strict().top_n, 5);
    }

    #[test]
    fn test_from_toml_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top_n = 3\n\n[thresholds]\ncritical_pct = 30.0").unwrap();

        let config = AnalysisConfig::from_toml(file.path()).unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.thresholds.warning_pct, 10.0);
        assert_eq!(config.thresholds.critical_pct, 30.0);
        assert!(config.ingest.trim);
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top_n = 0").unwrap();

        let err = AnalysisConfig::from_toml(file.path()).unwrap_err();
        assert!(err.to_string().contains("top_n"));
    }

    #[test]
    fn test_from_toml_missing_file() {
        let err = AnalysisConfig::from_toml("/nonexistent/perfcmp.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_max_rows() {
        let mut config = AnalysisConfig::default();
        config.ingest.max_rows = 0;
        assert!(config.validate().is_err());
    }
}
