//! CLI argument parsing for perfcmp

use crate::config::AnalysisConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// Built-in severity threshold presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThresholdPreset {
    /// Warning above 10%, critical above 20%
    Default,
    /// Warning above 5%, critical above 10%
    Strict,
    /// Warning above 20%, critical above 40%
    Permissive,
}

#[derive(Parser, Debug)]
#[command(name = "perfcmp")]
#[command(version)]
#[command(about = "Analyze and compare performance test results exported as CSV", long_about = None)]
pub struct Cli {
    /// Load settings from a TOML file (flags override file values)
    #[arg(long = "config", value_name = "TOML", global = true)]
    pub config: Option<PathBuf>,

    /// Field delimiter of the input files (default: ',')
    #[arg(long = "delimiter", value_name = "CHAR", global = true)]
    pub delimiter: Option<char>,

    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize a single result file
    Analyze(AnalyzeArgs),
    /// Compare a baseline result file against a candidate
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Result file to analyze
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// List operations whose name contains TERM (case-insensitive)
    #[arg(short = 's', long = "search", value_name = "TERM")]
    pub search: Option<String>,

    /// Number of slowest operations to report
    #[arg(short = 'n', long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Output format (text, json or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Baseline result file (A)
    #[arg(value_name = "BASELINE")]
    pub baseline: PathBuf,

    /// Candidate result file (B)
    #[arg(value_name = "CANDIDATE")]
    pub candidate: PathBuf,

    /// Narrow the per-phase series to names containing TERM (case-insensitive)
    #[arg(short = 's', long = "search", value_name = "TERM")]
    pub search: Option<String>,

    /// Output format (text, json or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Severity threshold preset
    #[arg(long = "preset", value_enum, value_name = "PRESET")]
    pub preset: Option<ThresholdPreset>,

    /// Warning threshold in percent
    #[arg(long = "warning-pct", value_name = "PCT")]
    pub warning_pct: Option<f64>,

    /// Critical threshold in percent
    #[arg(long = "critical-pct", value_name = "PCT")]
    pub critical_pct: Option<f64>,

    /// Exit with code 2 when a significant deviation is detected
    #[arg(long = "fail-on-critical")]
    pub fail_on_critical: bool,
}

impl AnalyzeArgs {
    /// Reject flag combinations the chosen output format cannot carry
    pub fn validate(&self) -> Result<(), String> {
        if self.search.is_some() && self.format == OutputFormat::Csv {
            return Err("--search is not supported with --format csv; use text or json".to_string());
        }
        Ok(())
    }
}

impl Cli {
    /// Apply flags on top of a loaded (or default) configuration
    pub fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(delimiter) = self.delimiter {
            config.ingest.delimiter = delimiter;
        }

        match &self.command {
            Command::Analyze(args) => {
                if let Some(top) = args.top {
                    config.top_n = top;
                }
            }
            Command::Compare(args) => {
                match args.preset {
                    Some(ThresholdPreset::Default) => {
                        config.thresholds = AnalysisConfig::default().thresholds
                    }
                    Some(ThresholdPreset::Strict) => {
                        config.thresholds = AnalysisConfig::strict().thresholds
                    }
                    Some(ThresholdPreset::Permissive) => {
                        config.thresholds = AnalysisConfig::permissive().thresholds
                    }
                    None => {}
                }
                if let Some(pct) = args.warning_pct {
                    config.thresholds.warning_pct = pct;
                }
                if let Some(pct) = args.critical_pct {
                    config.thresholds.critical_pct = pct;
                }
            }
        }

        config
    }
}
