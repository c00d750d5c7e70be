//! perfcmp - Performance test result analysis and release comparison
//!
//! This library ingests tabular timing exports (one row per timed operation),
//! groups them by subject and phase, computes descriptive statistics, and
//! compares a baseline dataset against a candidate with severity banding.

pub mod cli;
pub mod comparison;
pub mod config;
pub mod csv_output;
pub mod dataset;
pub mod filter;
pub mod grouping;
pub mod ingest;
pub mod json_output;
pub mod metrics;
pub mod record;
pub mod report;
pub mod session;
