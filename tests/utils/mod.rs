// Integration test utilities
//
// Helpers for writing result-file fixtures the way the test harness exports them

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const HEADER: &str = "Page,Date,Computer Name,Version,Method,Time(Seconds)";

/// Build a result file body from `(page, seconds)` rows sharing one version
pub fn results_csv(version: &str, rows: &[(&str, f64)]) -> String {
    let mut body = String::from(HEADER);
    body.push('\n');
    for (page, seconds) in rows {
        body.push_str(&format!(
            "{},2024-03-01 10:00,BUILD-07,{},Chrome,{}\n",
            page, version, seconds
        ));
    }
    body
}

/// Write a fixture file into the temp dir and return its path
pub fn write_fixture(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

/// Baseline release: three pages, full Load/Run/Save coverage
pub fn baseline_rows() -> Vec<(&'static str, f64)> {
    vec![
        ("Home_Load", 1.0),
        ("Home_Run", 2.0),
        ("Home_Save", 0.5),
        ("Login_Load", 2.0),
        ("Login_Run", 1.0),
        ("Cart_Load", 1.5),
        ("Cart_Save", 0.5),
    ]
}
