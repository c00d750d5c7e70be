// Integration tests for `perfcmp compare`
//
// Baseline totals: overall 8.5s, load 4.5s, run 3.0s, save 1.0s.

mod utils;

use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;
use utils::{baseline_rows, results_csv, write_fixture, HEADER};

/// Candidate where Login got 1s slower to load (load +22.22%, overall +11.76%)
fn regressed_rows() -> Vec<(&'static str, f64)> {
    baseline_rows()
        .into_iter()
        .map(|(name, secs)| if name == "Login_Load" { (name, 3.0) } else { (name, secs) })
        .collect()
}

fn fixtures(dir: &TempDir, candidate: &[(&str, f64)]) -> (PathBuf, PathBuf) {
    let a = write_fixture(dir, "baseline.csv", &results_csv("2.4.0", &baseline_rows()));
    let b = write_fixture(dir, "candidate.csv", &results_csv("2.5.0", candidate));
    (a, b)
}

// ============================================================================
// Verdicts
// ============================================================================

#[test]
fn test_compare_regression_text() {
    let dir = TempDir::new().unwrap();
    let (a, b) = fixtures(&dir, &regressed_rows());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfcmp");
    cmd.arg("compare").arg(&a).arg(&b);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SIGNIFICANT DEVIATION DETECTED"))
        .stdout(predicate::str::contains("Baseline (A): 2.4.0"))
        .stdout(predicate::str::contains("Candidate (B): 2.5.0"))
        .stdout(predicate::str::contains("+22.22%"))
        .stdout(predicate::str::contains("+11.76%"))
        .stdout(predicate::str::contains("Total delta: +1.00s"))
        .stdout(predicate::str::contains("Degradations (1)"))
        .stdout(predicate::str::contains("Login_Load"));
}

#[test]
fn test_compare_fail_on_critical_exit_code() {
    let dir = TempDir::new().unwrap();
    let (a, b) = fixtures(&dir, &regressed_rows());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfcmp");
    cmd.arg("compare").arg(&a).arg(&b).arg("--fail-on-critical");

    cmd.assert().code(2);
}

#[test]
fn test_compare_identical_passes_fail_on_critical() {
    let dir = TempDir::new().unwrap();
    let (a, b) = fixtures(&dir, &baseline_rows());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfcmp");
    cmd.arg("compare").arg(&a).arg(&b).arg("--fail-on-critical");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("NO SIGNIFICANT DEVIATION"))
        .stdout(predicate::str::contains("Degradations").not());
}

#[test]
fn test_compare_permissive_preset_suppresses_alert() {
    let dir = TempDir::new().unwrap();
    let (a, b) = fixtures(&dir, &regressed_rows());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfcmp");
    cmd.arg("compare")
        .arg(&a)
        .arg(&b)
        .arg("--preset")
        .arg("permissive")
        .arg("--fail-on-critical");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("NO SIGNIFICANT DEVIATION"));
}

#[test]
fn test_compare_thresholds_from_config_file() {
    let dir = TempDir::new().unwrap();
    let (a, b) = fixtures(&dir, &regressed_rows());
    let config = write_fixture(
        &dir,
        "perfcmp.toml",
        "[thresholds]\nwarning_pct = 25.0\ncritical_pct = 50.0\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfcmp");
    cmd.arg("--config")
        .arg(&config)
        .arg("compare")
        .arg(&a)
        .arg(&b)
        .arg("--fail-on-critical");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("warning > 25%, critical > 50%"));
}

// ============================================================================
// Coverage differences and search
// ============================================================================

#[test]
fn test_compare_count_mismatch() {
    let dir = TempDir::new().unwrap();
    let candidate: Vec<_> = baseline_rows()
        .into_iter()
        .filter(|(name, _)| *name != "Cart_Save")
        .collect();
    let (a, b) = fixtures(&dir, &candidate);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfcmp");
    cmd.arg("compare").arg(&a).arg(&b);

    // save total 1.0 -> 0.5 is a 50% change
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Test count mismatch"))
        .stdout(predicate::str::contains("Save: 2 vs 1"))
        .stdout(predicate::str::contains("-50.00%"));
}

#[test]
fn test_compare_search_narrows_series() {
    let dir = TempDir::new().unwrap();
    let (a, b) = fixtures(&dir, &regressed_rows());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfcmp");
    cmd.arg("compare").arg(&a).arg(&b).arg("--search").arg("login");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Load comparison (1 tests)"))
        .stdout(predicate::str::contains("Run comparison (1 tests)"))
        .stdout(predicate::str::contains("Save comparison").not());
}

// ============================================================================
// JSON and CSV output
// ============================================================================

#[test]
fn test_compare_json_output() {
    let dir = TempDir::new().unwrap();
    let (a, b) = fixtures(&dir, &regressed_rows());

    let output = assert_cmd::cargo::cargo_bin_cmd!("perfcmp")
        .args([
            "compare",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &value["report"];

    assert_eq!(report["kind"], "comparison");
    assert_eq!(report["baseline_label"], "2.4.0");
    assert_eq!(report["candidate_label"], "2.5.0");
    assert_eq!(report["metrics"]["differences"]["load_time"], 22.22);
    assert_eq!(report["severities"]["load_time"], "critical");
    assert_eq!(report["severities"]["total_time"], "warning");
    assert_eq!(report["severities"]["save_time"], "ok");
    assert_eq!(report["significant_deviation"], true);
    assert_eq!(report["degradations"].as_array().unwrap().len(), 1);

    let load_series = report["series"]["load"].as_array().unwrap();
    assert_eq!(load_series[0]["name"], "Login_Load");
    assert_eq!(load_series[0]["baseline"], 2.0);
    assert_eq!(load_series[0]["candidate"], 3.0);
}

#[test]
fn test_compare_csv_paired_table() {
    let dir = TempDir::new().unwrap();
    let (a, b) = fixtures(&dir, &regressed_rows());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfcmp");
    cmd.arg("compare").arg(&a).arg(&b).arg("--format").arg("csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "name,phase,baseline_seconds,candidate_seconds,delta_seconds\nCart_Load,Load,",
        ))
        .stdout(predicate::str::contains("Login_Load,Load,2,3,1\n"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_compare_empty_candidate() {
    let dir = TempDir::new().unwrap();
    let a = write_fixture(&dir, "baseline.csv", &results_csv("2.4.0", &baseline_rows()));
    let b = write_fixture(&dir, "candidate.csv", &format!("{}\n", HEADER));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfcmp");
    cmd.arg("compare").arg(&a).arg(&b);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Nothing to compare"));
}

#[test]
fn test_compare_inverted_thresholds() {
    let dir = TempDir::new().unwrap();
    let (a, b) = fixtures(&dir, &baseline_rows());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfcmp");
    cmd.arg("compare")
        .arg(&a)
        .arg(&b)
        .arg("--warning-pct")
        .arg("30")
        .arg("--critical-pct")
        .arg("20");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("must be below critical_pct"));
}
