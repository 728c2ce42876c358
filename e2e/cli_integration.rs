// e2e/cli_integration.rs: CLI integration tests.
//
// Tests the `partmatch` binary as a black-box tool using
// std::process::Command. Covers argument handling, exit codes, the summary
// line, and failure messages for unreadable or empty inputs.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `partmatch` binary produced by Cargo.
fn partmatch_bin() -> PathBuf {
    // CARGO_BIN_EXE_partmatch is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_partmatch") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("partmatch");
    p
}

/// Writes both inputs into a fresh TempDir and returns the three paths.
fn fixture(parts: &str, masters: &str) -> (TempDir, PathBuf, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let parts_path = dir.path().join("parts.txt");
    let masters_path = dir.path().join("master-parts.txt");
    let results_path = dir.path().join("results.txt");
    fs::write(&parts_path, parts).unwrap();
    fs::write(&masters_path, masters).unwrap();
    (dir, parts_path, masters_path, results_path)
}

// ── Happy path ────────────────────────────────────────────────────────────────

#[test]
fn matches_and_writes_results_file() {
    let (_dir, parts, masters, results) = fixture("BIGWIDGET\nQQQQ\n", "WIDGET\n");

    let output = Command::new(partmatch_bin())
        .args([&parts, &masters, &results])
        .output()
        .expect("failed to run partmatch");

    assert!(output.status.success(), "expected exit 0, got {}", output.status);
    let written = fs::read_to_string(&results).unwrap();
    assert_eq!(written, "BIGWIDGET;WIDGET\nQQQQ;\n");
}

#[test]
fn summary_reports_matched_count() {
    let (_dir, parts, masters, results) = fixture("BIGWIDGET\nQQQQ\n", "WIDGET\n");

    let output = Command::new(partmatch_bin())
        .args([&parts, &masters, &results])
        .output()
        .expect("failed to run partmatch");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("1 of 2 parts matched"),
        "summary missing from stderr: {stderr}"
    );
}

#[test]
fn quiet_suppresses_the_summary() {
    let (_dir, parts, masters, results) = fixture("ABC\n", "ABC\n");

    let output = Command::new(partmatch_bin())
        .arg("--quiet")
        .args([&parts, &masters, &results])
        .output()
        .expect("failed to run partmatch");

    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "quiet run should print nothing");
}

#[test]
fn thread_count_flag_is_accepted() {
    let (_dir, parts, masters, results) = fixture("ABC\n", "ABC\n");

    let status = Command::new(partmatch_bin())
        .args(["-T", "1"])
        .args([&parts, &masters, &results])
        .status()
        .expect("failed to run partmatch");

    assert!(status.success());
    assert_eq!(fs::read_to_string(&results).unwrap(), "ABC;ABC\n");
}

// ── Argument errors ───────────────────────────────────────────────────────────

#[test]
fn missing_arguments_exit_nonzero_with_usage() {
    let output = Command::new(partmatch_bin())
        .output()
        .expect("failed to run partmatch");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "expected usage text: {stderr}");
}

#[test]
fn version_flag_exits_zero() {
    let output = Command::new(partmatch_bin())
        .arg("--version")
        .output()
        .expect("failed to run partmatch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("partmatch"), "got: {stdout}");
}

#[test]
fn help_flag_exits_zero() {
    let output = Command::new(partmatch_bin())
        .arg("--help")
        .output()
        .expect("failed to run partmatch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PARTS_FILE"), "got: {stdout}");
}

// ── I/O failures ──────────────────────────────────────────────────────────────

#[test]
fn missing_parts_file_fails_with_message() {
    let dir = TempDir::new().unwrap();
    let masters = dir.path().join("master-parts.txt");
    fs::write(&masters, "ABC\n").unwrap();

    let output = Command::new(partmatch_bin())
        .args([
            dir.path().join("no-such-file.txt").as_path(),
            masters.as_path(),
            dir.path().join("results.txt").as_path(),
        ])
        .output()
        .expect("failed to run partmatch");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parts file"), "got: {stderr}");
}

#[test]
fn empty_parts_file_is_fatal() {
    let (_dir, parts, masters, results) = fixture("", "ABC\n");

    let output = Command::new(partmatch_bin())
        .args([&parts, &masters, &results])
        .output()
        .expect("failed to run partmatch");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty"), "got: {stderr}");
}

#[test]
fn empty_master_parts_file_is_fatal() {
    let (_dir, parts, masters, results) = fixture("ABC\n", "");

    let output = Command::new(partmatch_bin())
        .args([&parts, &masters, &results])
        .output()
        .expect("failed to run partmatch");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("master parts file"), "got: {stderr}");
}
