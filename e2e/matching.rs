// e2e/matching.rs: end-to-end matching fixtures.
//
// Each case runs the binary over literal input files and compares the
// results file byte-for-byte. The expected values pin down the priority
// order, tie-breaking, trimming, and casing behavior.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn partmatch_bin() -> PathBuf {
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

/// Runs the binary over the given inputs and returns the results file.
fn run_match(parts: &str, masters: &str) -> String {
    run_match_with(parts, masters, &[])
}

fn run_match_with(parts: &str, masters: &str, extra_args: &[&str]) -> String {
    let dir = TempDir::new().unwrap();
    let parts_path = dir.path().join("parts.txt");
    let masters_path = dir.path().join("master-parts.txt");
    let results_path = dir.path().join("results.txt");
    fs::write(&parts_path, parts).unwrap();
    fs::write(&masters_path, masters).unwrap();

    let status = Command::new(partmatch_bin())
        .args(extra_args)
        .args([&parts_path, &masters_path, &results_path])
        .status()
        .expect("failed to run partmatch");
    assert!(status.success(), "partmatch exited with {}", status);

    fs::read_to_string(&results_path).unwrap()
}

// ── Exact equal-length suffix, first-wins tie ────────────────────────────────

#[test]
fn exact_code_prefers_first_master_row() {
    assert_eq!(run_match("ABC\n", "ABC\nXABC\nZABC\n"), "ABC;ABC\n");
}

#[test]
fn lowercase_query_hits_longer_master_suffix() {
    assert_eq!(run_match("xabc\n", "ABC\nXABC\nZABC\n"), "xabc;XABC\n");
}

// ── Hyphen-stripped variants ─────────────────────────────────────────────────

#[test]
fn hyphen_stripped_master_matches_plain_part() {
    assert_eq!(run_match("AA123\n", "AA-123\n"), "AA123;AA-123\n");
}

#[test]
fn hyphenated_part_is_not_stripped() {
    assert_eq!(run_match("AB-12\n", "AB12\n"), "AB-12;\n");
}

// ── Master as suffix of the part ─────────────────────────────────────────────

#[test]
fn master_suffix_of_part() {
    assert_eq!(run_match("BIGWIDGET\n", "WIDGET\n"), "BIGWIDGET;WIDGET\n");
}

#[test]
fn exact_code_beats_master_suffix() {
    assert_eq!(run_match("XYZ\n", "XYZ\nBIGXYZ\n"), "XYZ;XYZ\n");
}

#[test]
fn longest_master_suffix_wins() {
    assert_eq!(run_match("ABCAT\n", "CAT\nBCAT\n"), "ABCAT;BCAT\n");
}

// ── Short codes ──────────────────────────────────────────────────────────────

#[test]
fn below_minimum_part_gets_empty_match() {
    assert_eq!(run_match("AB\n", "ABC\n"), "AB;\n");
}

#[test]
fn short_master_rows_never_appear_as_matches() {
    assert_eq!(run_match("XAB\n", "AB\nXAB\n"), "XAB;XAB\n");
}

// ── Row-for-row output shape ─────────────────────────────────────────────────

#[test]
fn one_output_line_per_input_row_in_order() {
    let results = run_match("BIGWIDGET\nQQQQ\n\nwidget\n", "WIDGET\n");
    assert_eq!(results, "BIGWIDGET;WIDGET\nQQQQ;\n;\nwidget;WIDGET\n");
}

#[test]
fn duplicate_part_rows_each_get_a_line() {
    let results = run_match("dup\nDUP\n", "XDUP\n");
    assert_eq!(results, "dup;XDUP\nDUP;XDUP\n");
}

#[test]
fn duplicate_master_rows_report_the_later_rows_casing() {
    // Both master rows canonicalize to BCAT; the later row wins the
    // backward scan, so its original casing is the one reported.
    let results = run_match("ABCAT\n", "bcat\nBCAT\n");
    assert_eq!(results, "ABCAT;BCAT\n");
}

#[test]
fn whitespace_around_parts_does_not_change_the_match() {
    let results = run_match("  BIGWIDGET  \n", "  WIDGET \n");
    assert_eq!(results, "BIGWIDGET;WIDGET\n");
}

#[test]
fn crlf_inputs_match_like_lf_inputs() {
    let results = run_match("BIGWIDGET\r\nQQQQ\r\n", "WIDGET\r\n");
    assert_eq!(results, "BIGWIDGET;WIDGET\nQQQQ;\n");
}

#[test]
fn missing_final_newline_still_counts_the_last_row() {
    let results = run_match("BIGWIDGET\nQQQQ", "WIDGET");
    assert_eq!(results, "BIGWIDGET;WIDGET\nQQQQ;\n");
}

#[test]
fn matched_field_uses_master_original_casing() {
    let results = run_match("bigwidget\n", "WiDgEt\n");
    assert_eq!(results, "bigwidget;WiDgEt\n");
}

// ── Determinism ──────────────────────────────────────────────────────────────

#[test]
fn output_is_identical_across_thread_counts() {
    // A mixed workload touching every priority rule.
    let parts = "ABC\nxabc\nAA123\nA-123\nBIGWIDGET\nXYZ\nABCAT\nAB\ndup\nDUP\n";
    let masters = "ABC\nXABC\nZABC\nAA-123\nWIDGET\nXYZ\nBIGXYZ\nCAT\nBCAT\nXDUP\n";

    let one = run_match_with(parts, masters, &["-T", "1"]);
    let four = run_match_with(parts, masters, &["-T", "4"]);
    let many = run_match_with(parts, masters, &["-T", "16"]);
    assert_eq!(one, four);
    assert_eq!(four, many);

    // And across repeated runs with the same settings.
    let again = run_match_with(parts, masters, &["-T", "4"]);
    assert_eq!(four, again);
}

#[test]
fn every_nonempty_match_is_a_master_row() {
    let parts = "ABC\nxabc\nAA123\nBIGWIDGET\nQQQQ\nABCAT\n";
    let masters = "ABC\nXABC\nZABC\nAA-123\nWIDGET\nCAT\nBCAT\n";
    let results = run_match(parts, masters);

    let master_rows: Vec<&str> = masters.lines().collect();
    for line in results.lines() {
        let (_, matched) = line.split_once(';').expect("separator present");
        if !matched.is_empty() {
            assert!(
                master_rows.contains(&matched),
                "{matched:?} is not a master row"
            );
        }
    }
    assert_eq!(results.lines().count(), parts.lines().count());
}
