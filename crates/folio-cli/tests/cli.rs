//! Integration tests for the folio binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn folio() -> Command {
    Command::cargo_bin("folio").unwrap()
}

#[test]
fn test_estimate_missing_file_fails() {
    folio()
        .args(["estimate", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_fast_only_estimate_reads_count_marker() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quote.pdf");
    fs::write(&path, b"%PDF-1.4 /Type /Pages /Count 3 /Kids [] %%EOF").unwrap();

    folio()
        .args(["estimate", path.to_str().unwrap(), "--fast-only", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalPages\": 3"))
        .stdout(predicate::str::contains("\"phase\": \"fast\""));
}

#[test]
fn test_deep_estimate_on_malformed_pdf_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    fs::write(&path, b"not a pdf").unwrap();

    folio()
        .args(["estimate", path.to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalPages\": 1"))
        .stdout(predicate::str::contains("\"phase\": \"deep\""))
        .stdout(predicate::str::contains("\"density\": \"high\""));
}

#[test]
fn test_csv_output_has_per_page_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quote.pdf");
    fs::write(&path, b"/Count 2").unwrap();

    folio()
        .args(["estimate", path.to_str().unwrap(), "--fast-only", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "page_number,word_count,density,fraction,price",
        ))
        .stdout(predicate::str::contains("1,300,high,1,"))
        .stdout(predicate::str::contains("2,300,high,1,"));
}

#[test]
fn test_base_price_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quote.pdf");
    fs::write(&path, b"/Count 2").unwrap();

    folio()
        .args([
            "estimate",
            path.to_str().unwrap(),
            "--fast-only",
            "--base-price",
            "10.00",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalPrice\": \"20.00\""));
}

#[test]
fn test_batch_summary_csv() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.pdf"), b"not a pdf").unwrap();
    fs::write(dir.path().join("b.pdf"), b"also not a pdf").unwrap();

    let out_dir = dir.path().join("out");
    let pattern = format!("{}/*.pdf", dir.path().display());

    folio()
        .args([
            "batch",
            &pattern,
            "--output-dir",
            out_dir.to_str().unwrap(),
            "--summary",
        ])
        .assert()
        .success();

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("a.pdf,success"));
    assert!(summary.contains("b.pdf,success"));

    // Per-file JSON outputs are written alongside the summary.
    assert!(out_dir.join("a.json").exists());
    assert!(out_dir.join("b.json").exists());
}

#[test]
fn test_config_path_command() {
    folio()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}
