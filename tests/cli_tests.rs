//! Command-line tests for the `solve` and `verify` subcommands.

use std::io::Write;

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const COHORT: &str = r#"{
    "candidates": [
        {"id": "S1", "preferences": ["LEC001", "LEC002"]},
        {"id": "S2", "preferences": ["LEC001", "LEC002"]},
        {"id": "S3", "preferences": ["LEC001"]}
    ],
    "providers": [
        {"id": "LEC001", "capacity": 1, "preferences": ["S2", "S1", "S3"]},
        {"id": "LEC002", "capacity": 2, "preferences": ["S1", "S2"]}
    ]
}"#;

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn thesis_match() -> Command {
    Command::cargo_bin("thesis-match").expect("binary should be built")
}

#[test]
fn test_solve_text_output() {
    let input = write_temp(".json", COHORT);

    thesis_match()
        .arg("solve")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Stable Assignment"))
        .stdout(predicate::str::contains("LEC001 (1/1 seats)"))
        .stdout(predicate::str::contains("Matched: 2/3"))
        .stdout(predicate::str::contains("Unmatched: S3"));
}

#[test]
fn test_solve_json_output() {
    let input = write_temp(".json", COHORT);

    let output = thesis_match()
        .args(["solve", "--format", "json"])
        .arg(input.path())
        .output()
        .expect("failed to run");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["assignment"]["candidates"]["S2"], "LEC001");
    assert_eq!(report["assignment"]["candidates"]["S1"], "LEC002");
    assert!(report["assignment"]["candidates"]["S3"].is_null());
    assert_eq!(report["assignment"]["occupancy"]["LEC002"], 1);
    assert_eq!(report["unranked_policy"], "rank_last");
    assert!(report["generated_at"].is_string());
}

#[test]
fn test_solve_tsv_input_and_output() {
    let input = write_temp(
        ".tsv",
        "kind\tid\tcapacity\tpreferences\nstudent\tS1\t\tLEC001\nlecturer\tLEC001\t1\tS1\n",
    );

    thesis_match()
        .args(["solve", "--format", "tsv"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("candidate\tprovider"))
        .stdout(predicate::str::contains("S1\tLEC001"));
}

#[test]
fn test_solve_unranked_policy() {
    let input = write_temp(
        ".json",
        r#"{"candidates": [{"id": "S1", "preferences": ["LEC001"]}],
            "providers": [{"id": "LEC001", "capacity": 1}]}"#,
    );

    thesis_match()
        .arg("solve")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched: 1/1"));

    thesis_match()
        .args(["solve", "--unranked", "reject"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched: 0/1"))
        .stdout(predicate::str::contains("Unmatched: S1"));
}

#[test]
fn test_solve_explicit_input_format() {
    let input = write_temp(
        ".dat",
        "student\tS1\t\tLEC001\nlecturer\tLEC001\t1\tS1\n",
    );

    // Unknown extensions are read as JSON
    thesis_match().arg("solve").arg(input.path()).assert().failure();

    thesis_match()
        .args(["solve", "--input-format", "tsv"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched: 1/1"));
}

#[test]
fn test_solve_gzipped_input() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(COHORT.as_bytes())
        .expect("Failed to compress");
    let compressed = encoder.finish().expect("Failed to compress");

    let mut input = NamedTempFile::with_suffix(".json.gz").expect("Failed to create temp file");
    input
        .write_all(&compressed)
        .expect("Failed to write temp file");

    thesis_match()
        .arg("solve")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("LEC001 (1/1 seats)"))
        .stdout(predicate::str::contains("Matched: 2/3"));
}

#[test]
fn test_solve_rejects_unknown_reference() {
    let input = write_temp(
        ".json",
        r#"{"candidates": [{"id": "S1", "preferences": ["LEC404"]}], "providers": []}"#,
    );

    thesis_match()
        .arg("solve")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("LEC404"));
}

#[test]
fn test_verify_accepts_solver_output() {
    let input = write_temp(".json", COHORT);

    let output = thesis_match()
        .args(["solve", "--format", "json"])
        .arg(input.path())
        .output()
        .expect("failed to run");
    let assignment = write_temp(".json", &String::from_utf8_lossy(&output.stdout));

    thesis_match()
        .arg("verify")
        .arg(input.path())
        .arg(assignment.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Assignment is stable."));
}

#[test]
fn test_verify_reports_blocking_pair() {
    let input = write_temp(".json", COHORT);
    let assignment = write_temp(".json", r#"{"S1": "LEC001", "S2": "LEC002", "S3": null}"#);

    thesis_match()
        .arg("verify")
        .arg(input.path())
        .arg(assignment.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("'S2' and provider 'LEC001'"))
        .stderr(predicate::str::contains("not stable"));
}
