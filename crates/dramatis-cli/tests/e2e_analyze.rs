//! E2E tests for `dramatis analyze`, `dramatis rank` and `dramatis variations`.
//!
//! Covers: summary JSON schema, report file contents, seeded reproducibility,
//! config file precedence, metric ranking, variation export, and error
//! rendering for missing or malformed input.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

const CAST: &str = r#"{
  "characters": {
    "elizabeth": { "name": "Elizabeth Bennet", "dialogue_count": 40 },
    "darcy":     { "name": "Fitzwilliam Darcy", "dialogue_count": 25 },
    "jane":      { "name": "Jane Bennet", "dialogue_count": 10 },
    "bingley":   { "name": "Charles Bingley", "dialogue_count": 5 },
    "collins":   { "name": "William Collins" }
  },
  "co_occurrences": {
    "elizabeth": { "darcy": 9, "jane": 6, "collins": 2 },
    "darcy":     { "elizabeth": 9, "bingley": 4 },
    "jane":      { "elizabeth": 6, "bingley": 7 },
    "bingley":   { "darcy": 4, "jane": 7 },
    "collins":   { "elizabeth": 2 }
  },
  "interactions": {
    "elizabeth": ["darcy", "darcy", "jane"],
    "jane": ["bingley"]
  }
}"#;

fn dramatis_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dramatis"));
    cmd.current_dir(dir);
    cmd.env("DRAMATIS_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd.env_remove("DRAMATIS_TIMING");
    cmd
}

fn write_cast(dir: &Path) -> PathBuf {
    let path = dir.join("pride.json");
    std::fs::write(&path, CAST).expect("write cast");
    path
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command should not crash");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be valid JSON")
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_json_summary_has_expected_fields() {
    let dir = TempDir::new().expect("tempdir");
    let cast = write_cast(dir.path());

    let summary = json_stdout(dramatis_cmd(dir.path()).args([
        "analyze",
        cast.to_str().expect("utf8 path"),
        "--json",
        "--seed",
        "1",
    ]));

    assert_eq!(summary["characters"], 5);
    assert_eq!(summary["relationships"], 5);
    assert_eq!(summary["communities"], 1);
    assert_eq!(summary["weight_by"], "co_occurrence");
    assert_eq!(summary["top_metric"], "degree");

    let top = summary["top"].as_array().expect("top array");
    assert_eq!(top.len(), 5);
    assert_eq!(top[0]["id"], "elizabeth");
    assert_eq!(top[0]["rank"], 1);
}

#[test]
fn analyze_writes_full_report() {
    let dir = TempDir::new().expect("tempdir");
    let cast = write_cast(dir.path());
    let report_path = dir.path().join("out/report.json");

    dramatis_cmd(dir.path())
        .args(["analyze", cast.to_str().expect("utf8 path"), "--seed", "3", "--output"])
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("characters\t5"));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("report exists"))
            .expect("report is JSON");

    assert_eq!(report["metadata"]["total_characters"], 5);
    assert_eq!(report["metadata"]["total_edges"], 5);
    assert!(
        report["metadata"]["content_hash"]
            .as_str()
            .is_some_and(|h| h.starts_with("blake3:"))
    );

    let nodes = report["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 5);
    for node in nodes {
        for metric in [
            "degree",
            "betweenness",
            "closeness",
            "eigenvector",
            "dialogue",
            "interaction_strength",
        ] {
            assert!(node["centrality"][metric].is_number(), "missing {metric}");
        }
        assert!(node["x"].is_number() && node["y"].is_number());
    }

    for edge in report["edges"].as_array().expect("edges") {
        let source = edge["source"].as_str().expect("source");
        let target = edge["target"].as_str().expect("target");
        assert!(source < target, "{source} !< {target}");
    }
}

#[test]
fn seeded_reports_are_identical() {
    let dir = TempDir::new().expect("tempdir");
    let cast = write_cast(dir.path());
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");

    for path in [&a, &b] {
        dramatis_cmd(dir.path())
            .args(["analyze", cast.to_str().expect("utf8 path"), "--seed", "42", "--output"])
            .arg(path)
            .assert()
            .success();
    }

    assert_eq!(
        std::fs::read_to_string(&a).expect("a"),
        std::fs::read_to_string(&b).expect("b")
    );
}

#[test]
fn weight_by_flag_switches_edge_source() {
    let dir = TempDir::new().expect("tempdir");
    let cast = write_cast(dir.path());

    let summary = json_stdout(dramatis_cmd(dir.path()).args([
        "analyze",
        cast.to_str().expect("utf8 path"),
        "--json",
        "--weight-by",
        "interaction_frequency",
    ]));

    assert_eq!(summary["weight_by"], "interaction_frequency");
    // darcy-elizabeth, elizabeth-jane, bingley-jane; collins is left alone.
    assert_eq!(summary["relationships"], 3);
    assert_eq!(summary["communities"], 2);
}

#[test]
fn project_config_is_applied_and_flags_override_it() {
    let dir = TempDir::new().expect("tempdir");
    let cast = write_cast(dir.path());
    std::fs::write(
        dir.path().join("dramatis.toml"),
        "weight_by = \"interaction_frequency\"\n[layout]\niterations = 5\n",
    )
    .expect("write config");

    let from_file = json_stdout(dramatis_cmd(dir.path()).args([
        "analyze",
        cast.to_str().expect("utf8 path"),
        "--json",
    ]));
    assert_eq!(from_file["weight_by"], "interaction_frequency");

    let overridden = json_stdout(dramatis_cmd(dir.path()).args([
        "analyze",
        cast.to_str().expect("utf8 path"),
        "--json",
        "--weight-by",
        "co_occurrence",
    ]));
    assert_eq!(overridden["weight_by"], "co_occurrence");
}

#[test]
fn timing_report_goes_to_stderr() {
    let dir = TempDir::new().expect("tempdir");
    let cast = write_cast(dir.path());

    dramatis_cmd(dir.path())
        .args(["--timing", "analyze", cast.to_str().expect("utf8 path")])
        .assert()
        .success()
        .stderr(predicate::str::contains("centrality"))
        .stderr(predicate::str::contains("layout"))
        .stderr(predicate::str::contains("domain_scores"));
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

#[test]
fn missing_input_reports_code() {
    let dir = TempDir::new().expect("tempdir");

    let output = dramatis_cmd(dir.path())
        .args(["analyze", "absent.json", "--json"])
        .output()
        .expect("command should not crash");
    assert!(!output.status.success());

    let err: Value = serde_json::from_slice(&output.stderr).expect("stderr JSON");
    assert_eq!(err["error"]["error_code"], "E2001");
}

#[test]
fn missing_config_file_reports_config_code() {
    let dir = TempDir::new().expect("tempdir");
    let cast = write_cast(dir.path());

    let output = dramatis_cmd(dir.path())
        .args(["--config", "absent.toml", "analyze", cast.to_str().expect("utf8 path"), "--json"])
        .output()
        .expect("command should not crash");
    assert!(!output.status.success());

    let err: Value = serde_json::from_slice(&output.stderr).expect("stderr JSON");
    assert_eq!(err["error"]["error_code"], "E3002");
    assert!(
        err["error"]["suggestion"]
            .as_str()
            .is_some_and(|hint| hint.contains("--config"))
    );
}

#[test]
fn malformed_input_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").expect("write");

    dramatis_cmd(dir.path())
        .args(["analyze", bad.to_str().expect("utf8 path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn empty_cast_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, r#"{"characters": {}}"#).expect("write");

    let output = dramatis_cmd(dir.path())
        .args(["analyze", empty.to_str().expect("utf8 path"), "--json"])
        .output()
        .expect("command should not crash");
    assert!(!output.status.success());

    let err: Value = serde_json::from_slice(&output.stderr).expect("stderr JSON");
    assert_eq!(err["error"]["error_code"], "E1001");
    assert!(err["error"]["suggestion"].is_string());
}

// ---------------------------------------------------------------------------
// rank
// ---------------------------------------------------------------------------

#[test]
fn rank_by_dialogue() {
    let dir = TempDir::new().expect("tempdir");
    let cast = write_cast(dir.path());

    let ranking = json_stdout(dramatis_cmd(dir.path()).args([
        "rank",
        cast.to_str().expect("utf8 path"),
        "--metric",
        "dialogue",
        "--top",
        "2",
        "--json",
    ]));

    assert_eq!(ranking["metric"], "dialogue");
    let entries = ranking["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "elizabeth");
    assert_eq!(entries[1]["id"], "darcy");
    assert!((entries[0]["score"].as_f64().unwrap_or_default() - 0.5).abs() < 1e-9);
}

#[test]
fn rank_unknown_metric_fails() {
    let dir = TempDir::new().expect("tempdir");
    let cast = write_cast(dir.path());

    let output = dramatis_cmd(dir.path())
        .args(["rank", cast.to_str().expect("utf8 path"), "--metric", "pagerank", "--json"])
        .output()
        .expect("command should not crash");
    assert!(!output.status.success());

    let err: Value = serde_json::from_slice(&output.stderr).expect("stderr JSON");
    assert_eq!(err["error"]["error_code"], "E4001");
}

// ---------------------------------------------------------------------------
// variations
// ---------------------------------------------------------------------------

#[test]
fn variations_write_one_file_per_weighting() {
    let dir = TempDir::new().expect("tempdir");
    let cast = write_cast(dir.path());
    let out = dir.path().join("outputs");

    dramatis_cmd(dir.path())
        .args(["variations", cast.to_str().expect("utf8 path"), "--seed", "1", "--output-dir"])
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("pride_co_occurrence.json").exists());
    assert!(out.join("pride_interaction_frequency.json").exists());
    assert!(!out.join("pride_edge_list.json").exists());

    let summary: Value = serde_json::from_str(
        &std::fs::read_to_string(out.join("graph_variations_summary.json")).expect("summary"),
    )
    .expect("summary JSON");
    let entries = summary.as_array().expect("summary array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["weight_by"], "co_occurrence");
    assert_eq!(entries[0]["filename"], "pride_co_occurrence.json");
    assert_eq!(entries[0]["nodes"], 5);
    assert_eq!(entries[1]["edges"], 3);
}

// ---------------------------------------------------------------------------
// completions
// ---------------------------------------------------------------------------

#[test]
fn completions_mention_binary_name() {
    let dir = TempDir::new().expect("tempdir");
    dramatis_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dramatis"));
}
