//! Integration tests for the `bm25ctf explain` and `bm25ctf norm` commands.

mod common;

use predicates::prelude::*;
use tempfile::TempDir;

use common::{bm25ctf_cmd, write_file, REFERENCE_YAML};

// ============================================================================
// explain
// ============================================================================

#[test]
fn test_explain_text_tree() {
    let temp = TempDir::new().expect("create temp dir");
    let stats = write_file(temp.path(), "query.yaml", REFERENCE_YAML);

    bm25ctf_cmd()
        .arg("explain")
        .arg(&stats)
        .args(["--freq", "3", "--length", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("score(freq=3), product of:"))
        .stdout(predicate::str::contains("  2.2 = scaling factor, k1 + 1"))
        .stdout(predicate::str::contains("80 = dl, length of field (approximate)"))
        .stdout(predicate::str::contains("500 = avgdl, average length of field"));
}

#[test]
fn test_explain_matches_score() {
    let temp = TempDir::new().expect("create temp dir");
    let stats = write_file(temp.path(), "query.yaml", REFERENCE_YAML);

    let explained = bm25ctf_cmd()
        .arg("explain")
        .arg(&stats)
        .args(["--freq", "3", "--norm", "54", "--json"])
        .output()
        .expect("run bm25ctf");
    assert!(explained.status.success());
    let tree: serde_json::Value = serde_json::from_slice(&explained.stdout).expect("JSON tree");

    let scored = bm25ctf_cmd()
        .args(["score", "--json"])
        .arg(&stats)
        .output()
        .expect("run bm25ctf");
    let docs: serde_json::Value = serde_json::from_slice(&scored.stdout).expect("JSON scores");

    assert_eq!(tree["isMatch"], serde_json::Value::Bool(true));
    assert_eq!(tree["value"], docs[0]["score"]);
    assert_eq!(tree["details"].as_array().map(Vec::len), Some(5));
}

#[test]
fn test_explain_lists_boost() {
    let temp = TempDir::new().expect("create temp dir");
    let stats = write_file(
        temp.path(),
        "boosted.json",
        r#"{
            "collection": {"docCount": 1000, "sumTotalTermFreq": 500000},
            "terms": [{"docFreq": 10, "totalTermFreq": 50}],
            "boost": 2.5
        }"#,
    );

    bm25ctf_cmd()
        .arg("explain")
        .arg(&stats)
        .args(["--freq", "1", "--norm", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.5 = boost"))
        .stdout(predicate::str::contains("10 = dl, length of field\n"));
}

#[test]
fn test_explain_requires_norm_or_length() {
    let temp = TempDir::new().expect("create temp dir");
    let stats = write_file(temp.path(), "query.yaml", REFERENCE_YAML);

    bm25ctf_cmd()
        .arg("explain")
        .arg(&stats)
        .args(["--freq", "3"])
        .assert()
        .failure();

    bm25ctf_cmd()
        .arg("explain")
        .arg(&stats)
        .args(["--freq", "3", "--norm", "54", "--length", "80"])
        .assert()
        .failure();
}

// ============================================================================
// norm
// ============================================================================

#[test]
fn test_norm_encode() {
    bm25ctf_cmd()
        .args(["norm", "encode", "5", "80", "2147483647"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5\t5\t5\n"))
        .stdout(predicate::str::contains("80\t54\t80\n"))
        .stdout(predicate::str::contains("2147483647\t255\t2013265944\n"));
}

#[test]
fn test_norm_decode() {
    bm25ctf_cmd()
        .args(["norm", "decode", "39", "41", "255"])
        .assert()
        .success()
        .stdout(predicate::str::contains("39\t39\n"))
        .stdout(predicate::str::contains("41\t42\tapproximate\n"))
        .stdout(predicate::str::contains("255\t2013265944\tapproximate\n"));
}

#[test]
fn test_norm_decode_rejects_out_of_range_byte() {
    bm25ctf_cmd()
        .args(["norm", "decode", "256"])
        .assert()
        .failure();
}

#[test]
fn test_version_includes_package_version() {
    bm25ctf_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
