//! Shared test utilities for bm25ctf-cli integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Get a Command for the bm25ctf binary.
///
/// # Panics
///
/// Panics if the bm25ctf binary cannot be found. This should not happen
/// in a properly configured test environment.
#[allow(deprecated)]
pub fn bm25ctf_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bm25ctf").expect("bm25ctf binary should exist");
    cmd.env_remove("BM25CTF_CONFIG").env_remove("BM25CTF_VERBOSE");
    cmd
}

/// Statistics for the reference query: one term in a 1000-document field.
pub const REFERENCE_YAML: &str = r#"collection:
  docCount: 1000
  sumTotalTermFreq: 500000
terms:
  - docFreq: 10
    totalTermFreq: 50
documents:
  - { id: short, freq: 3, length: 80 }
  - { id: long, freq: 3, length: 4000 }
  - { id: absent, freq: 0, norm: 54 }
"#;

/// Write a file into `dir` and return its path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write test file");
    path
}
