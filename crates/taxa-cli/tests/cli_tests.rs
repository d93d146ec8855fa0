//! End-to-end tests for the taxa binary
//!
//! These tests run the built binary against a JSON catalog written to a
//! temporary directory and cover:
//! - Plain, subtaxa, and synonym resolution
//! - Output formats (ids, json)
//! - Error handling and exit codes
//! - The rank listing

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to write a small catalog and return its path
fn write_catalog() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names.json");
    let records = json!([
        {"id": 1, "canonical_name": "Fungi", "search_form": "Fungi", "rank": "Kingdom"},
        {"id": 100, "canonical_name": "Agaricus", "search_form": "Agaricus", "rank": "Genus",
         "ancestor_path": "Kingdom: _Fungi_"},
        {"id": 101, "canonical_name": "Agaricus campestris",
         "search_form": "Agaricus campestris L.", "author": "L.", "rank": "Species",
         "ancestor_path": "Kingdom: _Fungi_"},
        {"id": 102, "canonical_name": "Agaricus campestris var. squamulosus",
         "search_form": "Agaricus campestris var. squamulosus", "rank": "Variety",
         "ancestor_path": "Kingdom: _Fungi_"},
        {"id": 201, "canonical_name": "Boletus edulis", "search_form": "Boletus edulis",
         "rank": "Species", "synonym_group_id": 5},
        {"id": 301, "canonical_name": "Xerocomus edulis", "search_form": "Xerocomus edulis",
         "rank": "Species", "synonym_group_id": 5}
    ]);
    std::fs::write(&path, records.to_string()).unwrap();
    (dir, path)
}

/// Helper to build a `taxa` command isolated from the caller's environment
fn taxa() -> Command {
    let mut cmd = Command::cargo_bin("taxa").unwrap();
    cmd.env_remove("DATABASE_URL")
        .env_remove("TAXA_MAX_BATCH_SIZE")
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_OUTPUT");
    cmd
}

// ============================================================================
// Resolve Tests
// ============================================================================

#[test]
fn test_resolve_by_name() {
    let (_dir, path) = write_catalog();

    taxa()
        .args(["resolve", "Agaricus campestris", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout("101\n");
}

#[test]
fn test_resolve_by_id() {
    let (_dir, path) = write_catalog();

    taxa()
        .args(["resolve", "100", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout("100\n");
}

#[test]
fn test_resolve_subtaxa() {
    let (_dir, path) = write_catalog();

    taxa()
        .args(["resolve", "Agaricus", "--subtaxa", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout("100\n101\n102\n");
}

#[test]
fn test_resolve_immediate_subtaxa() {
    let (_dir, path) = write_catalog();

    taxa()
        .args(["resolve", "Agaricus", "--immediate-subtaxa", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout("100\n101\n");
}

#[test]
fn test_resolve_synonyms_excluding_original() {
    let (_dir, path) = write_catalog();

    taxa()
        .args(["resolve", "Boletus edulis", "--synonyms", "--exclude-original", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout("301\n");
}

#[test]
fn test_resolve_max_batch_size_caps_output() {
    let (_dir, path) = write_catalog();

    taxa()
        .args(["resolve", "Agaricus", "--subtaxa", "--max-batch-size", "2", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout("100\n101\n");
}

#[test]
fn test_resolve_json_output() {
    let (_dir, path) = write_catalog();

    let output = taxa()
        .args(["resolve", "Agaricus", "--subtaxa", "--format", "json", "--catalog"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["ids"], json!([100, 101, 102]));
    assert_eq!(value["count"], json!(3));
    assert_eq!(value["options"]["include_subtaxa"], json!(true));
}

#[test]
fn test_resolve_unknown_name_prints_nothing() {
    let (_dir, path) = write_catalog();

    taxa()
        .args(["resolve", "Amanita muscaria", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout("\n");
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_flags_without_references_fail() {
    let (_dir, path) = write_catalog();

    taxa()
        .args(["resolve", "--synonyms", "--catalog"])
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid option combination"));
}

#[test]
fn test_zero_batch_size_fails() {
    let (_dir, path) = write_catalog();

    taxa()
        .args(["resolve", "Agaricus", "--max-batch-size", "0", "--catalog"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid batch size"));
}

#[test]
fn test_missing_catalog_fails() {
    taxa()
        .args(["resolve", "Agaricus"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No catalog configured"));
}

#[test]
fn test_unreadable_catalog_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    taxa()
        .args(["resolve", "Agaricus", "--catalog"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}

#[test]
fn test_invalid_format_is_a_usage_error() {
    taxa()
        .args(["resolve", "Agaricus", "--format", "xml"])
        .assert()
        .failure()
        .code(2);
}

// ============================================================================
// Ranks Tests
// ============================================================================

#[test]
fn test_ranks_lists_order() {
    taxa()
        .arg("ranks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Form"))
        .stdout(predicate::str::contains("Genus  (genus or above)"))
        .stdout(predicate::str::contains("Group"));
}
