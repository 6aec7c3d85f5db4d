// Dweve json2graph - JSON to Property Graph Import
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for the json2graph binary.

use assert_cmd::Command;
use json2graph::content_hash;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// Test helper to create a json2graph command
fn json2graph_cmd() -> Command {
    Command::cargo_bin("json2graph").expect("Failed to find json2graph binary")
}

/// Write `content` to a file in a fresh temporary directory
fn write_input(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    (dir, path)
}

const PERSON: &str = r#"{"name": "Alice", "tags": ["x", "y"]}"#;

// ============================================================================
// cypher
// ============================================================================

#[test]
fn test_cypher_prints_script() {
    let (_dir, path) = write_input("person.json", PERSON);

    json2graph_cmd()
        .arg("cypher")
        .arg(&path)
        .args(["--root-label", "Person"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "// Hash lookup for JsonNode nodes\nCREATE INDEX FOR (n:JsonNode) ON (n._hash);",
        ))
        .stdout(predicate::str::contains(
            "ON CREATE SET n += {name: 'Alice'} SET n:Person;",
        ))
        .stdout(predicate::str::contains("SET n:tagsArray;"))
        .stdout(predicate::str::contains("MERGE (a)-[:ELEMENT_1]->(b);"))
        .stdout(predicate::str::contains("// $.tags[1]"));
}

#[test]
fn test_cypher_clear_and_dialect() {
    let (_dir, path) = write_input("doc.json", r#"{"a": 1}"#);

    json2graph_cmd()
        .arg("cypher")
        .arg(&path)
        .args(["--dialect", "neo4j", "--clear", "--no-comments"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("MATCH (n) DETACH DELETE n;\n\n"))
        .stdout(predicate::str::contains("IF NOT EXISTS"))
        .stdout(predicate::str::contains("SET n:Root;"))
        .stdout(predicate::str::contains("//").not());
}

#[test]
fn test_cypher_to_output_file() {
    let (dir, path) = write_input("doc.json", "[1, 2]");
    let output = dir.path().join("out.cypher");

    json2graph_cmd()
        .arg("cypher")
        .arg(&path)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let script = fs::read_to_string(&output).unwrap();
    assert_eq!(script.matches("MERGE (n:JsonNode").count(), 3);
}

#[test]
fn test_cypher_with_config_file() {
    let (dir, path) = write_input("doc.json", r#"{"k": {"v": 1}}"#);
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"node_label": "Item", "hash_property": "digest", "root_label": "Top"}"#,
    )
    .unwrap();

    json2graph_cmd()
        .arg("cypher")
        .arg(&path)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE INDEX FOR (n:Item) ON (n.digest);"))
        .stdout(predicate::str::contains("SET n:Top;"));
}

#[test]
fn test_cypher_unknown_dialect() {
    let (_dir, path) = write_input("doc.json", "{}");

    json2graph_cmd()
        .arg("cypher")
        .arg(&path)
        .args(["--dialect", "sqlite"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown Cypher dialect"));
}

// ============================================================================
// hash
// ============================================================================

#[test]
fn test_hash_matches_library() {
    let (_dir, path) = write_input("person.json", PERSON);
    let expected = content_hash(&json!({"name": "Alice", "tags": ["x", "y"]}));

    json2graph_cmd()
        .arg("hash")
        .arg(&path)
        .assert()
        .success()
        .stdout(format!("{}\n", expected));
}

#[test]
fn test_hash_ignores_formatting_and_key_order() {
    let (_dir, a) = write_input("a.json", r#"{"b": [1, 2], "a": "x"}"#);
    let (_dir2, b) = write_input("b.json", "{\n  \"a\": \"x\",\n  \"b\": [1,2]\n}");

    let first = json2graph_cmd().arg("hash").arg(&a).output().unwrap();
    let second = json2graph_cmd().arg("hash").arg(&b).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_hash_with_pointer() {
    let (_dir, path) = write_input("person.json", PERSON);
    let expected = content_hash(&json!("y"));

    json2graph_cmd()
        .arg("hash")
        .arg(&path)
        .args(["--pointer", "/tags/1"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected));
}

#[test]
fn test_hash_missing_pointer() {
    let (_dir, path) = write_input("person.json", PERSON);

    json2graph_cmd()
        .arg("hash")
        .arg(&path)
        .args(["--pointer", "/nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no value at JSON pointer '/nope'"));
}

// ============================================================================
// stats
// ============================================================================

#[test]
fn test_stats_reports_duplicates() {
    let (_dir, path) = write_input(
        "people.json",
        r#"{"home": {"city": "Delft"}, "work": {"city": "Delft"}, "tags": ["a", "a"]}"#,
    );

    json2graph_cmd()
        .arg("stats")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Values:        6"))
        .stdout(predicate::str::contains("Nodes:         4"))
        .stdout(predicate::str::contains("Duplicates:    2 (33.3%)"))
        .stdout(predicate::str::contains("Relationships: 5"));
}

#[test]
fn test_stats_json() {
    let (_dir, path) = write_input("person.json", PERSON);

    let output = json2graph_cmd()
        .arg("stats")
        .arg(&path)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["nodes"], 4);
    assert_eq!(stats["relationships"], 3);
    assert_eq!(stats["properties"], 1);
    assert_eq!(stats["depth"], 3);
}

// ============================================================================
// errors
// ============================================================================

#[test]
fn test_invalid_json() {
    let (_dir, path) = write_input("bad.json", r#"{"a": "#);

    json2graph_cmd()
        .arg("cypher")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn test_missing_file() {
    json2graph_cmd()
        .arg("stats")
        .arg("/nonexistent/input.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_max_file_size_env() {
    let (_dir, path) = write_input("person.json", PERSON);

    json2graph_cmd()
        .env("JSON2GRAPH_MAX_FILE_SIZE", "10")
        .arg("hash")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

#[test]
fn test_depth_limit_from_config() {
    let (dir, path) = write_input("deep.json", r#"{"a": {"b": {"c": {}}}}"#);
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"max_depth": 2}"#).unwrap();

    json2graph_cmd()
        .arg("stats")
        .arg(&path)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds maximum allowed depth 2"));
}

#[cfg(not(feature = "falkordb"))]
#[test]
fn test_import_requires_feature() {
    let (_dir, path) = write_input("person.json", PERSON);

    json2graph_cmd()
        .arg("import")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("'falkordb' feature is not enabled"));
}
