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

//! Property-based tests for hashing, labels and import invariants.
//!
//! Test coverage:
//! - Label sanitizer output contract
//! - Hash determinism and key-order independence
//! - One node per distinct sub-value
//! - Idempotent imports
//! - String escaping

use json2graph::{
    content_hash,
    cypher::{escape_label, escape_string, is_valid_label, quote_string},
    sanitize_label, ContentHash, JsonImporter, MemoryGraph,
};
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::HashSet;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

/// Hashes of every value that becomes a node.
fn node_hashes(value: &Value, out: &mut HashSet<ContentHash>) {
    out.insert(content_hash(value));
    match value {
        Value::Object(map) => {
            for child in map.values() {
                if child.is_object() || child.is_array() {
                    node_hashes(child, out);
                }
            }
        }
        Value::Array(items) => {
            for child in items {
                node_hashes(child, out);
            }
        }
        _ => {}
    }
}

fn reversed(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.reverse();
            let mut out = Map::new();
            for (k, v) in entries {
                out.insert(k.clone(), reversed(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(reversed).collect()),
        other => other.clone(),
    }
}

// ============================================================================
// Label Properties
// ============================================================================

proptest! {
    /// Sanitized labels always satisfy the label contract
    #[test]
    fn prop_sanitized_labels_are_valid(s in ".*") {
        let label = sanitize_label(&s);
        prop_assert!(is_valid_label(&label), "{:?} -> {:?}", s, label);
        prop_assert!(!label.contains("__"));
        prop_assert!(!label.starts_with(|c: char| c.is_ascii_digit()));
    }

    /// Sanitizing twice changes nothing
    #[test]
    fn prop_sanitize_is_idempotent(s in ".*") {
        let once = sanitize_label(&s);
        prop_assert_eq!(sanitize_label(&once), once);
    }

    /// Plain identifiers pass through unchanged
    #[test]
    fn prop_plain_identifiers_unchanged(s in "[a-zA-Z][a-zA-Z0-9]{0,12}") {
        prop_assert_eq!(sanitize_label(&s), s);
    }

    /// Escaped labels never leave the label position
    #[test]
    fn prop_escaped_label_is_closed(s in ".*") {
        let escaped = escape_label(&sanitize_label(&s));
        prop_assert!(escaped.starts_with(':'));
        prop_assert!(!escaped.contains(' '));
        prop_assert!(!escaped.contains(')'));
    }
}

// ============================================================================
// String Escaping Properties
// ============================================================================

proptest! {
    /// Quoted strings start and end with a single quote
    #[test]
    fn prop_quote_string_format(s in ".*") {
        let quoted = quote_string(&s);
        prop_assert!(quoted.starts_with('\''));
        prop_assert!(quoted.ends_with('\''));
    }

    /// Every quote in escaped output is preceded by a backslash
    #[test]
    fn prop_escaped_quotes_are_escaped(s in ".*") {
        let escaped = escape_string(&s);
        let mut backslashes = 0usize;
        for c in escaped.chars() {
            if c == '\'' {
                prop_assert!(backslashes % 2 == 1);
            }
            backslashes = if c == '\\' { backslashes + 1 } else { 0 };
        }
    }

    /// Safe strings are not copied
    #[test]
    fn prop_safe_strings_borrowed(s in "[a-zA-Z0-9 ]*") {
        let escaped = escape_string(&s);
        prop_assert!(matches!(escaped, std::borrow::Cow::Borrowed(_)));
    }
}

// ============================================================================
// Hash Properties
// ============================================================================

proptest! {
    /// Hashing is deterministic and well-formed
    #[test]
    fn prop_hash_deterministic(value in arb_json()) {
        let a = content_hash(&value);
        let b = content_hash(&value.clone());
        prop_assert_eq!(a.as_str().len(), 64);
        prop_assert!(a.as_str().chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        prop_assert_eq!(a, b);
    }

    /// Object key order never changes the hash
    #[test]
    fn prop_hash_ignores_key_order(value in arb_json()) {
        prop_assert_eq!(content_hash(&value), content_hash(&reversed(&value)));
    }

    /// Different values hash differently
    #[test]
    fn prop_distinct_values_distinct_hashes(a in arb_json(), b in arb_json()) {
        prop_assume!(a != b);
        prop_assert_ne!(content_hash(&a), content_hash(&b));
    }
}

// ============================================================================
// Import Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The graph holds exactly one node per distinct node-bearing sub-value
    #[test]
    fn prop_one_node_per_distinct_value(value in arb_json()) {
        let mut importer = JsonImporter::new(MemoryGraph::new());
        importer.convert(&value, "Root").unwrap();

        let mut expected = HashSet::new();
        node_hashes(&value, &mut expected);
        let actual: HashSet<ContentHash> = importer
            .executor()
            .nodes()
            .iter()
            .map(|n| n.hash.clone())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Importing twice into the same graph changes nothing
    #[test]
    fn prop_import_idempotent(value in arb_json()) {
        let mut importer = JsonImporter::new(MemoryGraph::new());
        importer.convert(&value, "Root").unwrap();
        let nodes = importer.executor().nodes().to_vec();
        let relationships: Vec<_> = importer.executor().relationships().cloned().collect();

        let graph = importer.into_executor();
        let mut again = JsonImporter::new(graph);
        again.convert(&value, "Root").unwrap();

        prop_assert_eq!(again.executor().nodes(), nodes.as_slice());
        let after: Vec<_> = again.executor().relationships().cloned().collect();
        prop_assert_eq!(after, relationships);
    }

    /// Every node carries the shared label first
    #[test]
    fn prop_shared_label_first(value in arb_json()) {
        let mut importer = JsonImporter::new(MemoryGraph::new());
        importer.convert(&value, "Root").unwrap();
        for node in importer.executor().nodes() {
            prop_assert_eq!(node.labels[0].as_str(), "JsonNode");
            prop_assert!(node.labels.len() >= 2);
        }
    }
}
