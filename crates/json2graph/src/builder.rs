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

//! Decomposition of a JSON tree into nodes and relationships.
//!
//! The walk is depth-first over an explicit worklist and emits in pre-order:
//! a node is written before any of its children are visited, and the
//! relationship from its parent is written right after the node itself.
//! Children therefore always find their parent already in the store.
//!
//! Nodes already seen by this importer are not written again. A node that is
//! reached under a new label only gets that label added. Its subtree is
//! still walked, because the children may be reached under new labels or
//! new relationship types as well.

use crate::cache::NodeCache;
use crate::config::ImportConfig;
use crate::cypher::{
    element_relationship, relationship_type, sanitize_label, CypherStatement, CypherValue,
};
use crate::emitter::QueryEmitter;
use crate::error::{Result, StoreError};
use crate::executor::QueryExecutor;
use crate::hash::{ContentHash, SubtreeHashes};
use crate::path::{child_index, child_key, ROOT};
use crate::report::{ImportReport, NodeFailure};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Label for objects reached without a label hint.
pub const DEFAULT_OBJECT_LABEL: &str = "Object";

/// Label for primitives reached without a label hint.
pub const DEFAULT_PRIMITIVE_LABEL: &str = "Primitive";

/// Derive the label of `value` from the key (or root label) it was reached by.
///
/// ```
/// # use json2graph::builder::label_for;
/// # use serde_json::json;
/// assert_eq!(label_for(&json!({}), "author", "Array"), "author");
/// assert_eq!(label_for(&json!([]), "tags", "Array"), "tagsArray");
/// assert_eq!(label_for(&json!([]), "", "Array"), "Array");
/// assert_eq!(label_for(&json!(1), "", "Array"), "Primitive");
/// ```
pub fn label_for(value: &Value, hint: &str, array_suffix: &str) -> String {
    match value {
        Value::Array(_) => sanitize_label(&format!("{}{}", hint, array_suffix)),
        _ if !hint.is_empty() => sanitize_label(hint),
        Value::Object(_) => DEFAULT_OBJECT_LABEL.to_string(),
        _ => DEFAULT_PRIMITIVE_LABEL.to_string(),
    }
}

/// One pending value on the worklist.
struct Visit<'v> {
    value: &'v Value,
    hint: &'v str,
    path: String,
    parent: Option<(ContentHash, String)>,
}

/// Walks one document and writes it through an executor.
///
/// The builder borrows the importer's cache and executor for the duration of
/// a single [`build`](GraphBuilder::build).
pub struct GraphBuilder<'a, E: QueryExecutor + ?Sized> {
    config: &'a ImportConfig,
    emitter: QueryEmitter<'a>,
    cache: &'a mut NodeCache,
    executor: &'a mut E,
    report: ImportReport,
}

impl<'a, E: QueryExecutor + ?Sized> GraphBuilder<'a, E> {
    /// Create a builder over borrowed session state.
    pub fn new(config: &'a ImportConfig, cache: &'a mut NodeCache, executor: &'a mut E) -> Self {
        Self {
            config,
            emitter: QueryEmitter::new(config),
            cache,
            executor,
            report: ImportReport::default(),
        }
    }

    /// Write `value` with `root_label` as the label of the document root.
    ///
    /// Store failures do not abort the walk. A failed node abandons its own
    /// subtree and is recorded in [`ImportReport::failures`]; a failed
    /// relationship or label is recorded in [`ImportReport::warnings`].
    /// Only values that cannot be encoded at all end the walk with an error.
    pub fn build(mut self, value: &Value, root_label: &str) -> Result<ImportReport> {
        let hashes = SubtreeHashes::new(value);
        debug!(
            root = %hashes.root().short(),
            bytes = hashes.bytes_hashed(),
            "hashed document"
        );

        let mut worklist = vec![Visit {
            value,
            hint: root_label,
            path: ROOT.to_string(),
            parent: None,
        }];

        while let Some(visit) = worklist.pop() {
            let label = label_for(visit.value, visit.hint, &self.config.array_suffix);
            let hash = hashes.get(visit.value);

            if let Err(error) = self.write_node(visit.value, &label, &hash, &visit.path)? {
                warn!(
                    path = %visit.path,
                    hash = %hash.short(),
                    %error,
                    "node write failed, skipping subtree"
                );
                self.report.failures.push(NodeFailure {
                    path: visit.path,
                    error,
                });
                continue;
            }

            match &visit.parent {
                Some((parent, rel_type)) => {
                    self.write_relationship(parent, &hash, rel_type, &visit.path)
                }
                None => self.report.root = Some(hash.clone()),
            }

            push_children(&mut worklist, visit.value, visit.hint, &visit.path, &hash);
        }

        Ok(self.report)
    }

    /// Outer error: the value cannot be encoded. Inner error: the store
    /// rejected the node.
    fn write_node(
        &mut self,
        value: &Value,
        label: &str,
        hash: &ContentHash,
        path: &str,
    ) -> Result<std::result::Result<(), StoreError>> {
        if self.cache.has_label(hash, label) {
            debug!(path, hash = %hash.short(), label, "node already written");
            self.report.nodes_reused += 1;
            return Ok(Ok(()));
        }

        if self.cache.has(hash) {
            debug!(path, hash = %hash.short(), label, "adding label to known node");
            self.report.nodes_reused += 1;
            let statement = self.emitter.add_label(hash, label).with_comment(path);
            match self.run(&statement) {
                Ok(()) => {
                    self.cache.mark(hash.clone(), label);
                    self.report.labels_added += 1;
                }
                Err(error) => {
                    warn!(path, hash = %hash.short(), label, %error, "label write failed");
                    self.report
                        .warn(path, format!("could not add label {}: {}", label, error));
                }
            }
            return Ok(Ok(()));
        }

        let properties = self.properties(value, path)?;
        debug!(path, hash = %hash.short(), label, "creating node");
        let statement = self
            .emitter
            .node_upsert(label, properties, hash)
            .with_comment(path);
        if let Err(error) = self.run(&statement) {
            return Ok(Err(error));
        }
        self.cache.mark(hash.clone(), label);
        self.report.nodes_created += 1;
        Ok(Ok(()))
    }

    fn write_relationship(
        &mut self,
        from: &ContentHash,
        to: &ContentHash,
        rel_type: &str,
        path: &str,
    ) {
        if self.cache.has_relationship(from, to, rel_type) {
            self.report.relationships_reused += 1;
            return;
        }

        let statement = self
            .emitter
            .relationship(from, to, rel_type)
            .with_comment(path);
        match self.run(&statement) {
            Ok(()) => {
                self.cache.mark_relationship(from.clone(), to.clone(), rel_type);
                self.report.relationships_created += 1;
            }
            Err(error) => {
                warn!(path, rel_type, %error, "relationship write failed");
                self.report.warn(
                    path,
                    format!("could not link to parent via {}: {}", rel_type, error),
                );
            }
        }
    }

    /// Scalar properties stored on the node for `value`.
    fn properties(&mut self, value: &Value, path: &str) -> Result<BTreeMap<String, CypherValue>> {
        let mut properties = BTreeMap::new();
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    if child.is_null() || child.is_object() || child.is_array() {
                        continue;
                    }
                    if *key == self.config.hash_property {
                        warn!(path, key = %key, "dropping property that shadows the hash property");
                        self.report.warn(
                            child_key(path, key),
                            "property name is reserved for the content hash and was dropped",
                        );
                        continue;
                    }
                    let scalar = CypherValue::from_json_scalar(child, &child_key(path, key))?;
                    properties.insert(key.clone(), scalar);
                }
            }
            Value::Array(_) | Value::Null => {}
            _ => {
                properties.insert(
                    self.config.value_property.clone(),
                    CypherValue::from_json_scalar(value, path)?,
                );
            }
        }
        Ok(properties)
    }

    fn run(&mut self, statement: &CypherStatement) -> std::result::Result<(), StoreError> {
        self.executor.execute(statement)?;
        self.report.statements_executed += 1;
        Ok(())
    }
}

/// Queue the children of `value` so that they pop in document order.
fn push_children<'v>(
    worklist: &mut Vec<Visit<'v>>,
    value: &'v Value,
    hint: &'v str,
    path: &str,
    hash: &ContentHash,
) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&'v String, &'v Value)> = map
                .iter()
                .filter(|(_, child)| child.is_object() || child.is_array())
                .collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (key, child) in entries.into_iter().rev() {
                worklist.push(Visit {
                    value: child,
                    hint: key,
                    path: child_key(path, key),
                    parent: Some((hash.clone(), relationship_type(key))),
                });
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate().rev() {
                worklist.push(Visit {
                    value: child,
                    hint,
                    path: child_index(path, i),
                    parent: Some((hash.clone(), element_relationship(i))),
                });
            }
        }
        _ => {}
    }
}
