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

//! In-memory property graph.

use super::QueryExecutor;
use crate::cypher::{CypherStatement, CypherValue};
use crate::emitter::GraphWrite;
use crate::error::StoreError;
use crate::hash::ContentHash;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A node held by a [`MemoryGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredNode {
    /// Content hash.
    pub hash: ContentHash,
    /// Labels in the order they were applied.
    pub labels: Vec<String>,
    /// Properties set on creation.
    pub properties: BTreeMap<String, CypherValue>,
}

impl StoredNode {
    /// Whether the node carries `label`.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    fn add_label(&mut self, label: &str) {
        if !self.has_label(label) {
            self.labels.push(label.to_string());
        }
    }
}

/// A relationship held by a [`MemoryGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoredRelationship {
    /// Source node.
    pub from: ContentHash,
    /// Target node.
    pub to: ContentHash,
    /// Relationship type.
    pub rel_type: String,
}

/// A failure a [`MemoryGraph`] can be told to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Reject node writes that would apply this label.
    NodeLabel(String),
    /// Reject relationship writes of this type.
    RelationshipType(String),
    /// Reject everything with a connection error.
    Offline,
}

/// Property graph kept in memory, with `MERGE` semantics.
///
/// Writes are applied from the [`GraphWrite`] attached to each statement,
/// so no Cypher is parsed. The graph is stricter than a real store in one
/// respect: a label or relationship write that names a missing node is
/// rejected instead of silently matching nothing, which makes ordering
/// mistakes visible in tests.
///
/// # Examples
///
/// ```
/// use json2graph::{JsonImporter, MemoryGraph};
/// use serde_json::json;
///
/// let mut importer = JsonImporter::new(MemoryGraph::new());
/// importer.convert(&json!({"name": "Alice"}), "Person").unwrap();
/// assert_eq!(importer.executor().nodes_with_label("Person").len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    nodes: Vec<StoredNode>,
    index: HashMap<ContentHash, usize>,
    relationships: BTreeSet<StoredRelationship>,
    indexes: BTreeSet<(String, String)>,
    faults: Vec<Fault>,
    history: Vec<CypherStatement>,
}

impl MemoryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce `fault` on matching writes until [`clear_faults`](Self::clear_faults).
    pub fn inject(&mut self, fault: Fault) {
        self.faults.push(fault);
    }

    /// Remove all injected faults.
    pub fn clear_faults(&mut self) {
        self.faults.clear();
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of relationships.
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Node with the given hash.
    pub fn node(&self, hash: &ContentHash) -> Option<&StoredNode> {
        self.index.get(hash).map(|&i| &self.nodes[i])
    }

    /// All nodes, in creation order.
    pub fn nodes(&self) -> &[StoredNode] {
        &self.nodes
    }

    /// Nodes carrying `label`, in creation order.
    pub fn nodes_with_label(&self, label: &str) -> Vec<&StoredNode> {
        self.nodes.iter().filter(|n| n.has_label(label)).collect()
    }

    /// All relationships, ordered by source, target and type.
    pub fn relationships(&self) -> impl Iterator<Item = &StoredRelationship> {
        self.relationships.iter()
    }

    /// Target of the `rel_type` relationship leaving `from`, if any.
    pub fn target_of(&self, from: &ContentHash, rel_type: &str) -> Option<&ContentHash> {
        self.relationships
            .iter()
            .find(|r| &r.from == from && r.rel_type == rel_type)
            .map(|r| &r.to)
    }

    /// Whether an index exists on `property` for `label`.
    pub fn has_index(&self, label: &str, property: &str) -> bool {
        self.indexes
            .contains(&(label.to_string(), property.to_string()))
    }

    /// Statements accepted so far, in order.
    pub fn history(&self) -> &[CypherStatement] {
        &self.history
    }

    fn check_label(&self, label: &str) -> Result<(), StoreError> {
        let rejected = self
            .faults
            .iter()
            .any(|f| matches!(f, Fault::NodeLabel(l) if l == label));
        if rejected {
            return Err(StoreError::Query(format!("write with label {} rejected", label)));
        }
        Ok(())
    }

    fn node_mut(&mut self, hash: &ContentHash) -> Result<&mut StoredNode, StoreError> {
        match self.index.get(hash) {
            Some(&i) => Ok(&mut self.nodes[i]),
            None => Err(StoreError::Query(format!("no node with hash {}", hash))),
        }
    }

    fn apply(&mut self, write: &GraphWrite) -> Result<(), StoreError> {
        match write {
            GraphWrite::CreateIndex { label, property } => {
                if !self.indexes.insert((label.clone(), property.clone())) {
                    return Err(StoreError::Query(format!(
                        "index on {}.{} already exists",
                        label, property
                    )));
                }
            }
            GraphWrite::UpsertNode {
                hash,
                labels,
                properties,
            } => {
                for label in labels {
                    self.check_label(label)?;
                }
                match self.index.get(hash) {
                    Some(&i) => {
                        for label in labels {
                            self.nodes[i].add_label(label);
                        }
                    }
                    None => {
                        let mut node = StoredNode {
                            hash: hash.clone(),
                            labels: Vec::with_capacity(labels.len()),
                            properties: properties.clone(),
                        };
                        for label in labels {
                            node.add_label(label);
                        }
                        self.index.insert(hash.clone(), self.nodes.len());
                        self.nodes.push(node);
                    }
                }
            }
            GraphWrite::AddLabel { hash, label } => {
                self.check_label(label)?;
                self.node_mut(hash)?.add_label(label);
            }
            GraphWrite::Relate { from, to, rel_type } => {
                let rejected = self
                    .faults
                    .iter()
                    .any(|f| matches!(f, Fault::RelationshipType(t) if t == rel_type));
                if rejected {
                    return Err(StoreError::Query(format!(
                        "relationship {} rejected",
                        rel_type
                    )));
                }
                for end in [from, to] {
                    if !self.index.contains_key(end) {
                        return Err(StoreError::Query(format!("no node with hash {}", end)));
                    }
                }
                self.relationships.insert(StoredRelationship {
                    from: from.clone(),
                    to: to.clone(),
                    rel_type: rel_type.clone(),
                });
            }
            GraphWrite::Clear => {
                self.nodes.clear();
                self.index.clear();
                self.relationships.clear();
            }
        }
        Ok(())
    }
}

impl QueryExecutor for MemoryGraph {
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), StoreError> {
        if self.faults.contains(&Fault::Offline) {
            return Err(StoreError::Connection("graph is offline".to_string()));
        }
        let write = statement.write.as_ref().ok_or_else(|| {
            StoreError::Query(format!("cannot run raw Cypher: {}", statement.query))
        })?;
        self.apply(write)?;
        self.history.push(statement.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportConfig;
    use crate::cypher::StatementType;
    use crate::emitter::QueryEmitter;
    use crate::hash::content_hash;
    use serde_json::json;

    #[test]
    fn test_upsert_is_idempotent() {
        let config = ImportConfig::default();
        let emitter = QueryEmitter::new(&config);
        let hash = content_hash(&json!({"a": 1}));
        let mut props = BTreeMap::new();
        props.insert("a".to_string(), CypherValue::Int(1));

        let mut graph = MemoryGraph::new();
        let stmt = emitter.node_upsert("Thing", props, &hash);
        graph.execute(&stmt).unwrap();
        graph.execute(&stmt).unwrap();

        assert_eq!(graph.node_count(), 1);
        let node = graph.node(&hash).unwrap();
        assert_eq!(node.labels, vec!["JsonNode", "Thing"]);
        assert_eq!(node.properties["a"], CypherValue::Int(1));
    }

    #[test]
    fn test_upsert_existing_node_adds_label_only() {
        let config = ImportConfig::default();
        let emitter = QueryEmitter::new(&config);
        let hash = content_hash(&json!(1));
        let mut graph = MemoryGraph::new();

        let mut props = BTreeMap::new();
        props.insert("value".to_string(), CypherValue::Int(1));
        graph
            .execute(&emitter.node_upsert("first", props, &hash))
            .unwrap();
        let mut other = BTreeMap::new();
        other.insert("value".to_string(), CypherValue::Int(99));
        graph
            .execute(&emitter.node_upsert("second", other, &hash))
            .unwrap();

        let node = graph.node(&hash).unwrap();
        assert_eq!(node.labels, vec!["JsonNode", "first", "second"]);
        assert_eq!(node.properties["value"], CypherValue::Int(1));
    }

    #[test]
    fn test_relationship_requires_both_nodes() {
        let config = ImportConfig::default();
        let emitter = QueryEmitter::new(&config);
        let a = content_hash(&json!("a"));
        let b = content_hash(&json!("b"));
        let mut graph = MemoryGraph::new();
        graph
            .execute(&emitter.node_upsert("x", BTreeMap::new(), &a))
            .unwrap();

        let rel = emitter.relationship(&a, &b, "ELEMENT_0");
        assert!(matches!(graph.execute(&rel), Err(StoreError::Query(_))));

        graph
            .execute(&emitter.node_upsert("x", BTreeMap::new(), &b))
            .unwrap();
        graph.execute(&rel).unwrap();
        graph.execute(&rel).unwrap();
        assert_eq!(graph.relationship_count(), 1);
        assert_eq!(graph.target_of(&a, "ELEMENT_0"), Some(&b));
    }

    #[test]
    fn test_second_index_is_rejected() {
        let config = ImportConfig::default();
        let stmt = QueryEmitter::new(&config).hash_index();
        let mut graph = MemoryGraph::new();

        graph.execute(&stmt).unwrap();
        assert!(graph.has_index("JsonNode", "_hash"));
        assert!(matches!(graph.execute(&stmt), Err(StoreError::Query(_))));
    }

    #[test]
    fn test_clear_keeps_indexes() {
        let config = ImportConfig::default();
        let emitter = QueryEmitter::new(&config);
        let mut graph = MemoryGraph::new();
        graph.execute(&emitter.hash_index()).unwrap();
        graph
            .execute(&emitter.node_upsert("x", BTreeMap::new(), &content_hash(&json!(1))))
            .unwrap();

        graph.execute(&emitter.clear()).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert!(graph.has_index("JsonNode", "_hash"));
    }

    #[test]
    fn test_faults() {
        let config = ImportConfig::default();
        let emitter = QueryEmitter::new(&config);
        let hash = content_hash(&json!(1));
        let mut graph = MemoryGraph::new();

        graph.inject(Fault::NodeLabel("bad".to_string()));
        let err = graph
            .execute(&emitter.node_upsert("bad", BTreeMap::new(), &hash))
            .unwrap_err();
        assert!(!err.is_connection());
        graph
            .execute(&emitter.node_upsert("good", BTreeMap::new(), &hash))
            .unwrap();

        graph.inject(Fault::Offline);
        let err = graph.execute(&emitter.clear()).unwrap_err();
        assert!(err.is_connection());
        assert_eq!(graph.node_count(), 1);

        graph.clear_faults();
        graph.execute(&emitter.clear()).unwrap();
        assert_eq!(graph.history().len(), 2);
    }

    #[test]
    fn test_raw_cypher_is_rejected() {
        let mut graph = MemoryGraph::new();
        let stmt = CypherStatement::new("RETURN 1", StatementType::UpsertNode);
        assert!(matches!(graph.execute(&stmt), Err(StoreError::Query(_))));
    }
}
