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

//! Translation of graph writes into parameterized Cypher.
//!
//! Every statement the importer sends to a store is built here. Values only
//! ever travel as bound parameters (`$hash`, `$props`, `$from`, `$to`);
//! labels and relationship types, which Cypher cannot parameterize, are
//! sanitized and escaped before they are spliced into the query text.
//!
//! Nodes are written with `MERGE` keyed by the content hash, never with a
//! bare `CREATE`, so replaying an import is harmless. The hash lookup is
//! backed by an index on the shared node label (see [`QueryEmitter::hash_index`]).

use crate::config::{CypherDialect, ImportConfig};
use crate::cypher::{
    escape_identifier, escape_label, escape_relationship_type, sanitize_label, CypherStatement,
    CypherValue, StatementType,
};
use crate::hash::ContentHash;
use std::collections::BTreeMap;

/// A single write against the graph, independent of query syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphWrite {
    /// Index on `property` for nodes labeled `label`.
    CreateIndex {
        /// Indexed label.
        label: String,
        /// Indexed property.
        property: String,
    },
    /// Match-or-create the node identified by `hash`.
    UpsertNode {
        /// Content hash of the node.
        hash: ContentHash,
        /// Labels, shared label first and most specific last.
        labels: Vec<String>,
        /// Scalar properties set when the node is created.
        properties: BTreeMap<String, CypherValue>,
    },
    /// Add a label to an existing node.
    AddLabel {
        /// Content hash of the node.
        hash: ContentHash,
        /// Label to add.
        label: String,
    },
    /// Match-or-create a directed relationship.
    Relate {
        /// Source node.
        from: ContentHash,
        /// Target node.
        to: ContentHash,
        /// Relationship type.
        rel_type: String,
    },
    /// Delete every node and relationship.
    Clear,
}

/// Builds Cypher statements for the configured label and hash property.
#[derive(Debug, Clone)]
pub struct QueryEmitter<'a> {
    config: &'a ImportConfig,
    node_label: String,
}

impl<'a> QueryEmitter<'a> {
    /// Create an emitter for `config`.
    pub fn new(config: &'a ImportConfig) -> Self {
        Self {
            config,
            node_label: sanitize_label(&config.node_label),
        }
    }

    /// The label shared by every imported node.
    pub fn node_label(&self) -> &str {
        &self.node_label
    }

    fn node_pattern(&self, var: &str, param: &str) -> String {
        format!(
            "({}{} {{{}: ${}}})",
            var,
            escape_label(&self.node_label),
            escape_identifier(&self.config.hash_property),
            param
        )
    }

    /// Index on the hash property of the shared node label.
    pub fn hash_index(&self) -> CypherStatement {
        let label = escape_label(&self.node_label);
        let property = escape_identifier(&self.config.hash_property);
        let query = match self.config.dialect {
            CypherDialect::FalkorDb => {
                format!("CREATE INDEX FOR (n{}) ON (n.{})", label, property)
            }
            CypherDialect::Neo4j => {
                let name = escape_identifier(&format!(
                    "{}_{}",
                    self.node_label.to_lowercase(),
                    self.config.hash_property
                ));
                format!(
                    "CREATE INDEX {} IF NOT EXISTS FOR (n{}) ON (n.{})",
                    name, label, property
                )
            }
        };

        CypherStatement::new(query, StatementType::Index)
            .with_comment(format!("Hash lookup for {} nodes", self.node_label))
            .with_write(GraphWrite::CreateIndex {
                label: self.node_label.clone(),
                property: self.config.hash_property.clone(),
            })
    }

    /// Match-or-create the node for `hash`, adding `label` and setting
    /// `properties` when it is first created.
    pub fn node_upsert(
        &self,
        label: &str,
        properties: BTreeMap<String, CypherValue>,
        hash: &ContentHash,
    ) -> CypherStatement {
        let label = sanitize_label(label);
        let mut query = format!("MERGE {}", self.node_pattern("n", "hash"));
        if !properties.is_empty() {
            query.push_str(" ON CREATE SET n += $props");
        }
        if label != self.node_label {
            query.push_str(&format!(" SET n{}", escape_label(&label)));
        }

        let mut labels = vec![self.node_label.clone()];
        if label != self.node_label {
            labels.push(label);
        }

        let mut statement = CypherStatement::new(query, StatementType::UpsertNode)
            .with_param("hash", hash.as_str());
        if !properties.is_empty() {
            statement = statement.with_param("props", properties.clone());
        }
        statement.with_write(GraphWrite::UpsertNode {
            hash: hash.clone(),
            labels,
            properties,
        })
    }

    /// Add `label` to the existing node for `hash`.
    pub fn add_label(&self, hash: &ContentHash, label: &str) -> CypherStatement {
        let label = sanitize_label(label);
        let query = format!(
            "MATCH {} SET n{}",
            self.node_pattern("n", "hash"),
            escape_label(&label)
        );

        CypherStatement::new(query, StatementType::AddLabel)
            .with_param("hash", hash.as_str())
            .with_write(GraphWrite::AddLabel {
                hash: hash.clone(),
                label,
            })
    }

    /// Match-or-create `(from)-[:rel_type]->(to)`.
    pub fn relationship(
        &self,
        from: &ContentHash,
        to: &ContentHash,
        rel_type: &str,
    ) -> CypherStatement {
        let rel_type = sanitize_label(rel_type);
        let query = format!(
            "MATCH {}, {} MERGE (a)-[{}]->(b)",
            self.node_pattern("a", "from"),
            self.node_pattern("b", "to"),
            escape_relationship_type(&rel_type)
        );

        CypherStatement::new(query, StatementType::MergeRelationship)
            .with_param("from", from.as_str())
            .with_param("to", to.as_str())
            .with_write(GraphWrite::Relate {
                from: from.clone(),
                to: to.clone(),
                rel_type,
            })
    }

    /// Delete every node and relationship in the graph.
    pub fn clear(&self) -> CypherStatement {
        CypherStatement::new("MATCH (n) DETACH DELETE n", StatementType::ClearGraph)
            .with_comment("Remove all nodes and relationships")
            .with_write(GraphWrite::Clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::content_hash;
    use serde_json::json;

    fn props(pairs: &[(&str, CypherValue)]) -> BTreeMap<String, CypherValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_hash_index_falkordb() {
        let config = ImportConfig::default();
        let stmt = QueryEmitter::new(&config).hash_index();
        assert_eq!(stmt.query, "CREATE INDEX FOR (n:JsonNode) ON (n._hash)");
        assert_eq!(stmt.statement_type, StatementType::Index);
    }

    #[test]
    fn test_hash_index_neo4j() {
        let config = ImportConfig::default().with_dialect(CypherDialect::Neo4j);
        let stmt = QueryEmitter::new(&config).hash_index();
        assert_eq!(
            stmt.query,
            "CREATE INDEX jsonnode__hash IF NOT EXISTS FOR (n:JsonNode) ON (n._hash)"
        );
    }

    #[test]
    fn test_node_upsert_uses_merge_and_parameters() {
        let config = ImportConfig::default();
        let hash = content_hash(&json!({"name": "Alice"}));
        let stmt = QueryEmitter::new(&config).node_upsert(
            "Person",
            props(&[("name", CypherValue::from("Alice"))]),
            &hash,
        );

        assert_eq!(
            stmt.query,
            "MERGE (n:JsonNode {_hash: $hash}) ON CREATE SET n += $props SET n:Person"
        );
        assert!(!stmt.query.contains("CREATE (n"));
        assert_eq!(stmt.parameters["hash"], CypherValue::from(hash.as_str()));
        assert_eq!(
            stmt.parameters["props"].as_map().unwrap()["name"],
            CypherValue::from("Alice")
        );
        match stmt.write {
            Some(GraphWrite::UpsertNode { labels, .. }) => {
                assert_eq!(labels, vec!["JsonNode".to_string(), "Person".to_string()]);
            }
            other => panic!("unexpected write: {:?}", other),
        }
    }

    #[test]
    fn test_node_upsert_without_properties() {
        let config = ImportConfig::default();
        let hash = content_hash(&json!({}));
        let stmt = QueryEmitter::new(&config).node_upsert("empty", BTreeMap::new(), &hash);

        assert_eq!(stmt.query, "MERGE (n:JsonNode {_hash: $hash}) SET n:empty");
        assert!(!stmt.parameters.contains_key("props"));
    }

    #[test]
    fn test_node_upsert_sanitizes_label() {
        let config = ImportConfig::default();
        let hash = content_hash(&json!({}));
        let stmt =
            QueryEmitter::new(&config).node_upsert("x) DETACH DELETE (y", BTreeMap::new(), &hash);

        assert_eq!(
            stmt.query,
            "MERGE (n:JsonNode {_hash: $hash}) SET n:x_DETACH_DELETE_y"
        );
    }

    #[test]
    fn test_node_upsert_keyword_label() {
        let config = ImportConfig::default();
        let hash = content_hash(&json!({}));
        let stmt = QueryEmitter::new(&config).node_upsert("match", BTreeMap::new(), &hash);
        assert!(stmt.query.ends_with("SET n:`match`"));
    }

    #[test]
    fn test_add_label() {
        let config = ImportConfig::default();
        let hash = content_hash(&json!("x"));
        let stmt = QueryEmitter::new(&config).add_label(&hash, "labels");
        assert_eq!(stmt.query, "MATCH (n:JsonNode {_hash: $hash}) SET n:labels");
        assert_eq!(stmt.statement_type, StatementType::AddLabel);
    }

    #[test]
    fn test_relationship() {
        let config = ImportConfig::default();
        let a = content_hash(&json!(1));
        let b = content_hash(&json!(2));
        let stmt = QueryEmitter::new(&config).relationship(&a, &b, "ELEMENT_0");

        assert_eq!(
            stmt.query,
            "MATCH (a:JsonNode {_hash: $from}), (b:JsonNode {_hash: $to}) MERGE (a)-[:ELEMENT_0]->(b)"
        );
        assert_eq!(stmt.parameters.len(), 2);
    }

    #[test]
    fn test_custom_hash_property_is_escaped() {
        let config = ImportConfig::builder()
            .hash_property("content hash")
            .node_label("Doc")
            .build();
        let hash = content_hash(&json!(1));
        let stmt = QueryEmitter::new(&config).add_label(&hash, "x");
        assert_eq!(stmt.query, "MATCH (n:Doc {`content hash`: $hash}) SET n:x");
    }

    #[test]
    fn test_clear() {
        let config = ImportConfig::default();
        let stmt = QueryEmitter::new(&config).clear();
        assert_eq!(stmt.query, "MATCH (n) DETACH DELETE n");
        assert_eq!(stmt.write, Some(GraphWrite::Clear));
    }
}
