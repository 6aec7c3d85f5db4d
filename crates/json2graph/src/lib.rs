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

//! Content-addressed import of JSON documents into property graphs.
//!
//! A JSON value is decomposed into nodes and relationships and written to a
//! Cypher-speaking graph store. Every sub-value is identified by the SHA-256
//! digest of its canonical form, so structurally identical values anywhere
//! in a document (or across documents) become a single node.
//!
//! # Mapping
//!
//! | JSON | Graph |
//! |------|-------|
//! | Object | Node labeled by its key (root: the caller's root label) |
//! | Primitive object entry | Property on the object's node (`null` is skipped) |
//! | Object entry holding a container | Relationship typed by the key |
//! | Array | Node labeled `<key>Array` |
//! | Array element | Node labeled by the array's key, linked by `ELEMENT_<i>` |
//! | Primitive element or root | Node with a single `value` property |
//!
//! Every node also carries the shared `JsonNode` label and its content hash
//! in the `_hash` property, which is indexed.
//!
//! # Example
//!
//! ```rust
//! use json2graph::{JsonImporter, MemoryGraph, content_hash};
//! use serde_json::json;
//!
//! let doc = json!({"name": "Alice", "tags": ["x", "y"]});
//! let mut importer = JsonImporter::new(MemoryGraph::new());
//! let report = importer.convert(&doc, "Person")?;
//!
//! let graph = importer.executor();
//! let root = graph.node(&content_hash(&doc)).unwrap();
//! assert_eq!(root.labels, vec!["JsonNode", "Person"]);
//! assert_eq!(report.relationships_created, 3);
//! # Ok::<(), json2graph::GraphError>(())
//! ```
//!
//! # Generated Cypher
//!
//! Values are always bound parameters. The statements for the example above:
//!
//! ```cypher
//! CREATE INDEX FOR (n:JsonNode) ON (n._hash);
//! MERGE (n:JsonNode {_hash: $hash}) ON CREATE SET n += $props SET n:Person;
//! MERGE (n:JsonNode {_hash: $hash}) SET n:tagsArray;
//! MATCH (a:JsonNode {_hash: $from}), (b:JsonNode {_hash: $to}) MERGE (a)-[:tags]->(b);
//! MERGE (n:JsonNode {_hash: $hash}) ON CREATE SET n += $props SET n:tags;
//! MATCH (a:JsonNode {_hash: $from}), (b:JsonNode {_hash: $to}) MERGE (a)-[:ELEMENT_0]->(b);
//! ...
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod builder;
pub mod cache;
pub mod config;
pub mod cypher;
pub mod emitter;
pub mod error;
pub mod executor;
pub mod hash;
pub mod importer;
pub mod path;
pub mod report;
pub mod validate;

// Re-export main types at crate root for convenience
pub use builder::GraphBuilder;
pub use cache::NodeCache;
pub use config::{
    CypherDialect, ImportConfig, ImportConfigBuilder, DEFAULT_MAX_DEPTH, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_MAX_STRING_LENGTH,
};
pub use cypher::{sanitize_label, CypherScript, CypherStatement, CypherValue, StatementType};
pub use emitter::{GraphWrite, QueryEmitter};
pub use error::{GraphError, Result, StoreError};
pub use executor::{Fault, MemoryGraph, QueryExecutor, ScriptRecorder};
pub use hash::{canonical_bytes, content_hash, ContentHash, SubtreeHashes};
pub use importer::{parse_json, read_json, to_cypher_script, JsonImporter};
pub use report::{ImportReport, ImportWarning, NodeFailure};
pub use validate::{validate, ValidationSummary};

#[cfg(feature = "falkordb")]
pub use executor::FalkorDbExecutor;

/// The Redis client crate, for building connections handed to
/// [`FalkorDbExecutor::new`].
#[cfg(feature = "falkordb")]
pub use redis;
