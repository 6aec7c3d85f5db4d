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

//! The import session: executor, node cache and configuration together.

use crate::builder::GraphBuilder;
use crate::cache::NodeCache;
use crate::config::ImportConfig;
use crate::cypher::CypherScript;
use crate::emitter::QueryEmitter;
use crate::error::{GraphError, Result};
use crate::executor::{QueryExecutor, ScriptRecorder};
use crate::report::ImportReport;
use crate::validate::validate;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Imports JSON documents into a graph store through an executor.
///
/// The importer owns a [`NodeCache`] that remembers which nodes and
/// relationships it has already written, so repeated sub-values cost one
/// store round trip per session. The cache belongs to this instance only.
///
/// # Examples
///
/// ```
/// use json2graph::{JsonImporter, MemoryGraph};
/// use serde_json::json;
///
/// let mut importer = JsonImporter::new(MemoryGraph::new());
/// let doc = json!({"name": "Alice", "tags": ["x", "y"]});
///
/// let report = importer.convert(&doc, "Person").unwrap();
/// assert_eq!(report.nodes_created, 4);
///
/// // A second run finds everything in the cache.
/// let report = importer.convert(&doc, "Person").unwrap();
/// assert_eq!(report.nodes_created, 0);
/// assert_eq!(importer.executor().node_count(), 4);
/// ```
#[derive(Debug)]
pub struct JsonImporter<E: QueryExecutor> {
    executor: E,
    config: ImportConfig,
    cache: NodeCache,
    index_ready: bool,
}

impl<E: QueryExecutor> JsonImporter<E> {
    /// Create an importer with the default configuration.
    pub fn new(executor: E) -> Self {
        Self::with_config(executor, ImportConfig::default())
    }

    /// Create an importer with a custom configuration.
    pub fn with_config(executor: E, config: ImportConfig) -> Self {
        Self {
            executor,
            config,
            cache: NodeCache::new(),
            index_ready: false,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Nodes and relationships written by this importer so far.
    pub fn cache(&self) -> &NodeCache {
        &self.cache
    }

    /// The executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The executor, mutably.
    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    /// Consume the importer and return its executor.
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Create the hash index unless it was already attempted.
    ///
    /// A store that rejects the statement (typically because the index
    /// exists) is not an error. A store that cannot be reached is.
    pub fn ensure_index(&mut self) -> Result<()> {
        if self.index_ready || !self.config.create_index {
            return Ok(());
        }

        let statement = QueryEmitter::new(&self.config).hash_index();
        match self.executor.execute(&statement) {
            Ok(()) => debug!(query = %statement.query, "hash index created"),
            Err(error) if error.is_connection() => return Err(GraphError::Store(error)),
            Err(error) => warn!(%error, "hash index not created"),
        }
        self.index_ready = true;
        Ok(())
    }

    /// Import `value` with `root_label` as the label of its root node.
    ///
    /// The document is validated first; nothing is written if it breaks a
    /// configured limit. Store failures on individual nodes do not stop the
    /// import. They are collected and returned as
    /// [`GraphError::Incomplete`], which carries the full report.
    ///
    /// # Errors
    ///
    /// - Limit and encoding errors from validation
    /// - [`GraphError::Store`] if the index cannot be created for lack of a
    ///   connection
    /// - [`GraphError::RootNode`] if the root node itself cannot be written
    /// - [`GraphError::Incomplete`] if any other node could not be written
    pub fn convert(&mut self, value: &Value, root_label: &str) -> Result<ImportReport> {
        let summary = validate(value, &self.config)?;
        debug!(
            nodes = summary.nodes,
            properties = summary.properties,
            depth = summary.depth,
            root_label,
            "document validated"
        );

        self.ensure_index()?;

        let mut report = GraphBuilder::new(&self.config, &mut self.cache, &mut self.executor)
            .build(value, root_label)?;
        report.document = summary;

        if let Some(first) = report.failures.first().cloned() {
            let failed = report.failures.len();
            if report.root.is_none() {
                warn!(path = %first.path, "root node not written");
                return Err(GraphError::RootNode {
                    path: first.path,
                    source: first.error,
                });
            }
            warn!(failed, first = %first.path, "import incomplete");
            return Err(GraphError::Incomplete {
                path: first.path,
                source: first.error,
                failed,
                report: Box::new(report),
            });
        }

        info!(
            root = report.root.as_ref().map(|h| h.short()).unwrap_or_default(),
            created = report.nodes_created,
            reused = report.nodes_reused,
            labels = report.labels_added,
            relationships = report.relationships_created,
            warnings = report.warnings.len(),
            "import complete"
        );
        Ok(report)
    }

    /// Read, parse and import the JSON file at `path`.
    ///
    /// Files larger than `max_file_size` are rejected before they are read.
    pub fn load_from_file(
        &mut self,
        path: impl AsRef<Path>,
        root_label: &str,
    ) -> Result<ImportReport> {
        let value = read_json(path.as_ref(), &self.config)?;
        self.convert(&value, root_label)
    }

    /// Delete everything in the store and forget every cached node.
    ///
    /// The cache is only cleared once the store confirmed the wipe, so the
    /// two never disagree about what exists. The hash index survives.
    pub fn clear_db(&mut self) -> Result<()> {
        let statement = QueryEmitter::new(&self.config).clear();
        self.executor
            .execute(&statement)
            .map_err(GraphError::Clear)?;

        let forgotten = self.cache.len();
        self.cache.clear();
        info!(forgotten, "database cleared");
        Ok(())
    }
}

/// The statements an import of `value` into an empty session would run.
///
/// ```
/// use json2graph::{to_cypher_script, ImportConfig, StatementType};
/// use serde_json::json;
///
/// let script = to_cypher_script(&json!([1, 2]), "n", &ImportConfig::default()).unwrap();
/// assert_eq!(script.statements_of_type(StatementType::UpsertNode).len(), 3);
/// ```
pub fn to_cypher_script(
    value: &Value,
    root_label: &str,
    config: &ImportConfig,
) -> Result<CypherScript> {
    let mut importer = JsonImporter::with_config(ScriptRecorder::new(), config.clone());
    importer.convert(value, root_label)?;
    Ok(importer.into_executor().into_script())
}

/// Read and parse a JSON file under the limits in `config`.
///
/// Files larger than `max_file_size` are rejected before they are read.
/// See [`parse_json`] for how nesting depth is handled.
pub fn read_json(path: &Path, config: &ImportConfig) -> Result<Value> {
    let io_error = |source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(max) = config.max_file_size {
        let actual = fs::metadata(path).map_err(io_error)?.len();
        if actual > max {
            return Err(GraphError::FileTooLarge {
                path: path.to_path_buf(),
                actual,
                max,
            });
        }
    }

    let content = fs::read_to_string(path).map_err(io_error)?;
    parse_json(&content, config.max_depth)
}

/// Parse JSON text nested up to `max_depth` levels.
///
/// Bracket nesting is measured on the raw text first, so the parser never
/// recurses past the limit; [`validate`] checks the exact depth afterwards.
/// Without a limit, the parser's own limit of 128 levels applies.
///
/// ```
/// # use json2graph::parse_json;
/// let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
/// assert!(parse_json(&deep, Some(1000)).is_ok());
/// assert!(parse_json(&deep, Some(100)).is_err());
/// ```
pub fn parse_json(text: &str, max_depth: Option<usize>) -> Result<Value> {
    let Some(max) = max_depth else {
        return Ok(serde_json::from_str(text)?);
    };
    check_text_depth(text, max)?;

    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

fn check_text_depth(text: &str, max: usize) -> Result<()> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > max {
                    return Err(GraphError::DepthLimitExceeded {
                        path: format!("byte {}", offset),
                        depth,
                        max_depth: max,
                    });
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}
