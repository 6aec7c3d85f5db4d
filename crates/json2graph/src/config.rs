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

//! Configuration types for JSON imports.

use serde::{Deserialize, Serialize};

/// Default maximum string length for property values: 100 MB.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 100 * 1024 * 1024;

/// Default maximum nesting depth of an imported document.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Default maximum size of a file passed to `load_from_file`: 1 GB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Cypher dialect spoken by the target store.
///
/// The dialects only differ in index DDL; node and relationship statements
/// are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CypherDialect {
    /// FalkorDB / RedisGraph (`CREATE INDEX FOR (n:L) ON (n.p)`).
    #[default]
    FalkorDb,
    /// Neo4j 5 (`CREATE INDEX name IF NOT EXISTS FOR (n:L) ON (n.p)`).
    Neo4j,
}

impl std::str::FromStr for CypherDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "falkordb" | "falkor" | "redisgraph" => Ok(CypherDialect::FalkorDb),
            "neo4j" => Ok(CypherDialect::Neo4j),
            other => Err(format!("unknown Cypher dialect '{}'", other)),
        }
    }
}

/// Configuration for converting JSON values into graph statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Label used for the document root when the caller does not supply one
    /// (default: "Root").
    pub root_label: String,

    /// Label carried by every imported node; the hash index is defined on it
    /// (default: "JsonNode").
    pub node_label: String,

    /// Property holding the content hash (default: "_hash").
    pub hash_property: String,

    /// Property holding the value of a primitive node (default: "value").
    pub value_property: String,

    /// Suffix appended to the label of array container nodes (default: "Array").
    pub array_suffix: String,

    /// Create the hash index before the first node upsert (default: true).
    pub create_index: bool,

    /// Dialect used for index DDL.
    pub dialect: CypherDialect,

    /// Maximum nesting depth (default: 1000, None = unlimited).
    pub max_depth: Option<usize>,

    /// Maximum string length for keys and values (default: 100MB, None = unlimited).
    pub max_string_length: Option<usize>,

    /// Maximum number of graph-bearing values per document (default: None = unlimited).
    pub max_nodes: Option<usize>,

    /// Maximum size for files read by `load_from_file` (default: 1GB, None = unlimited).
    pub max_file_size: Option<u64>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            root_label: "Root".to_string(),
            node_label: "JsonNode".to_string(),
            hash_property: "_hash".to_string(),
            value_property: "value".to_string(),
            array_suffix: "Array".to_string(),
            create_index: true,
            dialect: CypherDialect::FalkorDb,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_string_length: Some(DEFAULT_MAX_STRING_LENGTH),
            max_nodes: None,
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE),
        }
    }
}

/// Builder for ImportConfig.
///
/// # Examples
///
/// ```
/// # use json2graph::{CypherDialect, ImportConfig};
/// let config = ImportConfig::builder()
///     .root_label("Company")
///     .dialect(CypherDialect::Neo4j)
///     .max_depth(64)
///     .build();
/// assert_eq!(config.root_label, "Company");
/// ```
#[derive(Default)]
pub struct ImportConfigBuilder {
    root_label: Option<String>,
    node_label: Option<String>,
    hash_property: Option<String>,
    value_property: Option<String>,
    array_suffix: Option<String>,
    create_index: Option<bool>,
    dialect: Option<CypherDialect>,
    max_depth: Option<Option<usize>>,
    max_string_length: Option<Option<usize>>,
    max_nodes: Option<Option<usize>>,
    max_file_size: Option<Option<u64>>,
}

impl ImportConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default root label.
    pub fn root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = Some(label.into());
        self
    }

    /// Set the label shared by every imported node.
    pub fn node_label(mut self, label: impl Into<String>) -> Self {
        self.node_label = Some(label.into());
        self
    }

    /// Set the content hash property name.
    pub fn hash_property(mut self, name: impl Into<String>) -> Self {
        self.hash_property = Some(name.into());
        self
    }

    /// Set the property name used by primitive nodes.
    pub fn value_property(mut self, name: impl Into<String>) -> Self {
        self.value_property = Some(name.into());
        self
    }

    /// Set the array container label suffix.
    pub fn array_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.array_suffix = Some(suffix.into());
        self
    }

    /// Set whether to create the hash index.
    pub fn create_index(mut self, create: bool) -> Self {
        self.create_index = Some(create);
        self
    }

    /// Set the Cypher dialect.
    pub fn dialect(mut self, dialect: CypherDialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Set the maximum nesting depth.
    pub fn max_depth(mut self, max: usize) -> Self {
        self.max_depth = Some(Some(max));
        self
    }

    /// Remove the nesting depth limit.
    pub fn no_depth_limit(mut self) -> Self {
        self.max_depth = Some(None);
        self
    }

    /// Set the maximum string length.
    pub fn max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(Some(max));
        self
    }

    /// Remove the string length limit (use with caution).
    pub fn no_string_length_limit(mut self) -> Self {
        self.max_string_length = Some(None);
        self
    }

    /// Set the maximum number of nodes per document.
    pub fn max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(Some(max));
        self
    }

    /// Set the maximum input file size.
    pub fn max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = Some(Some(max));
        self
    }

    /// Build the ImportConfig instance.
    ///
    /// All unset fields will use their default values.
    pub fn build(self) -> ImportConfig {
        let defaults = ImportConfig::default();
        ImportConfig {
            root_label: self.root_label.unwrap_or(defaults.root_label),
            node_label: self.node_label.unwrap_or(defaults.node_label),
            hash_property: self.hash_property.unwrap_or(defaults.hash_property),
            value_property: self.value_property.unwrap_or(defaults.value_property),
            array_suffix: self.array_suffix.unwrap_or(defaults.array_suffix),
            create_index: self.create_index.unwrap_or(defaults.create_index),
            dialect: self.dialect.unwrap_or(defaults.dialect),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            max_string_length: self.max_string_length.unwrap_or(defaults.max_string_length),
            max_nodes: self.max_nodes.unwrap_or(defaults.max_nodes),
            max_file_size: self.max_file_size.unwrap_or(defaults.max_file_size),
        }
    }
}

impl ImportConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for ImportConfig.
    pub fn builder() -> ImportConfigBuilder {
        ImportConfigBuilder::default()
    }

    /// Set the default root label.
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Set the Cypher dialect.
    pub fn with_dialect(mut self, dialect: CypherDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Skip hash index creation.
    pub fn without_index(mut self) -> Self {
        self.create_index = false;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max: usize) -> Self {
        self.max_depth = Some(max);
        self
    }

    /// Set the maximum string length.
    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(max);
        self
    }

    /// Set the maximum number of nodes per document.
    pub fn with_max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(max);
        self
    }

    /// Set the maximum input file size.
    pub fn with_max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = Some(max);
        self
    }

    /// Create a configuration suitable for untrusted input.
    ///
    /// - 1MB max string length
    /// - 100K max nodes
    /// - 128 levels of nesting
    /// - 64MB max file size
    pub fn for_untrusted_input() -> Self {
        Self {
            max_string_length: Some(1_000_000),
            max_nodes: Some(100_000),
            max_depth: Some(128),
            max_file_size: Some(64 * 1024 * 1024),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ImportConfig::default();
        assert_eq!(config.root_label, "Root");
        assert_eq!(config.node_label, "JsonNode");
        assert_eq!(config.hash_property, "_hash");
        assert_eq!(config.value_property, "value");
        assert_eq!(config.array_suffix, "Array");
        assert!(config.create_index);
        assert_eq!(config.dialect, CypherDialect::FalkorDb);
        assert_eq!(config.max_depth, Some(DEFAULT_MAX_DEPTH));
        assert_eq!(config.max_string_length, Some(DEFAULT_MAX_STRING_LENGTH));
        assert_eq!(config.max_nodes, None);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ImportConfig::builder()
            .root_label("Person")
            .hash_property("content_hash")
            .create_index(false)
            .no_depth_limit()
            .max_nodes(10)
            .build();

        assert_eq!(config.root_label, "Person");
        assert_eq!(config.hash_property, "content_hash");
        assert!(!config.create_index);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.max_nodes, Some(10));
        // Untouched fields keep their defaults
        assert_eq!(config.node_label, "JsonNode");
    }

    #[test]
    fn test_fluent_api() {
        let config = ImportConfig::new()
            .with_root_label("Company")
            .with_dialect(CypherDialect::Neo4j)
            .without_index()
            .with_max_depth(5);

        assert_eq!(config.root_label, "Company");
        assert_eq!(config.dialect, CypherDialect::Neo4j);
        assert!(!config.create_index);
        assert_eq!(config.max_depth, Some(5));
    }

    #[test]
    fn test_untrusted_preset() {
        let config = ImportConfig::for_untrusted_input();
        assert_eq!(config.max_string_length, Some(1_000_000));
        assert_eq!(config.max_nodes, Some(100_000));
        assert_eq!(config.max_depth, Some(128));
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("FalkorDB".parse::<CypherDialect>(), Ok(CypherDialect::FalkorDb));
        assert_eq!("neo4j".parse::<CypherDialect>(), Ok(CypherDialect::Neo4j));
        assert!("oracle".parse::<CypherDialect>().is_err());
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: ImportConfig =
            serde_json::from_str(r#"{"root_label": "Doc", "dialect": "neo4j"}"#).unwrap();
        assert_eq!(config.root_label, "Doc");
        assert_eq!(config.dialect, CypherDialect::Neo4j);
        assert_eq!(config.hash_property, "_hash");
    }
}
