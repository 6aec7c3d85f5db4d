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

//! FalkorDB executor over the Redis protocol.

use super::QueryExecutor;
use crate::cypher::CypherStatement;
use crate::error::StoreError;
use redis::{Client, Connection, RedisError};
use tracing::debug;

/// Runs statements against a FalkorDB graph with `GRAPH.QUERY`.
///
/// Parameters are sent in the `CYPHER name=value ...` header that FalkorDB
/// reads in front of the query, rendered with
/// [`CypherValue::to_cypher_literal`](crate::cypher::CypherValue::to_cypher_literal).
pub struct FalkorDbExecutor {
    connection: Connection,
    graph: String,
}

impl FalkorDbExecutor {
    /// Connect to `url` (e.g. `redis://127.0.0.1:6379`) and target `graph`.
    pub fn connect(url: &str, graph: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::open(url).map_err(store_error)?;
        let executor = Self::from_client(&client, graph)?;
        debug!(url, graph = %executor.graph, "connected to FalkorDB");
        Ok(executor)
    }

    /// Open a new connection from a configured `client` and target `graph`.
    ///
    /// Use this when the client carries its own authentication or TLS
    /// settings.
    pub fn from_client(client: &Client, graph: impl Into<String>) -> Result<Self, StoreError> {
        let connection = client.get_connection().map_err(store_error)?;
        Ok(Self::new(connection, graph))
    }

    /// Run statements over an existing `connection` against `graph`.
    ///
    /// ```no_run
    /// use json2graph::{redis, FalkorDbExecutor, JsonImporter};
    ///
    /// let client = redis::Client::open("redis://:secret@127.0.0.1:6379").unwrap();
    /// let connection = client.get_connection().unwrap();
    /// let mut importer = JsonImporter::new(FalkorDbExecutor::new(connection, "docs"));
    /// importer.convert(&serde_json::json!({"a": 1}), "Doc").unwrap();
    ///
    /// // Hand the connection back once the import is done.
    /// let _connection = importer.into_executor().into_connection();
    /// ```
    pub fn new(connection: Connection, graph: impl Into<String>) -> Self {
        Self {
            connection,
            graph: graph.into(),
        }
    }

    /// Give up the executor and return its connection.
    pub fn into_connection(self) -> Connection {
        self.connection
    }

    /// Name of the target graph.
    pub fn graph(&self) -> &str {
        &self.graph
    }
}

impl QueryExecutor for FalkorDbExecutor {
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), StoreError> {
        redis::cmd("GRAPH.QUERY")
            .arg(&self.graph)
            .arg(query_text(statement))
            .arg("--compact")
            .query::<redis::Value>(&mut self.connection)
            .map(|_| ())
            .map_err(store_error)
    }
}

/// Query text with the parameter header FalkorDB expects.
fn query_text(statement: &CypherStatement) -> String {
    if !statement.has_parameters() {
        return statement.query.clone();
    }
    let header: Vec<String> = statement
        .parameters
        .iter()
        .map(|(name, value)| format!("{}={}", name, value.to_cypher_literal()))
        .collect();
    format!("CYPHER {} {}", header.join(" "), statement.query)
}

fn store_error(error: RedisError) -> StoreError {
    if error.is_io_error()
        || error.is_connection_refusal()
        || error.is_connection_dropped()
        || error.is_timeout()
    {
        StoreError::Connection(error.to_string())
    } else {
        StoreError::Query(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::StatementType;

    #[test]
    fn test_query_text_with_parameters() {
        let stmt = CypherStatement::new(
            "MATCH (n:JsonNode {_hash: $hash}) SET n:x",
            StatementType::AddLabel,
        )
        .with_param("hash", "ab'c");

        assert_eq!(
            query_text(&stmt),
            "CYPHER hash='ab\\'c' MATCH (n:JsonNode {_hash: $hash}) SET n:x"
        );
    }

    #[test]
    fn test_query_text_without_parameters() {
        let stmt = CypherStatement::new("MATCH (n) DETACH DELETE n", StatementType::ClearGraph);
        assert_eq!(query_text(&stmt), "MATCH (n) DETACH DELETE n");
    }

    #[test]
    fn test_refused_connection_is_a_connection_error() {
        let result = FalkorDbExecutor::connect("redis://127.0.0.1:1", "g");
        assert!(matches!(result, Err(StoreError::Connection(_))));
    }

    #[cfg(feature = "integration-tests")]
    #[test]
    fn test_round_trip_against_server() {
        use crate::JsonImporter;
        use serde_json::json;

        let url = std::env::var("FALKORDB_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let executor = FalkorDbExecutor::connect(&url, "json2graph_test").unwrap();
        let mut importer = JsonImporter::new(executor);
        importer.clear_db().unwrap();
        let report = importer
            .convert(&json!({"name": "Alice", "tags": ["x", "y"]}), "Person")
            .unwrap();
        assert_eq!(report.nodes_created, 4);
        importer.clear_db().unwrap();
    }

    #[cfg(feature = "integration-tests")]
    #[test]
    fn test_caller_supplied_connection_is_reused() {
        use crate::JsonImporter;
        use serde_json::json;

        let url = std::env::var("FALKORDB_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let client = Client::open(url.as_str()).unwrap();
        let connection = client.get_connection().unwrap();

        let mut importer = JsonImporter::new(FalkorDbExecutor::new(connection, "json2graph_shared"));
        importer.clear_db().unwrap();
        importer.convert(&json!({"k": [1, 2]}), "First").unwrap();

        // The connection outlives the first importer.
        let connection = importer.into_executor().into_connection();
        let mut second = JsonImporter::new(FalkorDbExecutor::new(connection, "json2graph_shared"));
        let report = second.convert(&json!({"k": [1, 2]}), "First").unwrap();
        assert_eq!(report.nodes_created, 4);
        second.clear_db().unwrap();

        let mut from_client = FalkorDbExecutor::from_client(&client, "json2graph_shared").unwrap();
        assert_eq!(from_client.graph(), "json2graph_shared");
        let statement = crate::cypher::CypherStatement::new(
            "MATCH (n) DETACH DELETE n",
            crate::cypher::StatementType::ClearGraph,
        );
        assert!(from_client.execute(&statement).is_ok());
    }
}
