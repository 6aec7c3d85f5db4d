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

//! Cypher statement types and builders.

use crate::emitter::GraphWrite;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Cypher parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CypherValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// Map/object value.
    Map(BTreeMap<String, CypherValue>),
}

impl From<bool> for CypherValue {
    fn from(v: bool) -> Self {
        CypherValue::Bool(v)
    }
}

impl From<i64> for CypherValue {
    fn from(v: i64) -> Self {
        CypherValue::Int(v)
    }
}

impl From<f64> for CypherValue {
    fn from(v: f64) -> Self {
        CypherValue::Float(v)
    }
}

impl From<String> for CypherValue {
    fn from(v: String) -> Self {
        CypherValue::String(v)
    }
}

impl From<&str> for CypherValue {
    fn from(v: &str) -> Self {
        CypherValue::String(v.to_string())
    }
}

impl From<BTreeMap<String, CypherValue>> for CypherValue {
    fn from(v: BTreeMap<String, CypherValue>) -> Self {
        CypherValue::Map(v)
    }
}

impl CypherValue {
    /// Convert a primitive JSON value found at `path`.
    ///
    /// See [`json_scalar`](crate::cypher::json_scalar) for the rules.
    pub fn from_json_scalar(value: &serde_json::Value, path: &str) -> crate::Result<Self> {
        crate::cypher::literal::json_scalar(value, path)
    }

    /// Convert to Cypher literal syntax.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            CypherValue::Null => "null".to_string(),
            CypherValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            CypherValue::Int(i) => i.to_string(),
            CypherValue::Float(f) => {
                if f.is_nan() {
                    "0.0/0.0".to_string()
                } else if f.is_infinite() {
                    if *f > 0.0 {
                        "1.0/0.0".to_string()
                    } else {
                        "-1.0/0.0".to_string()
                    }
                } else {
                    let s = f.to_string();
                    if s.contains('.') || s.contains('e') || s.contains('E') {
                        s
                    } else {
                        format!("{}.0", s)
                    }
                }
            }
            CypherValue::String(s) => super::literal::quote_string(s),
            CypherValue::Map(map) => {
                let pairs: Vec<String> = map
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}: {}",
                            super::literal::escape_identifier(k),
                            v.to_cypher_literal()
                        )
                    })
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
        }
    }

    /// Try to get as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CypherValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, CypherValue>> {
        match self {
            CypherValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// The type of Cypher statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementType {
    /// Index creation.
    Index,
    /// Node match-or-create keyed by content hash.
    UpsertNode,
    /// Additional label on an existing node.
    AddLabel,
    /// Relationship match-or-create.
    MergeRelationship,
    /// Removal of every node and relationship.
    ClearGraph,
}

/// A single Cypher statement with optional parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CypherStatement {
    /// The Cypher query text.
    pub query: String,
    /// Parameters referenced from the query as `$name`.
    pub parameters: BTreeMap<String, CypherValue>,
    /// Type of statement.
    pub statement_type: StatementType,
    /// Optional comment describing the statement.
    pub comment: Option<String>,
    /// The graph write this statement performs, for executors that do not
    /// speak Cypher.
    #[serde(skip)]
    pub write: Option<GraphWrite>,
}

impl CypherStatement {
    /// Create a new Cypher statement.
    pub fn new(query: impl Into<String>, statement_type: StatementType) -> Self {
        Self {
            query: query.into(),
            parameters: BTreeMap::new(),
            statement_type,
            comment: None,
            write: None,
        }
    }

    /// Add a parameter to this statement.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add a comment to this statement.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach the structured write this statement performs.
    pub fn with_write(mut self, write: GraphWrite) -> Self {
        self.write = Some(write);
        self
    }

    /// Check if this statement has parameters.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Render this statement as a string with embedded values.
    ///
    /// Placeholders are substituted in a single left-to-right pass, so text
    /// produced by one substitution is never scanned for further
    /// placeholders. Unknown placeholders are left untouched.
    pub fn render_inline(&self) -> String {
        let mut result = String::with_capacity(self.query.len());
        let mut rest = self.query.as_str();

        while let Some(pos) = rest.find('$') {
            result.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..len];

            match self.parameters.get(name) {
                Some(value) if !name.is_empty() => result.push_str(&value.to_cypher_literal()),
                _ => {
                    result.push('$');
                    result.push_str(name);
                }
            }
            rest = &after[len..];
        }

        result.push_str(rest);
        result
    }

    /// Format this statement with optional comment prefix.
    ///
    /// This inlines all parameters so the result is directly executable.
    pub fn format(&self, include_comment: bool) -> String {
        let mut lines = Vec::new();

        if include_comment {
            if let Some(comment) = &self.comment {
                lines.push(format!("// {}", comment));
            }
        }

        lines.push(format!("{};", self.render_inline()));

        lines.join("\n")
    }
}

/// A collection of Cypher statements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CypherScript {
    /// The statements in this script.
    pub statements: Vec<CypherStatement>,
}

impl CypherScript {
    /// Create a new empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement to the script.
    pub fn add(&mut self, statement: CypherStatement) {
        self.statements.push(statement);
    }

    /// Get all statements of a specific type.
    pub fn statements_of_type(&self, statement_type: StatementType) -> Vec<&CypherStatement> {
        self.statements
            .iter()
            .filter(|s| s.statement_type == statement_type)
            .collect()
    }

    /// Render the script as a single string.
    pub fn render(&self, include_comments: bool) -> String {
        self.statements
            .iter()
            .map(|s| s.format(include_comments))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Get the number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the script is empty.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl IntoIterator for CypherScript {
    type Item = CypherStatement;
    type IntoIter = std::vec::IntoIter<CypherStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a CypherScript {
    type Item = &'a CypherStatement;
    type IntoIter = std::slice::Iter<'a, CypherStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cypher_value_literals() {
        assert_eq!(CypherValue::Null.to_cypher_literal(), "null");
        assert_eq!(CypherValue::Bool(true).to_cypher_literal(), "true");
        assert_eq!(CypherValue::Bool(false).to_cypher_literal(), "false");
        assert_eq!(CypherValue::Int(42).to_cypher_literal(), "42");
        assert_eq!(CypherValue::Float(3.25).to_cypher_literal(), "3.25");
        assert_eq!(CypherValue::Float(2.0).to_cypher_literal(), "2.0");
        assert_eq!(
            CypherValue::String("hello".to_string()).to_cypher_literal(),
            "'hello'"
        );
    }

    #[test]
    fn test_cypher_value_map_escapes_keys() {
        let mut map = BTreeMap::new();
        map.insert("name".to_string(), CypherValue::from("Alice"));
        map.insert("first name".to_string(), CypherValue::from("A"));
        map.insert("age".to_string(), CypherValue::Int(30));
        let value = CypherValue::Map(map);
        assert_eq!(
            value.to_cypher_literal(),
            "{age: 30, `first name`: 'A', name: 'Alice'}"
        );
    }

    #[test]
    fn test_cypher_value_accessors() {
        assert_eq!(CypherValue::from("hi").as_str(), Some("hi"));
        assert_eq!(CypherValue::Int(42).as_str(), None);
        assert!(CypherValue::Map(BTreeMap::new()).as_map().is_some());
    }

    #[test]
    fn test_statement_render_inline() {
        let stmt = CypherStatement::new("MATCH (n {name: $name, age: $age}) RETURN n", StatementType::UpsertNode)
            .with_param("name", "Alice")
            .with_param("age", 30i64);

        assert_eq!(
            stmt.render_inline(),
            "MATCH (n {name: 'Alice', age: 30}) RETURN n"
        );
    }

    #[test]
    fn test_render_inline_does_not_rescan_substituted_text() {
        let stmt = CypherStatement::new("MERGE (n {a: $a, b: $b})", StatementType::UpsertNode)
            .with_param("a", "$b")
            .with_param("b", "x");

        assert_eq!(stmt.render_inline(), "MERGE (n {a: '$b', b: 'x'})");
    }

    #[test]
    fn test_render_inline_prefix_names() {
        let stmt = CypherStatement::new("RETURN $p, $props", StatementType::UpsertNode)
            .with_param("p", 1i64)
            .with_param("props", 2i64);

        assert_eq!(stmt.render_inline(), "RETURN 1, 2");
    }

    #[test]
    fn test_render_inline_unknown_placeholder() {
        let stmt = CypherStatement::new("RETURN $missing, $", StatementType::UpsertNode);
        assert_eq!(stmt.render_inline(), "RETURN $missing, $");
    }

    #[test]
    fn test_statement_format_with_comment() {
        let stmt = CypherStatement::new("MATCH (n) DETACH DELETE n", StatementType::ClearGraph)
            .with_comment("Clear graph");

        let formatted = stmt.format(true);
        assert!(formatted.starts_with("// Clear graph\n"));
        assert!(formatted.ends_with("DETACH DELETE n;"));
        assert!(!stmt.format(false).contains("//"));
    }

    #[test]
    fn test_script_basic() {
        let mut script = CypherScript::new();
        assert!(script.is_empty());

        script.add(CypherStatement::new("C1", StatementType::Index));
        script.add(CypherStatement::new("N1", StatementType::UpsertNode));
        script.add(CypherStatement::new("N2", StatementType::UpsertNode));

        assert_eq!(script.len(), 3);
        assert_eq!(script.statements_of_type(StatementType::UpsertNode).len(), 2);
        assert_eq!(script.render(false), "C1;\n\nN1;\n\nN2;");
    }

    #[test]
    fn test_statement_serializes_without_write() {
        let stmt = CypherStatement::new("RETURN $x", StatementType::UpsertNode).with_param("x", 1i64);
        let json = serde_json::to_string(&stmt).unwrap();
        assert!(json.contains("RETURN $x"));
        assert!(!json.contains("write"));
    }
}
