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

//! Literal formatting for values embedded in Cypher text.
//!
//! Statements produced by the importer carry values as bound parameters. The
//! functions here are used wherever a parameter has to be rendered as text
//! anyway: inline script rendering and the FalkorDB `CYPHER` parameter header.
//! They are security-critical: no user-controlled text reaches a query
//! without passing through [`escape_string`] or [`escape_identifier`].

use crate::cypher::sanitize::quote_name;
use crate::cypher::statements::CypherValue;
use crate::error::{GraphError, Result};
use serde_json::{Number, Value};
use std::borrow::Cow;

#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape a string value for use inside a single-quoted Cypher literal.
///
/// Backslashes are escaped before quotes so an input backslash can never
/// neutralize the escape added for a following quote. Returns
/// `Cow::Borrowed` when nothing needs escaping.
///
/// ```
/// # use json2graph::cypher::escape_string;
/// assert_eq!(escape_string("plain"), "plain");
/// assert_eq!(escape_string("It's"), "It\\'s");
/// assert_eq!(escape_string("C:\\user's"), "C:\\\\user\\'s");
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote a string value for Cypher with single quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Escape a map key or property name, using backticks when it is not a
/// plain identifier or collides with a reserved word.
///
/// ```
/// # use json2graph::cypher::escape_identifier;
/// assert_eq!(escape_identifier("name"), "name");
/// assert_eq!(escape_identifier("first name"), "`first name`");
/// assert_eq!(escape_identifier("RETURN"), "`RETURN`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    quote_name(s)
}

/// Convert a JSON primitive into a Cypher value.
///
/// Integers stay integers and floats stay floats. Unsigned integers beyond
/// `i64::MAX` have no Cypher representation and are rejected rather than
/// rounded. Containers are not primitives and are rejected as well.
pub fn json_scalar(value: &Value, path: &str) -> Result<CypherValue> {
    match value {
        Value::Null => Ok(CypherValue::Null),
        Value::Bool(b) => Ok(CypherValue::Bool(*b)),
        Value::Number(n) => number(n, path),
        Value::String(s) => Ok(CypherValue::String(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(GraphError::encoding(
            path,
            "containers cannot be stored as property values",
        )),
    }
}

fn number(n: &Number, path: &str) -> Result<CypherValue> {
    if let Some(i) = n.as_i64() {
        return Ok(CypherValue::Int(i));
    }
    if n.is_u64() {
        return Err(GraphError::encoding(
            path,
            format!("integer {} exceeds the 64-bit signed range", n),
        ));
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => Ok(CypherValue::Float(f)),
        _ => Err(GraphError::encoding(
            path,
            format!("number {} has no finite representation", n),
        )),
    }
}

/// Render a JSON primitive as Cypher literal text.
///
/// ```
/// # use json2graph::cypher::format_literal;
/// # use serde_json::json;
/// assert_eq!(format_literal(&json!("test string")).unwrap(), "'test string'");
/// assert_eq!(format_literal(&json!(42)).unwrap(), "42");
/// assert_eq!(format_literal(&json!(3.14)).unwrap(), "3.14");
/// assert_eq!(format_literal(&json!(true)).unwrap(), "true");
/// assert_eq!(format_literal(&json!(null)).unwrap(), "null");
/// ```
pub fn format_literal(value: &Value) -> Result<String> {
    json_scalar(value, "$").map(|v| v.to_cypher_literal())
}
