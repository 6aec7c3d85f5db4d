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

//! Label and relationship type sanitization.
//!
//! JSON keys are unrestricted Unicode; Cypher labels are not. Every label and
//! relationship type the importer emits is produced by [`sanitize_label`],
//! which is total (never fails) and deterministic.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Label used when a key sanitizes to nothing.
pub const FALLBACK_LABEL: &str = "Node";

/// Prefix applied to labels that would otherwise start with a digit.
const DIGIT_PREFIX: char = 'L';

/// Convert an arbitrary string into a valid Cypher label.
///
/// 1. Compatibility-decompose the input and drop combining marks, so accented
///    Latin letters keep their base letter (`José` becomes `Jose`).
/// 2. Replace every character outside `[A-Za-z0-9_]` with `_`.
/// 3. Collapse runs of `_`.
/// 4. Fall back to [`FALLBACK_LABEL`] when only underscores remain.
/// 5. Prefix `L` when the result starts with a digit.
///
/// # Examples
///
/// ```
/// # use json2graph::cypher::sanitize_label;
/// assert_eq!(sanitize_label("name"), "name");
/// assert_eq!(sanitize_label("test-label"), "test_label");
/// assert_eq!(sanitize_label("test@#$%label"), "test_label");
/// assert_eq!(sanitize_label("2024 sales!"), "L2024_sales_");
/// assert_eq!(sanitize_label(""), "Node");
/// ```
pub fn sanitize_label(raw: &str) -> String {
    let mut label = String::with_capacity(raw.len());

    for c in raw.nfkd() {
        if is_combining_mark(c) {
            continue;
        }
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && label.ends_with('_') {
            continue;
        }
        label.push(c);
    }

    if label.chars().all(|c| c == '_') {
        return FALLBACK_LABEL.to_string();
    }

    if label.starts_with(|c: char| c.is_ascii_digit()) {
        label.insert(0, DIGIT_PREFIX);
    }

    label
}

/// Check if a string satisfies the label contract: non-empty, ASCII
/// alphanumerics and underscores only, not starting with a digit.
pub fn is_valid_label(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };

    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Relationship type for the object entry under `key`.
pub fn relationship_type(key: &str) -> String {
    sanitize_label(key)
}

/// Relationship type for the array element at `index` (`ELEMENT_<index>`).
pub fn element_relationship(index: usize) -> String {
    format!("ELEMENT_{}", index)
}

/// Render a label for use after a node variable, e.g. `:Person`.
///
/// Reserved words and anything that is not a plain identifier are wrapped in
/// backticks.
///
/// ```
/// # use json2graph::cypher::escape_label;
/// assert_eq!(escape_label("Person"), ":Person");
/// assert_eq!(escape_label("MATCH"), ":`MATCH`");
/// ```
pub fn escape_label(label: &str) -> String {
    format!(":{}", quote_name(label))
}

/// Render a relationship type for use inside `[...]`, e.g. `:tags`.
pub fn escape_relationship_type(rel_type: &str) -> String {
    format!(":{}", quote_name(rel_type))
}

pub(crate) fn quote_name(name: &str) -> String {
    if is_valid_label(name) && !is_cypher_keyword(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Check if a string is a Cypher reserved keyword.
pub(crate) fn is_cypher_keyword(s: &str) -> bool {
    matches!(
        s.to_uppercase().as_str(),
        "ALL"
            | "AND"
            | "ANY"
            | "AS"
            | "ASC"
            | "ASCENDING"
            | "BY"
            | "CALL"
            | "CASE"
            | "CONTAINS"
            | "COUNT"
            | "CREATE"
            | "DELETE"
            | "DESC"
            | "DESCENDING"
            | "DETACH"
            | "DISTINCT"
            | "DROP"
            | "ELSE"
            | "END"
            | "ENDS"
            | "EXISTS"
            | "FALSE"
            | "FOREACH"
            | "IN"
            | "INDEX"
            | "IS"
            | "LIMIT"
            | "MANDATORY"
            | "MATCH"
            | "MERGE"
            | "NOT"
            | "NULL"
            | "OF"
            | "ON"
            | "OPTIONAL"
            | "OR"
            | "ORDER"
            | "REMOVE"
            | "RETURN"
            | "SET"
            | "SKIP"
            | "STARTS"
            | "THEN"
            | "TRUE"
            | "UNION"
            | "UNIQUE"
            | "UNWIND"
            | "WHEN"
            | "WHERE"
            | "WITH"
            | "XOR"
            | "YIELD"
    )
}
