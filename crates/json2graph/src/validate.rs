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

//! Input checks run before any statement reaches the store.
//!
//! A document that breaks a limit is rejected as a whole, so a partial graph
//! is never left behind for input that could not have been imported anyway.

use crate::config::ImportConfig;
use crate::error::{GraphError, Result};
use crate::path::{child_index, child_key, ROOT};
use serde_json::{Number, Value};

/// Shape of a document that passed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Values that become graph nodes, before deduplication.
    pub nodes: usize,
    /// Primitive object entries that become properties.
    pub properties: usize,
    /// Deepest nesting level reached (root = 1).
    pub depth: usize,
}

/// Check `value` against the limits in `config`.
///
/// Nesting depth, string lengths, integer range and the number of nodes are
/// checked. The walk is iterative, so depth is bounded only by the limit.
pub fn validate(value: &Value, config: &ImportConfig) -> Result<ValidationSummary> {
    let mut summary = ValidationSummary::default();
    let mut stack: Vec<(&Value, usize, String)> = vec![(value, 1, ROOT.to_string())];

    while let Some((value, depth, path)) = stack.pop() {
        check_depth(depth, || path.clone(), config)?;
        summary.depth = summary.depth.max(depth);
        summary.nodes += 1;
        if let Some(max) = config.max_nodes {
            if summary.nodes > max {
                return Err(GraphError::NodeCountExceeded {
                    count: summary.nodes,
                    max_count: max,
                });
            }
        }

        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    check_string(key, || child_key(&path, key), config)?;
                    match child {
                        Value::Object(_) | Value::Array(_) => {
                            stack.push((child, depth + 1, child_key(&path, key)));
                        }
                        Value::Null => {}
                        _ => {
                            check_depth(depth + 1, || child_key(&path, key), config)?;
                            check_primitive(child, || child_key(&path, key), config)?;
                            summary.properties += 1;
                        }
                    }
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    stack.push((child, depth + 1, child_index(&path, i)));
                }
            }
            _ => check_primitive(value, || path.clone(), config)?,
        }
    }

    Ok(summary)
}

fn check_depth(depth: usize, path: impl FnOnce() -> String, config: &ImportConfig) -> Result<()> {
    match config.max_depth {
        Some(max) if depth > max => Err(GraphError::DepthLimitExceeded {
            path: path(),
            depth,
            max_depth: max,
        }),
        _ => Ok(()),
    }
}

fn check_string(s: &str, path: impl FnOnce() -> String, config: &ImportConfig) -> Result<()> {
    match config.max_string_length {
        Some(max) if s.len() > max => Err(GraphError::StringLengthExceeded {
            path: path(),
            length: s.len(),
            max_length: max,
        }),
        _ => Ok(()),
    }
}

fn check_primitive(
    value: &Value,
    path: impl FnOnce() -> String,
    config: &ImportConfig,
) -> Result<()> {
    match value {
        Value::String(s) => check_string(s, path, config),
        Value::Number(n) => check_number(n, path),
        _ => Ok(()),
    }
}

fn check_number(n: &Number, path: impl FnOnce() -> String) -> Result<()> {
    if n.as_i64().is_none() && n.is_u64() {
        return Err(GraphError::encoding(
            path(),
            format!("integer {} exceeds the 64-bit signed range", n),
        ));
    }
    Ok(())
}
