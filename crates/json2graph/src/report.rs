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

//! Outcome of a single import.

use crate::error::StoreError;
use crate::hash::ContentHash;
use crate::validate::ValidationSummary;
use std::fmt;

/// A non-fatal problem encountered during an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportWarning {
    /// JSON path of the value the warning refers to.
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl ImportWarning {
    /// Create a new warning.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A node whose write failed. Its subtree was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFailure {
    /// JSON path of the node.
    pub path: String,
    /// Error returned by the store.
    pub error: StoreError,
}

impl fmt::Display for NodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

/// Counters and diagnostics collected while importing one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Content hash of the document root, once it has been written.
    pub root: Option<ContentHash>,
    /// Shape of the document as measured by validation.
    pub document: ValidationSummary,
    /// Nodes not previously seen by this importer.
    pub nodes_created: usize,
    /// Nodes already known to this importer.
    pub nodes_reused: usize,
    /// Labels added to already-known nodes.
    pub labels_added: usize,
    /// Relationships emitted for the first time.
    pub relationships_created: usize,
    /// Relationships skipped because they were already emitted.
    pub relationships_reused: usize,
    /// Statements accepted by the executor.
    pub statements_executed: usize,
    /// Non-fatal problems.
    pub warnings: Vec<ImportWarning>,
    /// Nodes whose write failed.
    pub failures: Vec<NodeFailure>,
}

impl ImportReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every node was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Nodes visited, new or reused.
    pub fn nodes_visited(&self) -> usize {
        self.nodes_created + self.nodes_reused
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ImportWarning::new(path, message));
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes created, {} reused, {} labels added, {} relationships created, {} statements",
            self.nodes_created,
            self.nodes_reused,
            self.labels_added,
            self.relationships_created,
            self.statements_executed
        )?;
        if !self.warnings.is_empty() {
            write!(f, ", {} warnings", self.warnings.len())?;
        }
        if !self.failures.is_empty() {
            write!(f, ", {} failed", self.failures.len())?;
        }
        Ok(())
    }
}
