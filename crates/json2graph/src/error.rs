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

//! Error types for json2graph imports.

use crate::report::ImportReport;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a [`QueryExecutor`](crate::executor::QueryExecutor).
///
/// Connection failures and query failures are kept apart so callers can
/// decide whether a retry against the same store makes sense.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or the connection dropped.
    #[error("connection failure: {0}")]
    Connection(String),

    /// The store rejected the statement (syntax, constraint, missing node...).
    #[error("query failure: {0}")]
    Query(String),
}

impl StoreError {
    /// Check if this is a connection-level failure.
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}

/// Error type for json2graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The input file could not be read.
    #[error("failed to read '{path}': {source}", path = .path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input file exceeds the configured size limit.
    #[error("file '{path}' is too large ({actual} bytes, maximum {max} bytes)", path = .path.display())]
    FileTooLarge {
        /// The file that was rejected.
        path: PathBuf,
        /// Actual size in bytes.
        actual: u64,
        /// Configured limit in bytes.
        max: u64,
    },

    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Nesting depth limit exceeded.
    #[error("nesting depth {depth} at {path} exceeds maximum allowed depth {max_depth}")]
    DepthLimitExceeded {
        /// JSON path of the offending value, or its byte offset when the
        /// limit was hit before parsing.
        path: String,
        /// Depth reached.
        depth: usize,
        /// Configured limit.
        max_depth: usize,
    },

    /// String length limit exceeded.
    #[error("string length {length} at {path} exceeds maximum allowed length {max_length}")]
    StringLengthExceeded {
        /// JSON path of the offending value.
        path: String,
        /// Length in bytes.
        length: usize,
        /// Configured limit.
        max_length: usize,
    },

    /// The document would produce more nodes than allowed.
    #[error("document contains {count} values, maximum allowed is {max_count}")]
    NodeCountExceeded {
        /// Number of graph-bearing values in the document.
        count: usize,
        /// Configured limit.
        max_count: usize,
    },

    /// A value could not be represented in the target query language.
    #[error("cannot encode value at {path}: {message}")]
    Encoding {
        /// JSON path of the offending value.
        path: String,
        /// What went wrong.
        message: String,
    },

    /// A statement outside the traversal (index setup) failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The document root could not be written, so nothing was imported.
    #[error("failed to create root node at {path}: {source}")]
    RootNode {
        /// JSON path of the root, always `$`.
        path: String,
        /// Store error for the root upsert.
        #[source]
        source: StoreError,
    },

    /// One or more node upserts failed; their subtrees were not imported.
    #[error("failed to create node at {path}: {source} ({failed} subtree(s) skipped)")]
    Incomplete {
        /// JSON path of the first node that failed.
        path: String,
        /// Store error for the first failure.
        #[source]
        source: StoreError,
        /// Total number of abandoned subtrees.
        failed: usize,
        /// What was imported before and around the failures.
        report: Box<ImportReport>,
    },

    /// Wiping the store failed. The node cache was left untouched.
    #[error("failed to clear database: {0}")]
    Clear(#[source] StoreError),
}

impl GraphError {
    /// Build an encoding error for the value at `path`.
    pub fn encoding(path: impl Into<String>, message: impl Into<String>) -> Self {
        GraphError::Encoding {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if the error was raised before any statement was executed.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GraphError::Io { .. }
                | GraphError::FileTooLarge { .. }
                | GraphError::Json(_)
                | GraphError::DepthLimitExceeded { .. }
                | GraphError::StringLengthExceeded { .. }
                | GraphError::NodeCountExceeded { .. }
        )
    }
}

/// Result type alias for json2graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
