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

//! Structured error types for the json2graph CLI.

use json2graph::GraphError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for json2graph CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// Writing output failed.
    #[error("I/O error for '{path}': {message}", path = .path.display())]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration '{path}': {message}", path = .path.display())]
    Config {
        /// The configuration file
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// The JSON pointer does not address a value in the document.
    #[error("no value at JSON pointer '{0}'")]
    PointerNotFound(String),

    /// Serializing command output failed.
    #[error("JSON format error: {0}")]
    JsonFormat(#[from] serde_json::Error),

    /// The requested command needs a cargo feature this binary lacks.
    #[error("the '{0}' feature is not enabled in this build")]
    FeatureDisabled(&'static str),

    /// The import itself failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl CliError {
    /// Create an I/O error for `path`.
    pub fn io_error(path: impl Into<PathBuf>, err: io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use json2graph::StoreError;

    #[test]
    fn test_graph_errors_are_transparent() {
        let err: CliError = GraphError::Store(StoreError::Connection("refused".to_string())).into();
        assert_eq!(err.to_string(), "store error: connection failure: refused");
    }

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "out.cypher",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error for 'out.cypher': denied");
    }
}
