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

//! CLI command implementations

mod cypher;
mod hash;
mod import;
mod stats;

pub use cypher::{cypher, CypherOptions};
pub use hash::hash;
pub use import::{import, ImportOptions, DEFAULT_GRAPH, DEFAULT_URL};
pub use stats::{stats, StatsOptions};

use crate::error::CliError;
use json2graph::{read_json, ImportConfig};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Environment variable overriding the maximum input file size in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "JSON2GRAPH_MAX_FILE_SIZE";

fn max_file_size_override() -> Option<u64> {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
}

/// Load the import configuration.
///
/// Starts from `path` (a JSON file with any subset of the
/// [`ImportConfig`] fields) or the defaults, then applies
/// `JSON2GRAPH_MAX_FILE_SIZE` when it holds a valid size.
pub fn load_config(path: Option<&Path>) -> Result<ImportConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let config_error = |message: String| CliError::Config {
                path: path.to_path_buf(),
                message,
            };
            let content = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
            serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))?
        }
        None => ImportConfig::default(),
    };

    if let Some(max) = max_file_size_override() {
        config.max_file_size = Some(max);
    }
    Ok(config)
}

/// Read and parse the JSON document at `path` under the configured size limit.
pub fn read_input(path: &str, config: &ImportConfig) -> Result<Value, CliError> {
    Ok(read_json(Path::new(path), config)?)
}

/// Write content to a file or stdout.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}
