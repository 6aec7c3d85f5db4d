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

//! Import into FalkorDB.

use crate::error::CliError;
use std::path::PathBuf;

/// Default FalkorDB endpoint.
pub const DEFAULT_URL: &str = "redis://127.0.0.1:6379";

/// Default graph name.
pub const DEFAULT_GRAPH: &str = "json";

/// Options for [`import`].
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Label of the root node (default: the configured root label).
    pub root_label: Option<String>,
    /// Redis URL of the FalkorDB server.
    pub url: String,
    /// Graph to import into.
    pub graph: String,
    /// Delete the whole graph before importing.
    pub clear: bool,
    /// Configuration file.
    pub config: Option<PathBuf>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            root_label: None,
            url: DEFAULT_URL.to_string(),
            graph: DEFAULT_GRAPH.to_string(),
            clear: false,
            config: None,
        }
    }
}

/// Import `file` into the FalkorDB graph named in `options`.
#[cfg(feature = "falkordb")]
pub fn import(file: &str, options: &ImportOptions) -> Result<(), CliError> {
    use super::{load_config, read_input};
    use json2graph::{FalkorDbExecutor, GraphError, JsonImporter};

    let config = load_config(options.config.as_deref())?;
    let root_label = options
        .root_label
        .clone()
        .unwrap_or_else(|| config.root_label.clone());
    let value = read_input(file, &config)?;

    let executor =
        FalkorDbExecutor::connect(&options.url, options.graph.as_str()).map_err(GraphError::from)?;
    let mut importer = JsonImporter::with_config(executor, config);
    if options.clear {
        importer.clear_db()?;
    }

    let report = importer.convert(&value, &root_label)?;
    println!("{}: {}", file, report);
    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
    Ok(())
}

/// Import `file` into the FalkorDB graph named in `options`.
///
/// This build has no FalkorDB support; rebuild with `--features falkordb`.
#[cfg(not(feature = "falkordb"))]
pub fn import(_file: &str, _options: &ImportOptions) -> Result<(), CliError> {
    Err(CliError::FeatureDisabled("falkordb"))
}
