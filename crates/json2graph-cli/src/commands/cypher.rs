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

//! Cypher script generation.

use super::{load_config, read_input, write_output};
use crate::error::CliError;
use json2graph::{CypherDialect, JsonImporter, ScriptRecorder};
use std::path::PathBuf;
use tracing::debug;

/// Options for [`cypher`].
#[derive(Debug, Clone, Default)]
pub struct CypherOptions {
    /// Label of the root node (default: the configured root label).
    pub root_label: Option<String>,
    /// Dialect for index DDL, overriding the configuration.
    pub dialect: Option<CypherDialect>,
    /// Start the script with a statement that deletes the whole graph.
    pub clear: bool,
    /// Leave out the `//` comment naming the JSON path of each statement.
    pub no_comments: bool,
    /// Output file (default: stdout).
    pub output: Option<PathBuf>,
    /// Configuration file.
    pub config: Option<PathBuf>,
}

/// Print the Cypher script that importing `file` would run.
///
/// Parameters are rendered inline, so the script runs as-is in a Cypher
/// shell.
pub fn cypher(file: &str, options: &CypherOptions) -> Result<(), CliError> {
    let mut config = load_config(options.config.as_deref())?;
    if let Some(dialect) = options.dialect {
        config.dialect = dialect;
    }
    let root_label = options
        .root_label
        .clone()
        .unwrap_or_else(|| config.root_label.clone());
    let value = read_input(file, &config)?;

    let mut importer = JsonImporter::with_config(ScriptRecorder::new(), config);
    if options.clear {
        importer.clear_db()?;
    }
    importer.convert(&value, &root_label)?;

    let script = importer.into_executor().into_script();
    debug!(statements = script.len(), "script generated");

    let mut rendered = script.render(!options.no_comments);
    rendered.push('\n');
    write_output(&rendered, options.output.as_deref())
}
