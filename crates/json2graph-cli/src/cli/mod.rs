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

//! CLI command definitions and argument parsing.

use crate::commands::{self, CypherOptions, ImportOptions, StatsOptions};
use crate::error::CliError;
use clap::Subcommand;
use json2graph::CypherDialect;
use std::path::PathBuf;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use json2graph_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Print the Cypher script an import would run
    ///
    /// Parameters are rendered inline so the output can be piped into a
    /// Cypher shell.
    Cypher {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        file: String,

        /// Label of the root node
        #[arg(short, long)]
        root_label: Option<String>,

        /// Dialect for index statements (falkordb, neo4j)
        #[arg(short, long)]
        dialect: Option<CypherDialect>,

        /// Delete the whole graph first
        #[arg(long)]
        clear: bool,

        /// Omit the JSON path comment above each statement
        #[arg(long)]
        no_comments: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Import configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the content hash of a document or sub-value
    Hash {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        file: String,

        /// JSON pointer to a sub-value (e.g. /address/0)
        #[arg(short, long)]
        pointer: Option<String>,
    },

    /// Import a document into FalkorDB
    ///
    /// Requires a build with the `falkordb` feature.
    Import {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        file: String,

        /// Label of the root node
        #[arg(short, long)]
        root_label: Option<String>,

        /// FalkorDB URL
        #[arg(short, long, default_value = commands::DEFAULT_URL)]
        url: String,

        /// Graph name
        #[arg(short, long, default_value = commands::DEFAULT_GRAPH)]
        graph: String,

        /// Delete the whole graph first
        #[arg(long)]
        clear: bool,

        /// Import configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Import into an in-memory graph and report what it produced
    Stats {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        file: String,

        /// Label of the root node
        #[arg(short, long)]
        root_label: Option<String>,

        /// Import configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - The input or configuration cannot be read or parsed
    /// - The document breaks a configured limit
    /// - The store rejects the import
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Cypher {
                file,
                root_label,
                dialect,
                clear,
                no_comments,
                output,
                config,
            } => commands::cypher(
                &file,
                &CypherOptions {
                    root_label,
                    dialect,
                    clear,
                    no_comments,
                    output,
                    config,
                },
            ),
            Commands::Hash { file, pointer } => commands::hash(&file, pointer.as_deref()),
            Commands::Import {
                file,
                root_label,
                url,
                graph,
                clear,
                config,
            } => commands::import(
                &file,
                &ImportOptions {
                    root_label,
                    url,
                    graph,
                    clear,
                    config,
                },
            ),
            Commands::Stats {
                file,
                root_label,
                config,
                json,
            } => commands::stats(
                &file,
                &StatsOptions {
                    root_label,
                    config,
                    json,
                },
            ),
        }
    }
}
