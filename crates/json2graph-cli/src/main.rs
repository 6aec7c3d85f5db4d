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

//! json2graph command line interface

use clap::Parser;
use json2graph_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// json2graph - import JSON documents into property graphs
///
/// Every distinct sub-value of a document becomes one graph node, identified
/// by the SHA-256 hash of its canonical form.
///
/// # Examples
///
/// ```bash
/// # Print the Cypher an import would run
/// json2graph cypher person.json --root-label Person
///
/// # Content hash of a sub-value
/// json2graph hash person.json --pointer /address
///
/// # Dry run against an in-memory graph
/// json2graph stats person.json
///
/// # Import into FalkorDB (requires the `falkordb` feature)
/// json2graph import person.json --url redis://127.0.0.1:6379 --graph people
/// ```
#[derive(Parser)]
#[command(name = "json2graph")]
#[command(author, version, about = "json2graph - JSON to property graph import", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("json2graph=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
