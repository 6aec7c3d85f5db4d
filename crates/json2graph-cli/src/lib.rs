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

//! json2graph CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **cypher**: Print the Cypher script an import would run
//! - **hash**: Print the content hash of a document or one of its sub-values
//! - **import**: Import a document into FalkorDB (`falkordb` feature)
//! - **stats**: Import into an in-memory graph and report node and
//!   deduplication counts
//!
//! # Environment
//!
//! `JSON2GRAPH_MAX_FILE_SIZE` overrides the maximum input file size in bytes.
//! `RUST_LOG` controls log output, which goes to stderr.
//!
//! # Examples
//!
//! ```no_run
//! use json2graph_cli::commands::{cypher, CypherOptions};
//!
//! # fn main() -> Result<(), json2graph_cli::error::CliError> {
//! cypher("person.json", &CypherOptions {
//!     root_label: Some("Person".to_string()),
//!     ..Default::default()
//! })?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
