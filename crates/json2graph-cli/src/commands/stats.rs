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

//! In-memory dry run with node and deduplication counts.

use super::{load_config, read_input, write_output};
use crate::error::CliError;
use json2graph::{JsonImporter, MemoryGraph};
use serde_json::json;
use std::path::PathBuf;

/// Options for [`stats`].
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Label of the root node (default: the configured root label).
    pub root_label: Option<String>,
    /// Configuration file.
    pub config: Option<PathBuf>,
    /// Print JSON instead of a table.
    pub json: bool,
}

/// Import `file` into an empty in-memory graph and print what it produced.
pub fn stats(file: &str, options: &StatsOptions) -> Result<(), CliError> {
    let config = load_config(options.config.as_deref())?;
    let root_label = options
        .root_label
        .clone()
        .unwrap_or_else(|| config.root_label.clone());
    let value = read_input(file, &config)?;

    let mut importer = JsonImporter::with_config(MemoryGraph::new(), config);
    let report = importer.convert(&value, &root_label)?;
    let graph = importer.executor();
    let summary = report.document;

    let values = report.nodes_visited();
    let nodes = graph.node_count();
    let duplicates = values.saturating_sub(nodes);
    let ratio = if values == 0 {
        0.0
    } else {
        duplicates as f64 / values as f64 * 100.0
    };

    let output = if options.json {
        let mut out = serde_json::to_string_pretty(&json!({
            "file": file,
            "root": report.root.as_ref().map(|h| h.as_str()),
            "values": values,
            "nodes": nodes,
            "duplicates": duplicates,
            "relationships": graph.relationship_count(),
            "properties": summary.properties,
            "depth": summary.depth,
            "labels_added": report.labels_added,
            "warnings": report.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
        }))?;
        out.push('\n');
        out
    } else {
        let mut out = String::new();
        out.push_str(&format!("File:          {}\n", file));
        if let Some(root) = &report.root {
            out.push_str(&format!("Root:          {}\n", root));
        }
        out.push_str(&format!("Values:        {}\n", values));
        out.push_str(&format!("Nodes:         {}\n", nodes));
        out.push_str(&format!("Duplicates:    {} ({:.1}%)\n", duplicates, ratio));
        out.push_str(&format!("Relationships: {}\n", graph.relationship_count()));
        out.push_str(&format!("Properties:    {}\n", summary.properties));
        out.push_str(&format!("Depth:         {}\n", summary.depth));
        for warning in &report.warnings {
            out.push_str(&format!("Warning:       {}\n", warning));
        }
        out
    };

    write_output(&output, None)
}
