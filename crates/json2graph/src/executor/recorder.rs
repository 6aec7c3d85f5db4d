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

//! Executor that records statements instead of running them.

use super::QueryExecutor;
use crate::cypher::{CypherScript, CypherStatement};
use crate::error::StoreError;

/// Collects every statement into a [`CypherScript`].
///
/// Every statement is accepted, so the recorded script is what an import
/// would send to a store that never fails.
///
/// ```
/// use json2graph::{JsonImporter, ScriptRecorder};
/// use serde_json::json;
///
/// let mut importer = JsonImporter::new(ScriptRecorder::new());
/// importer.convert(&json!({"name": "Alice"}), "Person").unwrap();
/// let script = importer.into_executor().into_script();
/// assert!(script.render(false).contains("SET n:Person"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptRecorder {
    script: CypherScript,
}

impl ScriptRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements recorded so far.
    pub fn script(&self) -> &CypherScript {
        &self.script
    }

    /// Take the recorded script.
    pub fn into_script(self) -> CypherScript {
        self.script
    }
}

impl QueryExecutor for ScriptRecorder {
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), StoreError> {
        self.script.add(statement.clone());
        Ok(())
    }
}
