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

//! The boundary between the importer and a graph store.
//!
//! An executor runs one [`CypherStatement`] at a time and reports whether
//! the store accepted it. Executors that speak Cypher use the query text and
//! parameters; [`MemoryGraph`] uses the structured
//! [`GraphWrite`](crate::emitter::GraphWrite) attached to each statement.

mod memory;
mod recorder;

#[cfg(feature = "falkordb")]
mod falkordb;

pub use memory::{Fault, MemoryGraph, StoredNode, StoredRelationship};
pub use recorder::ScriptRecorder;

#[cfg(feature = "falkordb")]
pub use falkordb::FalkorDbExecutor;

use crate::cypher::CypherStatement;
use crate::error::StoreError;

/// Runs statements against a graph store.
pub trait QueryExecutor {
    /// Execute `statement`, waiting for the store to accept or reject it.
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), StoreError>;
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for &mut E {
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), StoreError> {
        (**self).execute(statement)
    }
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for Box<E> {
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), StoreError> {
        (**self).execute(statement)
    }
}
