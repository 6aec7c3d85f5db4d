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

//! Session-scoped record of what has already been written to the store.
//!
//! The cache is an optimization, not a correctness mechanism: the store-side
//! `MERGE` keeps imports idempotent without it. What the cache must never do
//! is claim a node exists after the store was wiped, so it is only ever
//! cleared together with the store (see `JsonImporter::clear_db`).

use crate::hash::ContentHash;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RelationshipKey {
    from: ContentHash,
    to: ContentHash,
    rel_type: String,
}

/// Hashes (with their labels) and relationships materialized in this session.
#[derive(Debug, Clone, Default)]
pub struct NodeCache {
    nodes: HashMap<ContentHash, BTreeSet<String>>,
    relationships: HashSet<RelationshipKey>,
}

impl NodeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a node with this hash was materialized.
    pub fn has(&self, hash: &ContentHash) -> bool {
        self.nodes.contains_key(hash)
    }

    /// Check if the node with this hash already carries `label`.
    pub fn has_label(&self, hash: &ContentHash, label: &str) -> bool {
        self.nodes
            .get(hash)
            .is_some_and(|labels| labels.contains(label))
    }

    /// Labels recorded for a node, in sorted order.
    pub fn labels(&self, hash: &ContentHash) -> Option<&BTreeSet<String>> {
        self.nodes.get(hash)
    }

    /// Record that a node exists in the store with `label`.
    pub fn mark(&mut self, hash: ContentHash, label: impl Into<String>) {
        self.nodes.entry(hash).or_default().insert(label.into());
    }

    /// Check if a relationship was merged in this session.
    pub fn has_relationship(&self, from: &ContentHash, to: &ContentHash, rel_type: &str) -> bool {
        self.relationships.contains(&RelationshipKey {
            from: from.clone(),
            to: to.clone(),
            rel_type: rel_type.to_string(),
        })
    }

    /// Record a merged relationship. Returns false if it was already known.
    pub fn mark_relationship(
        &mut self,
        from: ContentHash,
        to: ContentHash,
        rel_type: impl Into<String>,
    ) -> bool {
        self.relationships.insert(RelationshipKey {
            from,
            to,
            rel_type: rel_type.into(),
        })
    }

    /// Forget everything. Only call this right after the store was wiped.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.relationships.clear();
    }

    /// Number of cached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no node is cached.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of cached relationships.
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }
}
