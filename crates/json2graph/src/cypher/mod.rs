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

//! Cypher query building utilities.
//!
//! Everything that ends up inside query text passes through this module:
//! labels and relationship types through [`sanitize`], values through
//! [`literal`] and [`statements::CypherValue`].

pub mod literal;
pub mod sanitize;
pub mod statements;

pub use literal::{escape_identifier, escape_string, format_literal, json_scalar, quote_string};
pub use sanitize::{
    element_relationship, escape_label, escape_relationship_type, is_valid_label, relationship_type,
    sanitize_label, FALLBACK_LABEL,
};
pub use statements::{CypherScript, CypherStatement, CypherValue, StatementType};
