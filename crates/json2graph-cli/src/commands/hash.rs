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

//! Content hash of a document.

use super::{load_config, read_input};
use crate::error::CliError;
use json2graph::content_hash;

/// Print the content hash of `file`, or of the value at the JSON `pointer`
/// inside it (e.g. `/address/0`).
pub fn hash(file: &str, pointer: Option<&str>) -> Result<(), CliError> {
    let config = load_config(None)?;
    let value = read_input(file, &config)?;

    let target = match pointer {
        Some(p) => value
            .pointer(p)
            .ok_or_else(|| CliError::PointerNotFound(p.to_string()))?,
        None => &value,
    };

    println!("{}", content_hash(target));
    Ok(())
}
