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

//! JSON path strings used to locate values in warnings and errors.
//!
//! Paths use the familiar JSONPath shape: `$` for the root, `.key` for plain
//! keys, `['odd key']` for anything else and `[3]` for array positions.

/// Path of the document root.
pub const ROOT: &str = "$";

/// Path of the entry `key` inside the object at `parent`.
///
/// ```
/// # use json2graph::path::child_key;
/// assert_eq!(child_key("$", "name"), "$.name");
/// assert_eq!(child_key("$.a", "odd key"), "$.a['odd key']");
/// assert_eq!(child_key("$", "it's"), "$['it\\'s']");
/// ```
pub fn child_key(parent: &str, key: &str) -> String {
    if is_plain_key(key) {
        format!("{}.{}", parent, key)
    } else {
        let mut path = String::with_capacity(parent.len() + key.len() + 4);
        path.push_str(parent);
        path.push_str("['");
        for c in key.chars() {
            if c == '\'' || c == '\\' {
                path.push('\\');
            }
            path.push(c);
        }
        path.push_str("']");
        path
    }
}

/// Path of the element at `index` inside the array at `parent`.
pub fn child_index(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths() {
        let tags = child_key(ROOT, "tags");
        assert_eq!(child_index(&tags, 0), "$.tags[0]");
        assert_eq!(child_key(&child_index(&tags, 2), "id"), "$.tags[2].id");
    }

    #[test]
    fn test_keys_needing_brackets() {
        assert_eq!(child_key(ROOT, ""), "$['']");
        assert_eq!(child_key(ROOT, "1st"), "$['1st']");
        assert_eq!(child_key(ROOT, "a.b"), "$['a.b']");
        assert_eq!(child_key(ROOT, "back\\slash"), "$['back\\\\slash']");
        assert_eq!(child_key(ROOT, "José"), "$['José']");
    }
}
