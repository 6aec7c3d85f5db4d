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

//! Content hashing.
//!
//! A node's identity is the SHA-256 digest of its canonical form:
//!
//! | Value | Encoding |
//! |-------|----------|
//! | `null` | `n` |
//! | `true` / `false` | `t` / `f` |
//! | signed integer | `i<decimal>;` |
//! | unsigned beyond `i64` | `u<decimal>;` |
//! | float | `d<shortest round-trip decimal>;` |
//! | string | `s<byte length>:<utf-8 bytes>` |
//! | array | `[<count>:` elements `]` |
//! | object | `{<count>:` (key as string, value) sorted by key bytes `}` |
//! | nested array or object | `h<content hash>` |
//!
//! Every value carries a type tag, so `1`, `1.0` and `"1"` never collide, and
//! every string is length-prefixed, so no two distinct values share a byte
//! sequence. Object keys are sorted, so insertion order never matters.
//!
//! A container refers to nested containers by their hash, so hashing a whole
//! document touches each byte a bounded number of times however deep it is.
//! The digests are computed bottom-up with an explicit stack; arbitrarily
//! deep input cannot overflow the call stack.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Hex length of a [`ContentHash`].
pub const CONTENT_HASH_LEN: usize = 64;

/// SHA-256 digest of a value's canonical form, as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Hex representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ContentHash {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == CONTENT_HASH_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            Ok(ContentHash(s.to_string()))
        } else {
            Err(format!("invalid content hash '{}'", s))
        }
    }
}

impl TryFrom<String> for ContentHash {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.0
    }
}

/// Destination for canonical bytes.
trait CanonicalSink {
    fn put(&mut self, bytes: &[u8]);
}

impl CanonicalSink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// SHA-256 that counts what it was fed.
#[derive(Default)]
struct DigestSink {
    hasher: Sha256,
    written: usize,
}

impl DigestSink {
    fn finish(self) -> (ContentHash, usize) {
        (ContentHash(hex::encode(self.hasher.finalize())), self.written)
    }
}

impl CanonicalSink for DigestSink {
    fn put(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
        self.written += bytes.len();
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

fn write_str<S: CanonicalSink>(sink: &mut S, s: &str) {
    sink.put(b"s");
    sink.put(s.len().to_string().as_bytes());
    sink.put(b":");
    sink.put(s.as_bytes());
}

fn write_number<S: CanonicalSink>(sink: &mut S, n: &Number) {
    if let Some(i) = n.as_i64() {
        sink.put(b"i");
        sink.put(i.to_string().as_bytes());
    } else if let Some(u) = n.as_u64() {
        sink.put(b"u");
        sink.put(u.to_string().as_bytes());
    } else {
        // Without arbitrary precision every remaining number is an f64.
        sink.put(b"d");
        sink.put(format!("{:?}", n.as_f64().unwrap_or(f64::NAN)).as_bytes());
    }
    sink.put(b";");
}

fn write_primitive<S: CanonicalSink>(sink: &mut S, value: &Value) {
    match value {
        Value::Null => sink.put(b"n"),
        Value::Bool(true) => sink.put(b"t"),
        Value::Bool(false) => sink.put(b"f"),
        Value::Number(n) => write_number(sink, n),
        Value::String(s) => write_str(sink, s),
        Value::Array(_) | Value::Object(_) => {}
    }
}

/// Object entries in canonical order.
fn sorted_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    entries
}

/// Children of `value` in the order they appear in its canonical form.
fn canonical_children(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => sorted_entries(map).into_iter().map(|(_, v)| v).collect(),
        _ => Vec::new(),
    }
}

fn write_child<'d, S: CanonicalSink>(
    sink: &mut S,
    child: &Value,
    digests: &mut impl Iterator<Item = &'d ContentHash>,
) {
    if is_container(child) {
        sink.put(b"h");
        if let Some(digest) = digests.next() {
            sink.put(digest.as_str().as_bytes());
        }
    } else {
        write_primitive(sink, child);
    }
}

/// Write the canonical form of `value`, taking the digests of its container
/// children, in canonical order, from `digests`.
fn write_shallow<'d, S: CanonicalSink>(
    sink: &mut S,
    value: &Value,
    digests: &mut impl Iterator<Item = &'d ContentHash>,
) {
    match value {
        Value::Array(items) => {
            sink.put(b"[");
            sink.put(items.len().to_string().as_bytes());
            sink.put(b":");
            for item in items {
                write_child(sink, item, digests);
            }
            sink.put(b"]");
        }
        Value::Object(map) => {
            sink.put(b"{");
            sink.put(map.len().to_string().as_bytes());
            sink.put(b":");
            for (key, child) in sorted_entries(map) {
                write_str(sink, key);
                write_child(sink, child, digests);
            }
            sink.put(b"}");
        }
        _ => write_primitive(sink, value),
    }
}

enum Step<'a> {
    Enter(&'a Value),
    Exit(&'a Value),
}

/// Digest every node-forming value under `value` bottom-up.
///
/// Each container is hashed over its own canonical form, in which container
/// children appear only as their digests, so every byte of the document is
/// fed to SHA-256 a bounded number of times regardless of depth. `record`
/// receives each container, each primitive array element and a primitive
/// root. Returns the root digest and the number of bytes hashed.
fn fold_digests<'v>(
    value: &'v Value,
    mut record: impl FnMut(&'v Value, &ContentHash),
) -> (ContentHash, usize) {
    let mut written = 0;
    let mut done: Vec<ContentHash> = Vec::new();
    let mut steps = vec![Step::Enter(value)];

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(current) if is_container(current) => {
                steps.push(Step::Exit(current));
                for child in canonical_children(current).into_iter().rev() {
                    if is_container(child) {
                        steps.push(Step::Enter(child));
                    }
                }
            }
            Step::Enter(current) => {
                let mut sink = DigestSink::default();
                write_primitive(&mut sink, current);
                let (digest, bytes) = sink.finish();
                written += bytes;
                record(current, &digest);
                done.push(digest);
            }
            Step::Exit(current) => {
                let children = canonical_children(current);
                let nested = children.iter().filter(|c| is_container(c)).count();
                let child_digests = done.split_off(done.len().saturating_sub(nested));

                let mut sink = DigestSink::default();
                write_shallow(&mut sink, current, &mut child_digests.iter());
                let (digest, bytes) = sink.finish();
                written += bytes;

                if let Value::Array(items) = current {
                    for item in items.iter().filter(|item| !is_container(item)) {
                        let mut sink = DigestSink::default();
                        write_primitive(&mut sink, item);
                        let (item_digest, bytes) = sink.finish();
                        written += bytes;
                        record(item, &item_digest);
                    }
                }
                record(current, &digest);
                done.push(digest);
            }
        }
    }

    let root = done.pop().unwrap_or_else(|| DigestSink::default().finish().0);
    (root, written)
}

/// Canonical byte form of a JSON value.
///
/// Primitive children are written inline; container children are written
/// as `h` followed by their [`ContentHash`].
///
/// ```
/// # use json2graph::hash::canonical_bytes;
/// # use serde_json::json;
/// assert_eq!(canonical_bytes(&json!({"b": 1, "a": "x"})), b"{2:s1:as1:xs1:bi1;}".to_vec());
/// ```
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    let digests: Vec<ContentHash> = canonical_children(value)
        .into_iter()
        .filter(|child| is_container(child))
        .map(content_hash)
        .collect();
    let mut bytes = Vec::new();
    write_shallow(&mut bytes, value, &mut digests.iter());
    bytes
}

/// Content hash of a JSON value.
///
/// ```
/// # use json2graph::hash::content_hash;
/// # use serde_json::json;
/// let a = content_hash(&json!({"name": "Test", "value": 123}));
/// let b = content_hash(&json!({"value": 123, "name": "Test"}));
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 64);
/// ```
pub fn content_hash(value: &Value) -> ContentHash {
    fold_digests(value, |_, _| {}).0
}

/// Content hashes of every node-forming value in one document.
///
/// Built once per import so that each node's hash is a lookup rather than a
/// walk over its subtree.
pub struct SubtreeHashes<'v> {
    root: ContentHash,
    digests: HashMap<*const Value, ContentHash>,
    bytes_hashed: usize,
    _document: PhantomData<&'v Value>,
}

impl<'v> SubtreeHashes<'v> {
    /// Hash `document` and every container, primitive array element and
    /// primitive root beneath it.
    pub fn new(document: &'v Value) -> Self {
        let mut digests = HashMap::new();
        let (root, bytes_hashed) = fold_digests(document, |value, digest| {
            digests.insert(value as *const Value, digest.clone());
        });
        Self {
            root,
            digests,
            bytes_hashed,
            _document: PhantomData,
        }
    }

    /// Hash of the document itself.
    pub fn root(&self) -> &ContentHash {
        &self.root
    }

    /// Hash of `value`, which must belong to this document. Values that were
    /// not recorded, such as primitives inside objects, are hashed on demand.
    pub fn get(&self, value: &'v Value) -> ContentHash {
        match self.digests.get(&(value as *const Value)) {
            Some(digest) => digest.clone(),
            None => content_hash(value),
        }
    }

    /// Total canonical bytes fed to SHA-256 while building.
    pub fn bytes_hashed(&self) -> usize {
        self.bytes_hashed
    }
}

impl fmt::Debug for SubtreeHashes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubtreeHashes")
            .field("root", &self.root)
            .field("values", &self.digests.len())
            .field("bytes_hashed", &self.bytes_hashed)
            .finish()
    }
}
