// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-level key encoding for the store's native `TABLE|key` (or
//! `TABLE:key` for the application DB) concatenation.

use crate::db::DbId;
use indexmap::IndexMap;
use ntn_core::{is_sentinel_only, sentinel_fields};

/// Separator used by a given logical database.
pub fn separator(db: DbId) -> char {
    match db {
        DbId::Application => ':',
        DbId::Config | DbId::State => '|',
    }
}

/// Join a table name and entry key into the store's native encoding.
pub fn encode_key(db: DbId, table: &str, key: &str) -> String {
    format!("{}{}{}", table, separator(db), key)
}

/// Split a raw store key back into `(table, key)` using the database's
/// separator convention. Returns `None` if the key has no separator.
pub fn decode_key(db: DbId, raw: &str) -> Option<(String, String)> {
    let sep = separator(db);
    let idx = raw.find(sep)?;
    Some((raw[..idx].to_string(), raw[idx + sep.len_utf8()..].to_string()))
}

/// Prepare a field map for writing: field-less entries materialize with
/// the store's sentinel convention so the key exists in a hash store that
/// cannot represent an empty hash.
pub fn encode_fields(fields: &IndexMap<String, String>) -> IndexMap<String, String> {
    if fields.is_empty() {
        sentinel_fields()
    } else {
        fields.clone()
    }
}

/// Strip the sentinel back out on read, so callers never see `NULL: NULL`.
pub fn decode_fields(fields: IndexMap<String, String>) -> IndexMap<String, String> {
    if is_sentinel_only(&fields) {
        IndexMap::new()
    } else {
        fields
    }
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
