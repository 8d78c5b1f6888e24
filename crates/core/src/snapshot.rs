// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ConfigSnapshot` / `StateSnapshot`: the in-memory mirror of a device's
//! configuration and operational-state databases.
//!
//! Keyed as `table_name -> key -> (field -> value)`, matching the store's
//! native `TABLE|key` concatenation (see `ntn-store` for the wire encoding).
//! A snapshot is loaded wholesale on connect and *replaced*, never patched,
//! after every `ChangeSet::apply`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One table's rows: key -> fields. Field order is preserved (`IndexMap`)
/// so re-serializing a fetched entry looks the same as what the store sent.
pub type TableRows = HashMap<String, IndexMap<String, String>>;

/// A full dump of one logical database on one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    tables: HashMap<String, TableRows>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: HashMap<String, TableRows>) -> Self {
        Self { tables }
    }

    pub fn table(&self, name: &str) -> Option<&TableRows> {
        self.tables.get(name)
    }

    pub fn get(&self, table: &str, key: &str) -> Option<&IndexMap<String, String>> {
        self.tables.get(table)?.get(key)
    }

    pub fn exists(&self, table: &str, key: &str) -> bool {
        self.get(table, key).is_some()
    }

    pub fn keys(&self, table: &str) -> Vec<String> {
        self.tables.get(table).map(|rows| rows.keys().cloned().collect()).unwrap_or_default()
    }

    /// Apply a single field-level write in place (used to build up a
    /// snapshot incrementally in tests; production code always reloads
    /// wholesale from the store after a `ChangeSet::apply`).
    pub fn set(&mut self, table: &str, key: &str, fields: IndexMap<String, String>) {
        self.tables.entry(table.to_string()).or_default().insert(key.to_string(), fields);
    }

    pub fn delete(&mut self, table: &str, key: &str) {
        if let Some(rows) = self.tables.get_mut(table) {
            rows.remove(key);
        }
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

/// Alias distinguishing the configuration-DB snapshot from the
/// operational-state-DB snapshot at call sites; both share the same shape.
pub type ConfigSnapshot = Snapshot;
pub type StateSnapshot = Snapshot;

/// The store's sentinel convention for field-less entries: a key that
/// exists but carries no meaningful fields materializes as a single
/// `NULL -> NULL` pair so the key itself is representable in a hash store.
pub const SENTINEL_FIELD: &str = "NULL";

pub fn is_sentinel_only(fields: &IndexMap<String, String>) -> bool {
    fields.len() == 1 && fields.get(SENTINEL_FIELD).is_some()
}

pub fn sentinel_fields() -> IndexMap<String, String> {
    let mut m = IndexMap::new();
    m.insert(SENTINEL_FIELD.to_string(), SENTINEL_FIELD.to_string());
    m
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
