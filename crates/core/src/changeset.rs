// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ChangeSet`: an ordered, previewable batch of mutations against one
//! device. Mutation primitives on the device handle build these; nothing
//! is written to the remote store until `Device::apply` consumes one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single field-level operation against one table/key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Add,
    Modify,
    Delete,
}

crate::simple_display! {
    ChangeOp {
        Add => "add",
        Modify => "modify",
        Delete => "delete",
    }
}

/// One mutation within a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub table: String,
    pub key: String,
    pub op: ChangeOp,
    /// New field values. Empty for `Delete`.
    pub new_fields: IndexMap<String, String>,
}

impl Change {
    pub fn add(table: impl Into<String>, key: impl Into<String>, fields: IndexMap<String, String>) -> Self {
        Self { table: table.into(), key: key.into(), op: ChangeOp::Add, new_fields: fields }
    }

    pub fn modify(table: impl Into<String>, key: impl Into<String>, fields: IndexMap<String, String>) -> Self {
        Self { table: table.into(), key: key.into(), op: ChangeOp::Modify, new_fields: fields }
    }

    pub fn delete(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self { table: table.into(), key: key.into(), op: ChangeOp::Delete, new_fields: IndexMap::new() }
    }

    fn table_key(&self) -> (&str, &str) {
        (&self.table, &self.key)
    }
}

/// An ordered, immutable batch of [`Change`]s against one device.
///
/// Built via [`ChangeSetBuilder`]; once built, `changes()` is frozen. The
/// `dry_run` flag lets callers preview a `ChangeSet` (render it, diff it)
/// without ever calling `Device::apply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub device: String,
    pub operation: String,
    pub timestamp_ms: u64,
    pub dry_run: bool,
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns the changes reordered so that, for any table/key touched by
    /// both a `Delete` and an `Add`/`Modify`, the `Delete` is applied first.
    /// Relative order is otherwise preserved (a stable partition).
    ///
    /// This is the ordering guarantee: "deletes precede adds when
    /// both touch the same key" — required so re-creating a key that is
    /// also being removed in the same `ChangeSet` lands in the post-delete
    /// state rather than being clobbered by the delete that runs after it.
    pub fn apply_order(&self) -> Vec<&Change> {
        use std::collections::HashSet;

        let delete_keys: HashSet<(&str, &str)> =
            self.changes.iter().filter(|c| c.op == ChangeOp::Delete).map(Change::table_key).collect();
        let write_keys: HashSet<(&str, &str)> =
            self.changes.iter().filter(|c| c.op != ChangeOp::Delete).map(Change::table_key).collect();
        let conflicting: HashSet<(&str, &str)> = delete_keys.intersection(&write_keys).copied().collect();

        let mut ordered = Vec::with_capacity(self.changes.len());
        let mut deferred = Vec::new();
        for change in &self.changes {
            if change.op != ChangeOp::Delete && conflicting.contains(&change.table_key()) {
                deferred.push(change);
            } else {
                ordered.push(change);
            }
        }
        ordered.extend(deferred);
        ordered
    }
}

/// Builds a [`ChangeSet`] by accumulating [`Change`]s in declaration order.
pub struct ChangeSetBuilder {
    device: String,
    operation: String,
    timestamp_ms: u64,
    dry_run: bool,
    changes: Vec<Change>,
}

impl ChangeSetBuilder {
    pub fn new(device: impl Into<String>, operation: impl Into<String>, timestamp_ms: u64) -> Self {
        Self { device: device.into(), operation: operation.into(), timestamp_ms, dry_run: false, changes: Vec::new() }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn push(mut self, change: Change) -> Self {
        self.changes.push(change);
        self
    }

    pub fn extend(mut self, changes: impl IntoIterator<Item = Change>) -> Self {
        self.changes.extend(changes);
        self
    }

    pub fn build(self) -> ChangeSet {
        ChangeSet {
            device: self.device,
            operation: self.operation,
            timestamp_ms: self.timestamp_ms,
            dry_run: self.dry_run,
            changes: self.changes,
        }
    }
}

#[cfg(test)]
#[path = "changeset_tests.rs"]
mod tests;
