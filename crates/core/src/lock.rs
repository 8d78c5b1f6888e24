// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `LockToken`: the value stored at `NEWTRON_LOCK|<device>` in the
//! operational-state DB while a device is reserved for mutation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identity of a lock holder: `host:pid:uuid`, unique per runner process
/// invocation so two runner processes (or two test harnesses) racing for
/// the same device never collide on holder identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderId(String);

impl HolderId {
    pub fn new(host: impl AsRef<str>, pid: u32) -> Self {
        Self(format!("{}:{}:{}", host.as_ref(), pid, uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for HolderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for HolderId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// The per-device distributed lock record. A device has a `LockToken` iff
/// some uncommitted mutation is in flight on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockToken {
    pub holder: HolderId,
    pub acquired_at_ms: u64,
    pub ttl: Duration,
}

impl LockToken {
    pub fn new(holder: HolderId, acquired_at_ms: u64, ttl: Duration) -> Self {
        Self { holder, acquired_at_ms, ttl }
    }

    pub fn expires_at_ms(&self) -> u64 {
        self.acquired_at_ms + self.ttl.as_millis() as u64
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms()
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
