// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic acquire/release against the per-device distributed lock held in
//! the State DB under `NEWTRON_LOCK|<device>`.
//!
//! Acquire and release both need a compare-and-swap that a plain
//! get-then-set cannot give atomically over a network round trip, so the
//! Redis-backed implementation expresses both as Lua scripts run with a
//! single `EVAL`.

use async_trait::async_trait;
use ntn_core::{DeviceLocked, HolderId, HolderMismatch, LockToken, NotLocked};
use std::time::Duration;

const HOLDER_FIELD: &str = "holder";
const ACQUIRED_AT_FIELD: &str = "acquired_at_ms";
const TTL_FIELD: &str = "ttl_ms";

const ACQUIRE_SCRIPT: &str = r#"
local key = KEYS[1]
local holder = ARGV[1]
local acquired_at_ms = ARGV[2]
local ttl_ms = ARGV[3]
local now_ms = tonumber(ARGV[4])

local existing_holder = redis.call('HGET', key, 'holder')
if existing_holder then
    local existing_acquired_at = tonumber(redis.call('HGET', key, 'acquired_at_ms'))
    local existing_ttl = tonumber(redis.call('HGET', key, 'ttl_ms'))
    if now_ms < existing_acquired_at + existing_ttl then
        return existing_holder
    end
end

redis.call('HSET', key, 'holder', holder, 'acquired_at_ms', acquired_at_ms, 'ttl_ms', ttl_ms)
return false
"#;

const RELEASE_SCRIPT: &str = r#"
local key = KEYS[1]
local holder = ARGV[1]

local existing_holder = redis.call('HGET', key, 'holder')
if not existing_holder then
    return 'not_locked'
end
if existing_holder ~= holder then
    return existing_holder
end

redis.call('DEL', key)
return false
"#;

/// Outcome of an acquire attempt: either the caller now holds the lock,
/// or someone else already does.
pub enum AcquireOutcome {
    Acquired(LockToken),
    HeldBy(LockToken),
}

#[async_trait]
pub trait LockOps: Send + Sync {
    async fn acquire(&self, device: &str, holder: HolderId, ttl: Duration, now_ms: u64) -> Result<AcquireOutcome, DeviceLocked>;

    async fn release(&self, device: &str, holder: &HolderId) -> Result<(), ReleaseError>;

    async fn current(&self, device: &str) -> Option<LockToken>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error(transparent)]
    NotLocked(#[from] NotLocked),
    #[error(transparent)]
    HolderMismatch(#[from] HolderMismatch),
    #[error("store error: {0}")]
    Store(#[from] crate::error::StoreError),
}

fn key_for(device: &str) -> String {
    crate::wire::encode_key(crate::db::DbId::State, "NEWTRON_LOCK", device)
}

/// Production implementation running the acquire/release Lua scripts
/// against the State DB on a `redis::aio::ConnectionManager`.
pub struct RedisLockOps {
    manager: redis::aio::ConnectionManager,
}

impl RedisLockOps {
    pub fn new(manager: redis::aio::ConnectionManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl LockOps for RedisLockOps {
    async fn acquire(&self, device: &str, holder: HolderId, ttl: Duration, now_ms: u64) -> Result<AcquireOutcome, DeviceLocked> {
        let mut conn = self.manager.clone();
        let key = key_for(device);
        let ttl_ms = ttl.as_millis() as u64;
        let script = redis::Script::new(ACQUIRE_SCRIPT);
        let result: redis::Value = script
            .key(&key)
            .arg(holder.as_str())
            .arg(now_ms)
            .arg(ttl_ms)
            .arg(now_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(|_| DeviceLocked(device.to_string()))?;

        match result {
            redis::Value::Nil | redis::Value::Boolean(false) => {
                Ok(AcquireOutcome::Acquired(LockToken::new(holder, now_ms, ttl)))
            }
            redis::Value::BulkString(bytes) => {
                let existing = String::from_utf8_lossy(&bytes).to_string();
                Ok(AcquireOutcome::HeldBy(LockToken::new(HolderId::from(existing), now_ms, ttl)))
            }
            _ => Err(DeviceLocked(device.to_string())),
        }
    }

    async fn release(&self, device: &str, holder: &HolderId) -> Result<(), ReleaseError> {
        let mut conn = self.manager.clone();
        let key = key_for(device);
        let script = redis::Script::new(RELEASE_SCRIPT);
        let result: redis::Value =
            script.key(&key).arg(holder.as_str()).invoke_async(&mut conn).await.map_err(|e| {
                ReleaseError::Store(crate::error::StoreError::Transport(e.to_string()))
            })?;

        match result {
            redis::Value::Nil | redis::Value::Boolean(false) => Ok(()),
            redis::Value::BulkString(bytes) => {
                let text = String::from_utf8_lossy(&bytes).to_string();
                if text == "not_locked" {
                    Err(NotLocked(device.to_string()).into())
                } else {
                    Err(HolderMismatch { device: device.to_string(), expected: holder.as_str().to_string(), actual: text }.into())
                }
            }
            _ => Err(NotLocked(device.to_string()).into()),
        }
    }

    async fn current(&self, device: &str) -> Option<LockToken> {
        let mut conn = self.manager.clone();
        let key = key_for(device);
        let fields: std::collections::HashMap<String, String> = redis::cmd("HGETALL").arg(&key).query_async(&mut conn).await.ok()?;
        let holder = fields.get(HOLDER_FIELD)?.clone();
        let acquired_at_ms: u64 = fields.get(ACQUIRED_AT_FIELD)?.parse().ok()?;
        let ttl_ms: u64 = fields.get(TTL_FIELD)?.parse().ok()?;
        Some(LockToken::new(HolderId::from(holder), acquired_at_ms, Duration::from_millis(ttl_ms)))
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// In-memory lock table for deterministic tests. Not truly
    /// concurrency-safe across processes, only within one test's threads.
    #[derive(Clone, Default)]
    pub struct FakeLockOps {
        locks: Arc<Mutex<HashMap<String, LockToken>>>,
    }

    impl FakeLockOps {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl LockOps for FakeLockOps {
        async fn acquire(&self, device: &str, holder: HolderId, ttl: Duration, now_ms: u64) -> Result<AcquireOutcome, DeviceLocked> {
            let mut guard = self.locks.lock();
            if let Some(existing) = guard.get(device) {
                if !existing.is_expired(now_ms) {
                    return Ok(AcquireOutcome::HeldBy(existing.clone()));
                }
            }
            let token = LockToken::new(holder, now_ms, ttl);
            guard.insert(device.to_string(), token.clone());
            Ok(AcquireOutcome::Acquired(token))
        }

        async fn release(&self, device: &str, holder: &HolderId) -> Result<(), ReleaseError> {
            let mut guard = self.locks.lock();
            match guard.get(device) {
                None => Err(NotLocked(device.to_string()).into()),
                Some(existing) if existing.holder.as_str() != holder.as_str() => Err(HolderMismatch {
                    device: device.to_string(),
                    expected: holder.as_str().to_string(),
                    actual: existing.holder.as_str().to_string(),
                }
                .into()),
                Some(_) => {
                    guard.remove(device);
                    Ok(())
                }
            }
        }

        async fn current(&self, device: &str) -> Option<LockToken> {
            self.locks.lock().get(device).cloned()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLockOps;

#[cfg(test)]
#[path = "lock_ops_tests.rs"]
mod tests;
