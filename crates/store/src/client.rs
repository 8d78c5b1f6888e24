// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The key/hash store client: a thin, typed wrapper over a remote
//! Redis-shaped store, reached either directly over TCP or tunneled
//! through SSH when a device's store only binds loopback.

use crate::db::DbId;
use crate::error::StoreError;
use crate::wire::{decode_fields, decode_key, encode_fields, encode_key};
use async_trait::async_trait;
use indexmap::IndexMap;
use ntn_core::{ConfigSnapshot, TableRows};
use std::collections::HashMap;

/// Typed, table-scoped CRUD plus a whole-DB snapshot loader.
///
/// Implementations must use cursor-based iteration (`SCAN`, never `KEYS`)
/// for `get_all`/`table_keys` so a long-lived store is never stalled by a
/// blocking enumerate.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Idempotent TCP ping / connection establishment.
    async fn connect(&self) -> Result<(), StoreError>;

    /// Full dump of one logical database, typed into table-specific rows.
    async fn get_all(&self, db: DbId) -> Result<ConfigSnapshot, StoreError>;

    async fn get(&self, db: DbId, table: &str, key: &str) -> Result<IndexMap<String, String>, StoreError>;

    async fn set(&self, db: DbId, table: &str, key: &str, fields: IndexMap<String, String>) -> Result<(), StoreError>;

    async fn delete(&self, db: DbId, table: &str, key: &str) -> Result<(), StoreError>;

    async fn delete_field(&self, db: DbId, table: &str, key: &str, field: &str) -> Result<(), StoreError>;

    async fn exists(&self, db: DbId, table: &str, key: &str) -> Result<bool, StoreError>;

    async fn table_keys(&self, db: DbId, table: &str) -> Result<Vec<String>, StoreError>;
}

/// Production client backed by `redis`'s tokio connection manager, which
/// transparently reconnects on transient transport failure.
pub struct RedisStoreClient {
    manager: redis::aio::ConnectionManager,
}

impl RedisStoreClient {
    pub async fn connect_tcp(addr: &str, port: u16) -> Result<Self, StoreError> {
        let client = redis::Client::open(format!("redis://{addr}:{port}"))?;
        let manager = client.get_connection_manager().await?;
        Ok(Self { manager })
    }

    /// Build a client sharing an existing connection manager — needed when
    /// a device's store is only reachable through a single-connection SSH
    /// tunnel, so `RedisLockOps` and this client must reuse one manager
    /// rather than opening a second connection through the same forward.
    pub fn from_manager(manager: redis::aio::ConnectionManager) -> Self {
        Self { manager }
    }

    fn conn(&self) -> redis::aio::ConnectionManager {
        self.manager.clone()
    }
}

#[async_trait]
impl StoreClient for RedisStoreClient {
    async fn connect(&self) -> Result<(), StoreError> {
        let _: String = redis::cmd("PING").query_async(&mut self.conn()).await?;
        Ok(())
    }

    async fn get_all(&self, db: DbId) -> Result<ConfigSnapshot, StoreError> {
        use redis::AsyncCommands;
        let mut conn = self.conn();
        redis::cmd("SELECT").arg(db.index()).query_async::<()>(&mut conn).await?;

        let mut tables: HashMap<String, TableRows> = HashMap::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, keys): (u64, Vec<String>) =
                redis::cmd("SCAN").arg(cursor).arg("COUNT").arg(500).query_async(&mut conn).await?;
            for raw_key in &keys {
                let Some((table, key)) = decode_key(db, raw_key) else { continue };
                let raw_fields: HashMap<String, String> = conn.hgetall(raw_key).await?;
                let mut fields = IndexMap::new();
                for (f, v) in raw_fields {
                    fields.insert(f, v);
                }
                tables.entry(table).or_default().insert(key, decode_fields(fields));
            }
            cursor = next;
            if cursor == 0 {
                break;
            }
        }
        Ok(ConfigSnapshot::from_tables(tables))
    }

    async fn get(&self, db: DbId, table: &str, key: &str) -> Result<IndexMap<String, String>, StoreError> {
        use redis::AsyncCommands;
        let mut conn = self.conn();
        redis::cmd("SELECT").arg(db.index()).query_async::<()>(&mut conn).await?;
        let raw_key = encode_key(db, table, key);
        let raw_fields: HashMap<String, String> = conn.hgetall(&raw_key).await?;
        let mut fields = IndexMap::new();
        for (f, v) in raw_fields {
            fields.insert(f, v);
        }
        Ok(decode_fields(fields))
    }

    async fn set(&self, db: DbId, table: &str, key: &str, fields: IndexMap<String, String>) -> Result<(), StoreError> {
        use redis::AsyncCommands;
        let mut conn = self.conn();
        redis::cmd("SELECT").arg(db.index()).query_async::<()>(&mut conn).await?;
        let raw_key = encode_key(db, table, key);
        let encoded = encode_fields(&fields);
        let pairs: Vec<(String, String)> = encoded.into_iter().collect();
        conn.hset_multiple::<_, _, _, ()>(&raw_key, &pairs).await?;
        Ok(())
    }

    async fn delete(&self, db: DbId, table: &str, key: &str) -> Result<(), StoreError> {
        use redis::AsyncCommands;
        let mut conn = self.conn();
        redis::cmd("SELECT").arg(db.index()).query_async::<()>(&mut conn).await?;
        let raw_key = encode_key(db, table, key);
        conn.del::<_, ()>(&raw_key).await?;
        Ok(())
    }

    async fn delete_field(&self, db: DbId, table: &str, key: &str, field: &str) -> Result<(), StoreError> {
        use redis::AsyncCommands;
        let mut conn = self.conn();
        redis::cmd("SELECT").arg(db.index()).query_async::<()>(&mut conn).await?;
        let raw_key = encode_key(db, table, key);
        conn.hdel::<_, _, ()>(&raw_key, field).await?;
        Ok(())
    }

    async fn exists(&self, db: DbId, table: &str, key: &str) -> Result<bool, StoreError> {
        use redis::AsyncCommands;
        let mut conn = self.conn();
        redis::cmd("SELECT").arg(db.index()).query_async::<()>(&mut conn).await?;
        let raw_key = encode_key(db, table, key);
        Ok(conn.exists(&raw_key).await?)
    }

    async fn table_keys(&self, db: DbId, table: &str) -> Result<Vec<String>, StoreError> {
        use redis::AsyncCommands;
        let mut conn = self.conn();
        redis::cmd("SELECT").arg(db.index()).query_async::<()>(&mut conn).await?;
        let pattern = format!("{}{}*", table, crate::wire::separator(db));
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) =
                redis::cmd("SCAN").arg(cursor).arg("MATCH").arg(&pattern).arg("COUNT").arg(500).query_async(&mut conn).await?;
            for raw_key in batch {
                if let Some((_, key)) = decode_key(db, &raw_key) {
                    keys.push(key);
                }
            }
            cursor = next;
            if cursor == 0 {
                break;
            }
        }
        Ok(keys)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// In-memory store for deterministic unit tests, implementing the same
    /// `StoreClient` contract the production Redis-backed client does.
    #[derive(Clone, Default)]
    pub struct FakeStoreClient {
        inner: Arc<Mutex<HashMap<DbId, HashMap<(String, String), IndexMap<String, String>>>>>,
    }

    impl FakeStoreClient {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl StoreClient for FakeStoreClient {
        async fn connect(&self) -> Result<(), StoreError> {
            Ok(())
        }

        async fn get_all(&self, db: DbId) -> Result<ConfigSnapshot, StoreError> {
            let guard = self.inner.lock();
            let mut tables: HashMap<String, TableRows> = HashMap::new();
            if let Some(rows) = guard.get(&db) {
                for ((table, key), fields) in rows {
                    tables.entry(table.clone()).or_default().insert(key.clone(), fields.clone());
                }
            }
            Ok(ConfigSnapshot::from_tables(tables))
        }

        async fn get(&self, db: DbId, table: &str, key: &str) -> Result<IndexMap<String, String>, StoreError> {
            let guard = self.inner.lock();
            Ok(guard
                .get(&db)
                .and_then(|rows| rows.get(&(table.to_string(), key.to_string())))
                .cloned()
                .unwrap_or_default())
        }

        async fn set(&self, db: DbId, table: &str, key: &str, fields: IndexMap<String, String>) -> Result<(), StoreError> {
            let mut guard = self.inner.lock();
            guard.entry(db).or_default().insert((table.to_string(), key.to_string()), fields);
            Ok(())
        }

        async fn delete(&self, db: DbId, table: &str, key: &str) -> Result<(), StoreError> {
            let mut guard = self.inner.lock();
            if let Some(rows) = guard.get_mut(&db) {
                rows.remove(&(table.to_string(), key.to_string()));
            }
            Ok(())
        }

        async fn delete_field(&self, db: DbId, table: &str, key: &str, field: &str) -> Result<(), StoreError> {
            let mut guard = self.inner.lock();
            if let Some(rows) = guard.get_mut(&db) {
                if let Some(fields) = rows.get_mut(&(table.to_string(), key.to_string())) {
                    fields.shift_remove(field);
                }
            }
            Ok(())
        }

        async fn exists(&self, db: DbId, table: &str, key: &str) -> Result<bool, StoreError> {
            let guard = self.inner.lock();
            Ok(guard.get(&db).map(|rows| rows.contains_key(&(table.to_string(), key.to_string()))).unwrap_or(false))
        }

        async fn table_keys(&self, db: DbId, table: &str) -> Result<Vec<String>, StoreError> {
            let guard = self.inner.lock();
            Ok(guard
                .get(&db)
                .map(|rows| {
                    rows.keys().filter(|(t, _)| t == table).map(|(_, k)| k.clone()).collect()
                })
                .unwrap_or_default())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeStoreClient;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
