// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key/hash store access for the fabric devices under test: wire
//! encoding for the three logical databases, a typed CRUD client over
//! direct or SSH-tunneled Redis, and the atomic lock operations that
//! guard a device against concurrent mutation.
//!
//! Nothing in this crate knows about scenarios, actions, or YAML; it is
//! the one place that speaks the store's actual wire protocol.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod client;
pub mod db;
pub mod error;
pub mod lock_ops;
pub mod tunnel;
pub mod wire;

pub use client::{RedisStoreClient, StoreClient};
pub use db::DbId;
pub use error::StoreError;
pub use lock_ops::{AcquireOutcome, LockOps, RedisLockOps, ReleaseError};
pub use tunnel::{SshTunnel, TunnelPool};
pub use wire::{decode_fields, decode_key, encode_fields, encode_key, separator};

#[cfg(any(test, feature = "test-support"))]
pub use client::FakeStoreClient;
#[cfg(any(test, feature = "test-support"))]
pub use lock_ops::FakeLockOps;
