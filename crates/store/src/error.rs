// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from the key/hash store client.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not connected")]
    NotConnected,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("ssh tunnel error: {0}")]
    Tunnel(String),
    #[error("malformed entry at {table}|{key}: {reason}")]
    Malformed { table: String, key: String, reason: String },
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Transport(e.to_string())
    }
}
