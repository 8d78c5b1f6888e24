// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn holder_id_contains_host_and_pid() {
    let holder = HolderId::new("runner-host", 1234);
    assert!(holder.as_str().starts_with("runner-host:1234:"));
}

#[test]
fn token_not_expired_before_ttl_elapses() {
    let token = LockToken::new(HolderId::new("h", 1), 1_000, Duration::from_secs(30));
    assert!(!token.is_expired(1_000 + 29_000));
}

#[test]
fn token_expired_after_ttl_elapses() {
    let token = LockToken::new(HolderId::new("h", 1), 1_000, Duration::from_secs(30));
    assert!(token.is_expired(1_000 + 30_000));
    assert!(token.is_expired(1_000 + 60_000));
}
