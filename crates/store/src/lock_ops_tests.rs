// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntn_core::HolderId;
use std::time::Duration;

#[tokio::test]
async fn acquire_on_unlocked_device_succeeds() {
    let ops = FakeLockOps::new();
    let outcome = ops.acquire("leaf1", HolderId::new("host", 1), Duration::from_secs(30), 1_000).await.unwrap();
    assert!(matches!(outcome, AcquireOutcome::Acquired(_)));
}

#[tokio::test]
async fn second_acquire_before_expiry_is_held_by_first() {
    let ops = FakeLockOps::new();
    let first = HolderId::new("host", 1);
    ops.acquire("leaf1", first.clone(), Duration::from_secs(30), 1_000).await.unwrap();
    let outcome = ops.acquire("leaf1", HolderId::new("host", 2), Duration::from_secs(30), 1_500).await.unwrap();
    match outcome {
        AcquireOutcome::HeldBy(token) => assert_eq!(token.holder, first),
        AcquireOutcome::Acquired(_) => panic!("expected HeldBy"),
    }
}

#[tokio::test]
async fn acquire_after_ttl_expiry_succeeds_for_new_holder() {
    let ops = FakeLockOps::new();
    ops.acquire("leaf1", HolderId::new("host", 1), Duration::from_secs(30), 1_000).await.unwrap();
    let outcome = ops.acquire("leaf1", HolderId::new("host", 2), Duration::from_secs(30), 1_000 + 30_001).await.unwrap();
    assert!(matches!(outcome, AcquireOutcome::Acquired(_)));
}

#[tokio::test]
async fn release_by_non_holder_is_holder_mismatch() {
    let ops = FakeLockOps::new();
    let first = HolderId::new("host", 1);
    ops.acquire("leaf1", first, Duration::from_secs(30), 1_000).await.unwrap();
    let err = ops.release("leaf1", &HolderId::new("host", 2)).await.unwrap_err();
    assert!(matches!(err, ReleaseError::HolderMismatch(_)));
}

#[tokio::test]
async fn release_on_unlocked_device_is_not_locked() {
    let ops = FakeLockOps::new();
    let err = ops.release("leaf1", &HolderId::new("host", 1)).await.unwrap_err();
    assert!(matches!(err, ReleaseError::NotLocked(_)));
}

#[tokio::test]
async fn release_by_holder_clears_the_lock() {
    let ops = FakeLockOps::new();
    let first = HolderId::new("host", 1);
    ops.acquire("leaf1", first.clone(), Duration::from_secs(30), 1_000).await.unwrap();
    ops.release("leaf1", &first).await.unwrap();
    assert!(ops.current("leaf1").await.is_none());
}
