// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for executor tests: a connected (never pre-locked —
//! the dispatcher owns locking) fake device, and a default test context.

use crate::executor::ActionContext;
use ntn_core::{test_support::test_device_profile, FakeClock, HolderId};
use ntn_device::Device;
use ntn_store::{db::DbId, FakeLockOps, FakeStoreClient, StoreClient};
use std::sync::Arc;
use std::time::Duration;

pub async fn connected_device(name: &str) -> Arc<Device> {
    let profile = test_device_profile(name);
    let dev = Device::new(profile, Arc::new(FakeStoreClient::new()), Arc::new(FakeLockOps::new()));
    // The fake store's `connect` is infallible; a real failure here would
    // mean the fixture itself is broken, not the code under test.
    let _ = dev.connect().await;
    Arc::new(dev)
}

/// A connected device whose `PORT` table is pre-seeded with `interfaces`,
/// for actions (VRF binding, service application, ACL binding, ...) that
/// precondition on an interface already existing — something only the
/// underlying switch, never an action, creates.
pub async fn connected_device_with_interfaces(name: &str, interfaces: &[&str]) -> Arc<Device> {
    let store = Arc::new(FakeStoreClient::new());
    for iface in interfaces {
        store.set(DbId::Config, "PORT", iface, indexmap::IndexMap::new()).await.ok();
    }
    let profile = test_device_profile(name);
    let dev = Device::new(profile, store, Arc::new(FakeLockOps::new()));
    let _ = dev.connect().await;
    Arc::new(dev)
}

/// A connected device with both an interface and a declared `SERVICE`
/// bundle pre-seeded, for `apply-service`/`remove-service` tests.
pub async fn connected_device_with_service(name: &str, iface: &str, service: &str) -> Arc<Device> {
    let store = Arc::new(FakeStoreClient::new());
    store.set(DbId::Config, "PORT", iface, indexmap::IndexMap::new()).await.ok();
    store.set(DbId::Config, "SERVICE", service, indexmap::IndexMap::new()).await.ok();
    let profile = test_device_profile(name);
    let dev = Device::new(profile, store, Arc::new(FakeLockOps::new()));
    let _ = dev.connect().await;
    Arc::new(dev)
}

pub fn test_ctx() -> ActionContext<FakeClock> {
    ActionContext::new(FakeClock::new(), HolderId::new("test-host", 1), Duration::from_secs(30), 8)
}
