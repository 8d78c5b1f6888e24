// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use indexmap::IndexMap;
use ntn_core::{ChangeSetBuilder, DeviceProfile};
use ntn_store::{FakeLockOps, FakeStoreClient};
use std::net::Ipv4Addr;
use std::sync::Arc;

fn device() -> Device {
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    Device::new(profile, Arc::new(FakeStoreClient::new()), Arc::new(FakeLockOps::new()))
}

#[tokio::test]
async fn connect_loads_both_snapshots() {
    let store = Arc::new(FakeStoreClient::new());
    let mut fields = IndexMap::new();
    fields.insert("vlanid".to_string(), "500".to_string());
    store.set(ntn_store::db::DbId::Config, "VLAN", "Vlan500", fields).await.unwrap();

    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let dev = Device::new(profile, store, Arc::new(FakeLockOps::new()));
    assert!(!dev.is_connected());
    dev.connect().await.unwrap();
    assert!(dev.is_connected());
    assert!(dev.has_vlan(500));
}

#[tokio::test]
async fn lock_then_unlock_round_trips() {
    let dev = device();
    dev.connect().await.unwrap();
    let holder = ntn_core::HolderId::new("host", 1);
    dev.lock(holder, std::time::Duration::from_secs(30), 0).await.unwrap();
    assert!(dev.is_locked());
    dev.unlock().await.unwrap();
    assert!(!dev.is_locked());
}

#[tokio::test]
async fn second_lock_attempt_is_device_locked() {
    let dev = device();
    dev.connect().await.unwrap();
    dev.lock(ntn_core::HolderId::new("host", 1), std::time::Duration::from_secs(30), 0).await.unwrap();

    let err = dev.lock(ntn_core::HolderId::new("host", 2), std::time::Duration::from_secs(30), 1).await;
    assert!(matches!(err, Err(DeviceError::Locked(_))));
}

#[tokio::test]
async fn apply_deletes_before_adds_on_same_key() {
    let dev = device();
    dev.connect().await.unwrap();

    let mut fields = IndexMap::new();
    fields.insert("description".to_string(), "new".to_string());
    let cs = ChangeSetBuilder::new("leaf1", "test", 0)
        .push(ntn_core::Change::delete("VLAN", "Vlan500"))
        .push(ntn_core::Change::add("VLAN", "Vlan500", fields))
        .build();

    dev.apply(&cs).await.unwrap();
    let snap = dev.config_snapshot();
    assert_eq!(snap.get("VLAN", "Vlan500").unwrap().get("description").unwrap(), "new");
}

#[tokio::test]
async fn reload_invalidates_cache() {
    let dev = device();
    dev.connect().await.unwrap();
    assert!(!dev.has_vlan(500));

    let mut fields = IndexMap::new();
    fields.insert("vlanid".to_string(), "500".to_string());
    dev.store().set(ntn_store::db::DbId::Config, "VLAN", "Vlan500", fields).await.unwrap();
    // cache still says false until reload
    assert!(!dev.has_vlan(500));
    dev.reload().await.unwrap();
    assert!(dev.has_vlan(500));
}

#[test]
fn normalizes_short_aliases_on_lookup() {
    let dev = device();
    // no interface configured yet, but normalization should not panic on
    // aliases and should agree on the canonical name either way
    assert!(!dev.has_interface("Eth0"));
    assert!(!dev.has_interface("Ethernet0"));
}