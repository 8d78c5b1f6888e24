// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntn_core::{DeviceProfile, HolderId};
use ntn_store::{FakeLockOps, FakeStoreClient};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

async fn locked_device() -> Device {
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let dev = Device::new(profile, Arc::new(FakeStoreClient::new()), Arc::new(FakeLockOps::new()));
    dev.connect().await.unwrap();
    dev.lock(HolderId::new("host", 1), Duration::from_secs(30), 0).await.unwrap();
    dev
}

#[tokio::test]
async fn create_vlan_round_trip() {
    let dev = locked_device().await;
    let cs = dev.create_vlan(0, 500, VlanOpts { description: Some("x".to_string()) }).unwrap();
    dev.apply(&cs).await.unwrap();

    assert!(dev.has_vlan(500));
    let fields = dev.get_vlan(500).unwrap();
    assert_eq!(fields.get("vlanid").unwrap(), "500");
    assert_eq!(fields.get("description").unwrap(), "x");
}

#[tokio::test]
async fn create_vlan_twice_fails_validation() {
    let dev = locked_device().await;
    let cs = dev.create_vlan(0, 500, VlanOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();

    let err = dev.create_vlan(0, 500, VlanOpts::default());
    assert!(matches!(err, Err(DeviceError::Validation(_))));
}

#[tokio::test]
async fn delete_vlan_blocked_by_member() {
    let dev = locked_device().await;
    let cs = dev.create_vlan(0, 700, VlanOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();
    let cs = dev.add_vlan_member(0, 700, "Ethernet2", true).unwrap();
    // interface doesn't exist in the fake store yet; seed it directly
    drop(cs);
    dev.store()
        .set(ntn_store::db::DbId::Config, "PORT", "Ethernet2", indexmap::IndexMap::new())
        .await
        .unwrap();
    dev.reload().await.unwrap();
    let cs = dev.add_vlan_member(0, 700, "Ethernet2", true).unwrap();
    dev.apply(&cs).await.unwrap();

    let err = dev.delete_vlan(0, 700);
    let DeviceError::Validation(e) = err.unwrap_err() else { panic!("expected validation error") };
    assert!(e.0.iter().any(|m| m.contains("no members")));

    let cs = dev.remove_vlan_member(0, 700, "Ethernet2").unwrap();
    dev.apply(&cs).await.unwrap();
    assert!(!dev.has_vlan(700));
}