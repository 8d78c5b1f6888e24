// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntn_core::{DeviceProfile, HolderId};
use ntn_store::{db::DbId, FakeLockOps, FakeStoreClient};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

async fn locked_device_with(iface: &str, service: &str) -> Device {
    let store = Arc::new(FakeStoreClient::new());
    store.set(DbId::Config, "PORT", iface, indexmap::IndexMap::new()).await.unwrap();
    store.set(DbId::Config, "SERVICE", service, indexmap::IndexMap::new()).await.unwrap();
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let dev = Device::new(profile, store, Arc::new(FakeLockOps::new()));
    dev.connect().await.unwrap();
    dev.lock(HolderId::new("host", 1), Duration::from_secs(30), 0).await.unwrap();
    dev
}

#[tokio::test]
async fn apply_then_remove_round_trip() {
    let dev = locked_device_with("Ethernet0", "web-tier").await;
    let opts = ServiceOpts { ip: Some("10.1.1.1/24".to_string()), vrf: None, acl_table: None };
    let cs = dev.apply_service(0, "Ethernet0", "web-tier", opts).unwrap();
    dev.apply(&cs).await.unwrap();
    assert_eq!(dev.interface_service("Ethernet0").as_deref(), Some("web-tier"));

    let cs = dev.remove_service(0, "Ethernet0").unwrap();
    dev.apply(&cs).await.unwrap();
    assert!(dev.interface_service("Ethernet0").is_none());
}

#[tokio::test]
async fn apply_service_rejects_double_apply() {
    let dev = locked_device_with("Ethernet0", "web-tier").await;
    let cs = dev.apply_service(0, "Ethernet0", "web-tier", ServiceOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();

    assert!(dev.apply_service(0, "Ethernet0", "web-tier", ServiceOpts::default()).is_err());
}

#[tokio::test]
async fn remove_service_without_binding_fails_validation() {
    let dev = locked_device_with("Ethernet0", "web-tier").await;
    assert!(dev.remove_service(0, "Ethernet0").is_err());
}

#[tokio::test]
async fn last_user_removal_deletes_service_declaration() {
    let dev = locked_device_with("Ethernet0", "web-tier").await;
    let cs = dev.apply_service(0, "Ethernet0", "web-tier", ServiceOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();
    assert!(dev.has_service("web-tier"));

    let cs = dev.remove_service(0, "Ethernet0").unwrap();
    dev.apply(&cs).await.unwrap();
    assert!(!dev.has_service("web-tier"));
}