// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntn_core::{DeviceProfile, HolderId};
use ntn_store::{db::DbId, FakeLockOps, FakeStoreClient};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

async fn locked_device_with_ports(ports: &[&str]) -> Device {
    let store = Arc::new(FakeStoreClient::new());
    for p in ports {
        store.set(DbId::Config, "PORT", p, indexmap::IndexMap::new()).await.unwrap();
    }
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let dev = Device::new(profile, store, Arc::new(FakeLockOps::new()));
    dev.connect().await.unwrap();
    dev.lock(HolderId::new("host", 1), Duration::from_secs(30), 0).await.unwrap();
    dev
}

#[tokio::test]
async fn create_then_delete_port_channel() {
    let dev = locked_device_with_ports(&["Ethernet0", "Ethernet4"]).await;
    let members = vec!["Ethernet0".to_string(), "Ethernet4".to_string()];
    let cs = dev.create_port_channel(0, "PortChannel100", &members, PortChannelOpts { min_links: Some(1), lacp: true }).unwrap();
    dev.apply(&cs).await.unwrap();

    assert!(dev.has_port_channel("PortChannel100"));
    assert_eq!(dev.port_channel_members("PortChannel100").len(), 2);
    assert_eq!(dev.lag_owner_of("Ethernet0").unwrap(), "PortChannel100");

    let cs = dev.delete_port_channel(0, "Po100").unwrap();
    dev.apply(&cs).await.unwrap();
    assert!(!dev.has_port_channel("PortChannel100"));
    assert!(dev.lag_owner_of("Ethernet0").is_none());
}

#[tokio::test]
async fn create_rejects_interface_already_in_another_lag() {
    let dev = locked_device_with_ports(&["Ethernet0"]).await;
    let members = vec!["Ethernet0".to_string()];
    let cs = dev.create_port_channel(0, "PortChannel100", &members, PortChannelOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();

    let err = dev.create_port_channel(0, "PortChannel200", &members, PortChannelOpts::default());
    assert!(err.is_err());
}