// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntn_core::{DeviceProfile, HolderId};
use ntn_store::{FakeLockOps, FakeStoreClient};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

async fn locked_device_with_vrf(vrf: &str) -> Device {
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let dev = Device::new(profile, Arc::new(FakeStoreClient::new()), Arc::new(FakeLockOps::new()));
    dev.connect().await.unwrap();
    dev.lock(HolderId::new("host", 1), Duration::from_secs(30), 0).await.unwrap();
    let cs = dev.create_vrf(0, vrf, crate::mutations::VrfOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();
    dev
}

#[tokio::test]
async fn add_then_remove_static_route() {
    let dev = locked_device_with_vrf("Vrf1").await;
    let cs = dev.add_static_route(0, "Vrf1", "10.20.0.0/24", "10.0.0.2").unwrap();
    dev.apply(&cs).await.unwrap();
    assert!(dev.config_snapshot().exists("STATIC_ROUTE", "Vrf1|10.20.0.0/24"));

    let cs = dev.remove_static_route(0, "Vrf1", "10.20.0.0/24").unwrap();
    dev.apply(&cs).await.unwrap();
    assert!(!dev.config_snapshot().exists("STATIC_ROUTE", "Vrf1|10.20.0.0/24"));
}

#[tokio::test]
async fn requires_vrf_to_exist() {
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let dev = Device::new(profile, Arc::new(FakeStoreClient::new()), Arc::new(FakeLockOps::new()));
    dev.connect().await.unwrap();
    dev.lock(HolderId::new("host", 1), Duration::from_secs(30), 0).await.unwrap();
    assert!(dev.add_static_route(0, "VrfMissing", "10.20.0.0/24", "10.0.0.2").is_err());
}