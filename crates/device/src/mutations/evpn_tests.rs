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
async fn map_l2_vni_requires_vtep_first() {
    let dev = locked_device().await;
    let cs = dev.create_vlan(0, 500, crate::mutations::VlanOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();

    assert!(dev.map_l2_vni(0, 500, 10500).is_err());

    let cs = dev.create_vtep(0, Ipv4Addr::new(10, 0, 0, 1).into(), VtepOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();
    assert!(dev.has_vtep());

    let cs = dev.map_l2_vni(0, 500, 10500).unwrap();
    dev.apply(&cs).await.unwrap();
}

#[tokio::test]
async fn map_l3_vni_requires_vrf() {
    let dev = locked_device().await;
    let cs = dev.create_vtep(0, Ipv4Addr::new(10, 0, 0, 1).into(), VtepOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();

    assert!(dev.map_l3_vni(0, "Vrf1", 10100).is_err());

    let cs = dev.create_vrf(0, "Vrf1", crate::mutations::VrfOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();
    let cs = dev.map_l3_vni(0, "Vrf1", 10100).unwrap();
    dev.apply(&cs).await.unwrap();
    assert_eq!(dev.get_vrf("Vrf1").unwrap().get("vni").unwrap(), "10100");

    let cs = dev.unmap_l3_vni(0, "Vrf1", 10100).unwrap();
    dev.apply(&cs).await.unwrap();
    assert_eq!(dev.get_vrf("Vrf1").unwrap().get("vni").unwrap(), "");
}

#[tokio::test]
async fn teardown_evpn_removes_vtep_and_mappings() {
    let dev = locked_device().await;
    let cs = dev.create_vtep(0, Ipv4Addr::new(10, 0, 0, 1).into(), VtepOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();
    let cs = dev.create_vlan(0, 500, crate::mutations::VlanOpts::default()).unwrap();
    dev.apply(&cs).await.unwrap();
    let cs = dev.map_l2_vni(0, 500, 10500).unwrap();
    dev.apply(&cs).await.unwrap();

    let cs = dev.unmap_l2_vni(0, 500, 10500).unwrap();
    dev.apply(&cs).await.unwrap();
    let cs = dev.delete_vtep(0).unwrap();
    dev.apply(&cs).await.unwrap();
    assert!(!dev.has_vtep());
}