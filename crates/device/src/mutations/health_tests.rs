// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntn_core::DeviceProfile;
use ntn_store::{db::DbId, FakeLockOps, FakeStoreClient};
use std::net::Ipv4Addr;
use std::sync::Arc;

async fn connected_device() -> (Device, Arc<FakeStoreClient>) {
    let store = Arc::new(FakeStoreClient::new());
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let dev = Device::new(profile, store.clone(), Arc::new(FakeLockOps::new()));
    dev.connect().await.unwrap();
    (dev, store)
}

#[tokio::test]
async fn reports_established_bgp_session_as_healthy() {
    let (dev, store) = connected_device().await;
    let mut fields = indexmap::IndexMap::new();
    fields.insert("state".to_string(), "Established".to_string());
    store.set(DbId::State, "BGP_NEIGHBOR_STATE", "10.0.0.2", fields).await.unwrap();
    dev.reload().await.unwrap();

    let report = dev.run_health_checks(Some(HealthCheckKind::Bgp)).unwrap();
    assert!(report.all_healthy());
    assert_eq!(report.results.len(), 1);
}

#[tokio::test]
async fn reports_down_interface_as_unhealthy() {
    let (dev, store) = connected_device().await;
    let mut fields = indexmap::IndexMap::new();
    fields.insert("oper_status".to_string(), "down".to_string());
    store.set(DbId::State, "PORT_TABLE", "Ethernet0", fields).await.unwrap();
    dev.reload().await.unwrap();

    let report = dev.run_health_checks(Some(HealthCheckKind::Interfaces)).unwrap();
    assert!(!report.all_healthy());
}

#[tokio::test]
async fn requires_connected_device() {
    let store = Arc::new(FakeStoreClient::new());
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let dev = Device::new(profile, store, Arc::new(FakeLockOps::new()));
    assert!(dev.run_health_checks(None).is_err());
}