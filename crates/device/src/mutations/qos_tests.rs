// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntn_core::{DeviceProfile, HolderId};
use ntn_store::{db::DbId, FakeLockOps, FakeStoreClient};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn configure_qos_sets_profile() {
    let store = Arc::new(FakeStoreClient::new());
    store.set(DbId::Config, "PORT", "Ethernet0", indexmap::IndexMap::new()).await.unwrap();
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let dev = Device::new(profile, store, Arc::new(FakeLockOps::new()));
    dev.connect().await.unwrap();
    dev.lock(HolderId::new("host", 1), Duration::from_secs(30), 0).await.unwrap();

    let cs = dev.configure_qos(0, "Ethernet0", "gold").unwrap();
    dev.apply(&cs).await.unwrap();
    assert_eq!(dev.config_snapshot().get("PORT_QOS_MAP", "Ethernet0").unwrap().get("qos_profile").unwrap(), "gold");
}