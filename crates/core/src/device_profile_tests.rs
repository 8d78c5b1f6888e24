// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::net::{IpAddr, Ipv4Addr};

fn addr(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[test]
fn builder_setters_compose() {
    let profile = DeviceProfile::new("leaf1", addr("10.0.0.1"))
        .loopback_address(addr("10.1.1.1"))
        .as_number(65001)
        .store_port(6380)
        .with_bgp_neighbor(BgpNeighborSpec { address: addr("10.2.2.2"), remote_as: 65002, peer_group: None });

    assert_eq!(profile.name, "leaf1");
    assert_eq!(profile.loopback_address, Some(addr("10.1.1.1")));
    assert_eq!(profile.as_number, Some(65001));
    assert_eq!(profile.store_port, 6380);
    assert_eq!(profile.bgp_neighbors.len(), 1);
}

#[test]
fn credentials_debug_redacts_secret() {
    let creds = Credentials { username: "admin".into(), secret: CredentialSecret::Password("hunter2".into()) };
    let debug = format!("{:?}", creds);
    assert!(debug.contains("admin"));
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn empty_whitelist_allows_any_port() {
    let profile = DeviceProfile::new("leaf1", addr("10.0.0.1"));
    assert!(profile.allows_port("Ethernet0"));
}

#[test]
fn non_empty_whitelist_rejects_unlisted_port() {
    let profile = DeviceProfile::new("leaf1", addr("10.0.0.1")).with_allowed_port("Ethernet0");
    assert!(profile.allows_port("Ethernet0"));
    assert!(!profile.allows_port("Ethernet4"));
}

#[test]
fn device_id_round_trips_through_string() {
    let id = DeviceId::from_string("leaf1");
    assert_eq!(id.as_str(), "leaf1");
    assert_eq!(id, "leaf1");
}
