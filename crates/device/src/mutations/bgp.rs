// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! BGP configuration primitives.

use crate::error::DeviceError;
use crate::handle::Device;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSet, ChangeSetBuilder};
use std::net::IpAddr;

#[derive(Debug, Clone, Default)]
pub struct BgpGlobalsOpts {
    pub router_id: Option<IpAddr>,
}

#[derive(Debug, Clone, Default)]
pub struct BgpNeighborOpts {
    pub peer_group: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RouteMapOpts {
    pub action: String,
    pub sequence: u32,
}

impl Device {
    /// `SetBGPGlobals(as_number, opts)`.
    pub fn set_bgp_globals(&self, now_ms: u64, as_number: u32, opts: BgpGlobalsOpts) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().finish()?;

        let mut fields = IndexMap::new();
        fields.insert("local_asn".to_string(), as_number.to_string());
        if let Some(router_id) = opts.router_id {
            fields.insert("router_id".to_string(), router_id.to_string());
        }
        Ok(ChangeSetBuilder::new(self.name(), "configure-bgp", now_ms).push(Change::add("BGP_GLOBALS", "default", fields)).build())
    }

    /// `RemoveBGPGlobals()` — removing the globals also tears down every
    /// configured neighbor, matching `teardown-evpn`'s pattern of a
    /// bottom-up reverse of `configure-bgp`.
    pub fn remove_bgp_globals(&self, now_ms: u64) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_bgp_configured().finish()?;

        let mut builder = ChangeSetBuilder::new(self.name(), "remove-bgp-globals", now_ms);
        for nbr in self.config_snapshot().keys("BGP_NEIGHBOR") {
            builder = builder.push(Change::delete("BGP_NEIGHBOR", nbr));
        }
        builder = builder.push(Change::delete("BGP_GLOBALS", "default"));
        Ok(builder.build())
    }

    /// `AddBGPNeighbor(address, remote_as, opts)`.
    pub fn add_bgp_neighbor(
        &self,
        now_ms: u64,
        address: IpAddr,
        remote_as: u32,
        opts: BgpNeighborOpts,
    ) -> Result<ChangeSet, DeviceError> {
        let mut checker = PreconditionChecker::new(self).require_connected().require_locked().require_bgp_configured();
        if let Some(group) = &opts.peer_group {
            checker = checker.require_peer_group_exists(group);
        }
        checker.finish()?;

        let mut fields = IndexMap::new();
        fields.insert("remote_as".to_string(), remote_as.to_string());
        if let Some(group) = opts.peer_group {
            fields.insert("peer_group".to_string(), group);
        }
        if let Some(desc) = opts.description {
            fields.insert("description".to_string(), desc);
        }
        Ok(ChangeSetBuilder::new(self.name(), "bgp-add-neighbor", now_ms)
            .push(Change::add("BGP_NEIGHBOR", address.to_string(), fields))
            .build())
    }

    /// `bgp-remove-neighbor`.
    pub fn remove_bgp_neighbor(&self, now_ms: u64, address: IpAddr) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_bgp_configured().finish()?;
        Ok(ChangeSetBuilder::new(self.name(), "bgp-remove-neighbor", now_ms)
            .push(Change::delete("BGP_NEIGHBOR", address.to_string()))
            .build())
    }

    /// `AddRouteRedistribution(vrf, source_protocol)`.
    pub fn add_route_redistribution(&self, now_ms: u64, vrf: &str, source_protocol: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vrf_exists(vrf).require_bgp_configured().finish()?;

        let key = format!("{vrf}|{source_protocol}");
        let mut fields = IndexMap::new();
        fields.insert("src_protocol".to_string(), source_protocol.to_string());
        Ok(ChangeSetBuilder::new(self.name(), "add-route-redistribution", now_ms)
            .push(Change::add("ROUTE_REDISTRIBUTE", key, fields))
            .build())
    }

    /// `AddRouteMap(name, opts)`.
    pub fn add_route_map(&self, now_ms: u64, name: &str, opts: RouteMapOpts) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().finish()?;

        let key = format!("{name}|{}", opts.sequence);
        let mut fields = IndexMap::new();
        fields.insert("route_operation".to_string(), opts.action);
        Ok(ChangeSetBuilder::new(self.name(), "add-route-map", now_ms).push(Change::add("ROUTE_MAP", key, fields)).build())
    }

    /// `AddBGPNetwork(vrf, prefix)` — a static network advertised under
    /// `network ...` in the BGP VRF address-family.
    pub fn add_bgp_network(&self, now_ms: u64, vrf: &str, prefix: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vrf_exists(vrf).require_bgp_configured().finish()?;

        let key = format!("{vrf}|{prefix}");
        Ok(ChangeSetBuilder::new(self.name(), "add-bgp-network", now_ms)
            .push(Change::add("BGP_NETWORK", key, IndexMap::new()))
            .build())
    }
}

#[cfg(test)]
#[path = "bgp_tests.rs"]
mod tests;
