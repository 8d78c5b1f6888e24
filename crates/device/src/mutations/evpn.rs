// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! EVPN/VXLAN primitives: VTEP creation and L2/L3 VNI mapping.

use crate::error::DeviceError;
use crate::handle::Device;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSet, ChangeSetBuilder};
use std::net::IpAddr;

#[derive(Debug, Clone, Default)]
pub struct VtepOpts {
    pub name: Option<String>,
}

impl Device {
    /// `CreateVTEP(source_ip, opts)`. A device has exactly one VTEP in
    /// this model (`VXLAN_TUNNEL` keyed by the tunnel name).
    pub fn create_vtep(&self, now_ms: u64, source_ip: IpAddr, opts: VtepOpts) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().finish()?;

        let name = opts.name.unwrap_or_else(|| "vtep1".to_string());
        let mut fields = IndexMap::new();
        fields.insert("src_ip".to_string(), source_ip.to_string());
        Ok(ChangeSetBuilder::new(self.name(), "create-vtep", now_ms).push(Change::add("VXLAN_TUNNEL", name, fields)).build())
    }

    /// `MapL2VNI(vlan, vni)` — `VXLAN_TUNNEL_MAP` binding a VLAN to a
    /// bridged (L2) VNI on this device's VTEP.
    pub fn map_l2_vni(&self, now_ms: u64, vlan_id: u16, vni: u32) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vtep_configured().require_vlan_exists(vlan_id).finish()?;

        let key = format!("vtep1|map_{vni}_Vlan{vlan_id}");
        let mut fields = IndexMap::new();
        fields.insert("vni".to_string(), vni.to_string());
        fields.insert("vlan".to_string(), format!("Vlan{vlan_id}"));
        Ok(ChangeSetBuilder::new(self.name(), "map-l2-vni", now_ms).push(Change::add("VXLAN_TUNNEL_MAP", key, fields)).build())
    }

    /// `MapL3VNI(vrf, vni)` — routed (L3) VNI bound to a VRF.
    pub fn map_l3_vni(&self, now_ms: u64, vrf: &str, vni: u32) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vtep_configured().require_vrf_exists(vrf).finish()?;

        let mut fields = IndexMap::new();
        fields.insert("vni".to_string(), vni.to_string());
        Ok(ChangeSetBuilder::new(self.name(), "map-l3-vni", now_ms).push(Change::modify("VRF", vrf, fields)).build())
    }

    /// Unbind a previously-mapped L2 VNI, keyed the same way `map_l2_vni`
    /// wrote it.
    pub fn unmap_l2_vni(&self, now_ms: u64, vlan_id: u16, vni: u32) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vtep_configured().finish()?;

        let key = format!("vtep1|map_{vni}_Vlan{vlan_id}");
        Ok(ChangeSetBuilder::new(self.name(), "unmap-l2-vni", now_ms).push(Change::delete("VXLAN_TUNNEL_MAP", key)).build())
    }

    /// Unbind a previously-mapped L3 VNI. The real schema clears
    /// `VRF.vni` with an `HDEL`; a `ChangeSet` can only express whole-key
    /// add/modify/delete, so this clears the field to an empty value
    /// rather than removing it — `has_vrf`/other introspection never read
    /// `vni`, so the distinction is invisible above this layer.
    pub fn unmap_l3_vni(&self, now_ms: u64, vrf: &str, _vni: u32) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vtep_configured().require_vrf_exists(vrf).finish()?;

        let mut fields = IndexMap::new();
        fields.insert("vni".to_string(), String::new());
        Ok(ChangeSetBuilder::new(self.name(), "unmap-l3-vni", now_ms).push(Change::modify("VRF", vrf, fields)).build())
    }

    /// `teardown-evpn`'s bottom half: remove the VTEP once every L2/L3
    /// mapping that depends on it has been torn down by the caller.
    pub fn delete_vtep(&self, now_ms: u64) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vtep_configured().finish()?;

        let mut builder = ChangeSetBuilder::new(self.name(), "delete-vtep", now_ms);
        for name in self.config_snapshot().keys("VXLAN_TUNNEL") {
            builder = builder.push(Change::delete("VXLAN_TUNNEL", name));
        }
        for key in self.config_snapshot().keys("VXLAN_TUNNEL_MAP") {
            builder = builder.push(Change::delete("VXLAN_TUNNEL_MAP", key));
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
#[path = "evpn_tests.rs"]
mod tests;
