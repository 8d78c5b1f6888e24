// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! VLAN / SVI mutation primitives.

use crate::dependency::DependencyChecker;
use crate::error::DeviceError;
use crate::handle::Device;
use crate::normalize::normalize_interface;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSetBuilder};

#[derive(Debug, Clone, Default)]
pub struct VlanOpts {
    pub description: Option<String>,
}

impl Device {
    /// `CreateVLAN(id, opts)`. Fails `RequireVLANNotExists` if the VLAN is
    /// already present.
    pub fn create_vlan(&self, now_ms: u64, vlan_id: u16, opts: VlanOpts) -> Result<ntn_core::ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vlan_not_exists(vlan_id).finish()?;

        let key = format!("Vlan{vlan_id}");
        let mut fields = IndexMap::new();
        fields.insert("vlanid".to_string(), vlan_id.to_string());
        if let Some(desc) = opts.description {
            fields.insert("description".to_string(), desc);
        }
        Ok(ChangeSetBuilder::new(self.name(), "create-vlan", now_ms).push(Change::add("VLAN", key, fields)).build())
    }

    /// `DeleteVLAN(id)`. Guarded by "VLAN must have no members" — the
    /// dependency checker here plays the role of `IsLastVLANMember` at
    /// the VLAN-as-a-whole granularity: *any* member blocks the delete.
    pub fn delete_vlan(&self, now_ms: u64, vlan_id: u16) -> Result<ntn_core::ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vlan_exists(vlan_id).finish()?;

        if !DependencyChecker::new(self).is_last_vlan_member(vlan_id) {
            return Err(ntn_core::ValidationError::single("VLAN must have no members").into());
        }

        let key = format!("Vlan{vlan_id}");
        Ok(ChangeSetBuilder::new(self.name(), "delete-vlan", now_ms).push(Change::delete("VLAN", key)).build())
    }

    /// `AddVLANMember(vlan, iface, tagged)`.
    pub fn add_vlan_member(
        &self,
        now_ms: u64,
        vlan_id: u16,
        iface: &str,
        tagged: bool,
    ) -> Result<ntn_core::ChangeSet, DeviceError> {
        PreconditionChecker::new(self)
            .require_connected()
            .require_locked()
            .require_vlan_exists(vlan_id)
            .require_interface_exists(iface)
            .finish()?;

        let iface = normalize_interface(iface);
        let key = format!("Vlan{vlan_id}|{iface}");
        let mut fields = IndexMap::new();
        fields.insert("tagging_mode".to_string(), if tagged { "tagged" } else { "untagged" }.to_string());
        Ok(ChangeSetBuilder::new(self.name(), "add-vlan-member", now_ms).push(Change::add("VLAN_MEMBER", key, fields)).build())
    }

    /// `RemoveVLANMember(vlan, iface)`. If this removes the last member,
    /// the VLAN itself is deleted in the same `ChangeSet` — the same
    /// cascade the dependency algebra drives for `delete-vlan`.
    pub fn remove_vlan_member(&self, now_ms: u64, vlan_id: u16, iface: &str) -> Result<ntn_core::ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vlan_exists(vlan_id).finish()?;

        let iface = normalize_interface(iface);
        let key = format!("Vlan{vlan_id}|{iface}");
        let mut builder = ChangeSetBuilder::new(self.name(), "remove-vlan-member", now_ms).push(Change::delete("VLAN_MEMBER", key));

        if DependencyChecker::new(self).excluding(iface).is_last_vlan_member(vlan_id) {
            builder = builder.push(Change::delete("VLAN", format!("Vlan{vlan_id}")));
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
#[path = "vlan_tests.rs"]
mod tests;
