// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! VRF CRUD and interface binding.

use crate::dependency::DependencyChecker;
use crate::error::DeviceError;
use crate::handle::Device;
use crate::normalize::normalize_interface;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSet, ChangeSetBuilder, ValidationError};

#[derive(Debug, Clone, Default)]
pub struct VrfOpts {
    pub l3vni: Option<u32>,
}

impl Device {
    /// `CreateVRF(name, l3vni?)`.
    pub fn create_vrf(&self, now_ms: u64, name: &str, opts: VrfOpts) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vrf_not_exists(name).finish()?;

        let mut fields = IndexMap::new();
        if let Some(vni) = opts.l3vni {
            fields.insert("vni".to_string(), vni.to_string());
        }
        Ok(ChangeSetBuilder::new(self.name(), "create-vrf", now_ms).push(Change::add("VRF", name, fields)).build())
    }

    /// `DeleteVRF(name)`, gated on `IsLastVRFUser`.
    pub fn delete_vrf(&self, now_ms: u64, name: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vrf_exists(name).finish()?;

        if !DependencyChecker::new(self).is_last_vrf_user(name) {
            return Err(ValidationError::single(format!("VRF {name} still has bound interfaces")).into());
        }
        Ok(ChangeSetBuilder::new(self.name(), "delete-vrf", now_ms).push(Change::delete("VRF", name)).build())
    }

    /// `SetInterfaceVRF(iface, vrf, ip?)`.
    pub fn set_interface_vrf(
        &self,
        now_ms: u64,
        iface: &str,
        vrf: &str,
        ip: Option<&str>,
    ) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self)
            .require_connected()
            .require_locked()
            .require_interface_exists(iface)
            .require_vrf_exists(vrf)
            .finish()?;

        let iface = normalize_interface(iface);
        let mut fields = IndexMap::new();
        fields.insert("vrf_name".to_string(), vrf.to_string());
        let mut builder =
            ChangeSetBuilder::new(self.name(), "set-interface-vrf", now_ms).push(Change::modify("INTERFACE", &iface, fields));

        if let Some(ip) = ip {
            let key = format!("{iface}|{ip}");
            builder = builder.push(Change::add("INTERFACE", key, IndexMap::new()));
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
#[path = "vrf_tests.rs"]
mod tests;
