// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Baseline provisioning primitives: the loopback interface and the FRR
//! daemon defaults every device needs before any topology-specific
//! config (VLAN, VRF, BGP, EVPN) can be layered on. `provision`/
//! `deprovision` themselves are orchestrated at the action layer (they
//! fan out across `configure-loopback`/`apply-frr-defaults` and their
//! device-profile-driven counterparts); this module holds only the two
//! primitives with their own table shape.

use crate::error::DeviceError;
use crate::handle::Device;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSet, ChangeSetBuilder};
use std::net::IpAddr;

impl Device {
    /// `ConfigureLoopback(address)` — `LOOPBACK_INTERFACE` keyed
    /// `Loopback0|<address>/<prefix>`, matching the real schema's
    /// interface-table convention of a bare entry for the interface
    /// itself plus one per assigned address.
    pub fn configure_loopback(&self, now_ms: u64, address: IpAddr) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().finish()?;

        let prefix_len = if address.is_ipv4() { 32 } else { 128 };
        let ip_key = format!("Loopback0|{address}/{prefix_len}");
        Ok(ChangeSetBuilder::new(self.name(), "configure-loopback", now_ms)
            .push(Change::add("LOOPBACK_INTERFACE", "Loopback0", IndexMap::new()))
            .push(Change::add("LOOPBACK_INTERFACE", ip_key, IndexMap::new()))
            .build())
    }

    /// `RemoveLoopback()` — removes every address entry this device
    /// currently has under `Loopback0` along with the interface entry
    /// itself.
    pub fn remove_loopback(&self, now_ms: u64) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().finish()?;

        let mut builder = ChangeSetBuilder::new(self.name(), "remove-loopback", now_ms);
        for key in self.config_snapshot().keys("LOOPBACK_INTERFACE") {
            if key == "Loopback0" || key.starts_with("Loopback0|") {
                builder = builder.push(Change::delete("LOOPBACK_INTERFACE", key));
            }
        }
        Ok(builder.build())
    }

    /// `ApplyFRRDefaults()` — the `DEVICE_METADATA` flag that enables the
    /// FRR BGP/Zebra daemons SONiC otherwise leaves dormant; every BGP or
    /// EVPN action implicitly depends on this having run first.
    pub fn apply_frr_defaults(&self, now_ms: u64) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().finish()?;

        let mut fields = IndexMap::new();
        fields.insert("docker_routing_config_mode".to_string(), "split".to_string());
        Ok(ChangeSetBuilder::new(self.name(), "apply-frr-defaults", now_ms)
            .push(Change::modify("DEVICE_METADATA", "localhost", fields))
            .build())
    }

    /// `RemoveFRRDefaults()` — reverts the flag `apply_frr_defaults` set.
    pub fn remove_frr_defaults(&self, now_ms: u64) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().finish()?;

        let mut fields = IndexMap::new();
        fields.insert("docker_routing_config_mode".to_string(), "separated".to_string());
        Ok(ChangeSetBuilder::new(self.name(), "remove-frr-defaults", now_ms)
            .push(Change::modify("DEVICE_METADATA", "localhost", fields))
            .build())
    }
}

#[cfg(test)]
#[path = "provisioning_tests.rs"]
mod tests;
