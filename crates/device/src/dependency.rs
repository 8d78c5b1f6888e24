// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dependency algebra for delete paths: answers whether
//! removing one member would leave an umbrella resource (VLAN, VRF, ACL
//! table, service) with no remaining user, so removal paths can decide
//! whether to cascade-delete the umbrella too.

use crate::handle::Device;
use crate::normalize::normalize_interface;

/// Answers "is this the last user of X" questions against one device,
/// optionally excluding one interface from the count (the one currently
/// being removed, so the check reflects the state *after* its removal).
pub struct DependencyChecker<'a> {
    device: &'a Device,
    excluded_interface: Option<String>,
}

impl<'a> DependencyChecker<'a> {
    pub fn new(device: &'a Device) -> Self {
        Self { device, excluded_interface: None }
    }

    pub fn excluding(mut self, iface: impl Into<String>) -> Self {
        self.excluded_interface = Some(normalize_interface(&iface.into()));
        self
    }

    fn excludes(&self, candidate: &str) -> bool {
        self.excluded_interface.as_deref() == Some(candidate)
    }

    pub fn is_last_vlan_member(&self, vlan_id: u16) -> bool {
        self.device.vlan_members(vlan_id).into_iter().filter(|m| !self.excludes(m)).count() == 0
    }

    pub fn is_last_vrf_user(&self, vrf: &str) -> bool {
        self.device.vrf_members(vrf).into_iter().filter(|m| !self.excludes(m)).count() == 0
    }

    pub fn is_last_acl_user(&self, table: &str) -> bool {
        self.device.acl_table_ports(table).into_iter().filter(|m| !self.excludes(m)).count() == 0
    }

    pub fn is_last_service_user(&self, service: &str) -> bool {
        self.device
            .list_interfaces()
            .into_iter()
            .filter(|iface| !self.excludes(iface))
            .filter(|iface| self.device.interface_service(iface).as_deref() == Some(service))
            .count()
            == 0
    }

    pub fn get_acl_remaining_ports(&self, table: &str) -> Vec<String> {
        self.device.acl_table_ports(table).into_iter().filter(|m| !self.excludes(m)).collect()
    }
}

#[cfg(test)]
#[path = "dependency_tests.rs"]
mod tests;
