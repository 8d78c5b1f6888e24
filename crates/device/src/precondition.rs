// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The precondition algebra: every mutation primitive runs a
//! [`PreconditionChecker`] first. Predicates accumulate failures rather
//! than short-circuiting, so a caller sees every violated precondition in
//! one `ValidationError` instead of fixing them one at a time.

use crate::handle::Device;
use crate::normalize::normalize_interface;
use ntn_core::ValidationError;

/// Accumulates precondition failures against one [`Device`]. Each
/// `require_*` method is a no-op on success and pushes a message on
/// failure; call [`PreconditionChecker::finish`] once all checks have run.
pub struct PreconditionChecker<'a> {
    device: &'a Device,
    errors: Vec<String>,
}

impl<'a> PreconditionChecker<'a> {
    pub fn new(device: &'a Device) -> Self {
        Self { device, errors: Vec::new() }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(self.errors))
        }
    }

    fn fail(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn require_connected(mut self) -> Self {
        if !self.device.is_connected() {
            self.fail(format!("device {} is not connected", self.device.name()));
        }
        self
    }

    pub fn require_locked(mut self) -> Self {
        if !self.device.is_locked() {
            self.fail(format!("device {} is not locked", self.device.name()));
        }
        self
    }

    pub fn require_interface_exists(mut self, iface: &str) -> Self {
        if !self.device.has_interface(iface) {
            self.fail(format!("interface {} does not exist", normalize_interface(iface)));
        }
        self
    }

    pub fn require_interface_not_lag_member(mut self, iface: &str) -> Self {
        if let Some(pc) = self.device.lag_owner_of(iface) {
            self.fail(format!("interface {} is a member of {pc}", normalize_interface(iface)));
        }
        self
    }

    pub fn require_interface_no_service(mut self, iface: &str) -> Self {
        if let Some(service) = self.device.interface_service(iface) {
            self.fail(format!("interface {} already has service {service} applied", normalize_interface(iface)));
        }
        self
    }

    pub fn require_vlan_exists(mut self, vlan_id: u16) -> Self {
        if !self.device.has_vlan(vlan_id) {
            self.fail(format!("VLAN {vlan_id} does not exist"));
        }
        self
    }

    pub fn require_vlan_not_exists(mut self, vlan_id: u16) -> Self {
        if self.device.has_vlan(vlan_id) {
            self.fail(format!("VLAN {vlan_id} already exists"));
        }
        self
    }

    pub fn require_vrf_exists(mut self, name: &str) -> Self {
        if !self.device.has_vrf(name) {
            self.fail(format!("VRF {name} does not exist"));
        }
        self
    }

    pub fn require_vrf_not_exists(mut self, name: &str) -> Self {
        if self.device.has_vrf(name) {
            self.fail(format!("VRF {name} already exists"));
        }
        self
    }

    pub fn require_port_channel_exists(mut self, name: &str) -> Self {
        if !self.device.has_port_channel(name) {
            self.fail(format!("port channel {} does not exist", normalize_interface(name)));
        }
        self
    }

    pub fn require_port_channel_not_exists(mut self, name: &str) -> Self {
        if self.device.has_port_channel(name) {
            self.fail(format!("port channel {} already exists", normalize_interface(name)));
        }
        self
    }

    pub fn require_vtep_configured(mut self) -> Self {
        if !self.device.has_vtep() {
            self.fail(format!("device {} has no VTEP configured", self.device.name()));
        }
        self
    }

    pub fn require_bgp_configured(mut self) -> Self {
        if !self.device.has_bgp_globals() {
            self.fail(format!("device {} has no BGP globals configured", self.device.name()));
        }
        self
    }

    pub fn require_acl_table_exists(mut self, name: &str) -> Self {
        if !self.device.has_acl_table(name) {
            self.fail(format!("ACL table {name} does not exist"));
        }
        self
    }

    pub fn require_acl_table_not_exists(mut self, name: &str) -> Self {
        if self.device.has_acl_table(name) {
            self.fail(format!("ACL table {name} already exists"));
        }
        self
    }

    pub fn require_service_exists(mut self, name: &str) -> Self {
        if !self.device.has_service(name) {
            self.fail(format!("service {name} is not declared"));
        }
        self
    }

    pub fn require_filter_spec_exists(mut self, name: &str) -> Self {
        if !self.device.has_filter_spec(name) {
            self.fail(format!("filter spec {name} is not declared"));
        }
        self
    }

    /// Platform whitelist check: `ports` are only restricted when the
    /// device's profile declares a non-empty `allowed_ports` list.
    pub fn require_port_allowed(mut self, port: &str) -> Self {
        if !self.device.profile().allows_port(port) {
            self.fail(format!("port {port} is not allowed on this platform"));
        }
        self
    }

    pub fn require_peer_group_exists(mut self, name: &str) -> Self {
        if !self.device.has_peer_group(name) {
            self.fail(format!("BGP peer group {name} does not exist"));
        }
        self
    }
}

#[cfg(test)]
#[path = "precondition_tests.rs"]
mod tests;
