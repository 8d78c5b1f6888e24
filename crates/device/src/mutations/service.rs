// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `apply-service` / `remove-service`: a named declarative interface-level
//! config bundle (IP, VRF binding, ACL, QoS, BGP) materialized onto one
//! interface. `SERVICE` holds the bundle's own field set (declared once,
//! out of band); `SERVICE_BINDING` records which interface currently has
//! which service applied.

use crate::dependency::DependencyChecker;
use crate::error::DeviceError;
use crate::handle::Device;
use crate::normalize::normalize_interface;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSet, ChangeSetBuilder};

#[derive(Debug, Clone, Default)]
pub struct ServiceOpts {
    pub ip: Option<String>,
    pub vrf: Option<String>,
    pub acl_table: Option<String>,
}

impl Device {
    /// `ApplyService(iface, service, opts)`. Fails `RequireInterfaceNoService`
    /// if the interface already carries a different service — callers must
    /// `remove_service` first (no implicit swap).
    pub fn apply_service(&self, now_ms: u64, iface: &str, service: &str, opts: ServiceOpts) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self)
            .require_connected()
            .require_locked()
            .require_interface_exists(iface)
            .require_interface_no_service(iface)
            .require_service_exists(service)
            .finish()?;

        let iface = normalize_interface(iface);
        let mut fields = IndexMap::new();
        fields.insert("service".to_string(), service.to_string());
        let mut builder =
            ChangeSetBuilder::new(self.name(), "apply-service", now_ms).push(Change::add("SERVICE_BINDING", &iface, fields));

        if let Some(vrf) = &opts.vrf {
            let mut vrf_fields = IndexMap::new();
            vrf_fields.insert("vrf_name".to_string(), vrf.clone());
            builder = builder.push(Change::modify("INTERFACE", &iface, vrf_fields));
        }
        if let Some(ip) = &opts.ip {
            builder = builder.push(Change::add("INTERFACE", format!("{iface}|{ip}"), IndexMap::new()));
        }
        if let Some(acl) = &opts.acl_table {
            let mut ports = self.acl_table_ports(acl);
            if !ports.iter().any(|p| p == &iface) {
                ports.push(iface.clone());
            }
            let mut acl_fields = IndexMap::new();
            acl_fields.insert("ports".to_string(), ports.join(","));
            builder = builder.push(Change::modify("ACL_TABLE", acl, acl_fields));
        }
        Ok(builder.build())
    }

    /// `RemoveService(iface)`. Only undoes the binding and the fields
    /// this primitive itself added; it does not reverse VRF/ACL/IP
    /// changes another action may have layered on top since
    /// `apply-service` ran.
    pub fn remove_service(&self, now_ms: u64, iface: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_interface_exists(iface).finish()?;

        let iface = normalize_interface(iface);
        let Some(service) = self.interface_service(&iface) else {
            return Err(ntn_core::ValidationError::single(format!("interface {iface} has no service applied")).into());
        };

        let mut builder =
            ChangeSetBuilder::new(self.name(), "remove-service", now_ms).push(Change::delete("SERVICE_BINDING", &iface));

        if DependencyChecker::new(self).excluding(iface.clone()).is_last_service_user(&service) {
            builder = builder.push(Change::delete("SERVICE", &service));
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
