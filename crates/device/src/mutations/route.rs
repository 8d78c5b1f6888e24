// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static routing: `STATIC_ROUTE` entries keyed `<vrf>|<prefix>`, not tied
//! to BGP (no peer/AS required — just a VRF and a next hop).

use crate::error::DeviceError;
use crate::handle::Device;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSet, ChangeSetBuilder};

impl Device {
    /// `AddStaticRoute(vrf, prefix, nexthop)`.
    pub fn add_static_route(&self, now_ms: u64, vrf: &str, prefix: &str, nexthop: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vrf_exists(vrf).finish()?;

        let key = format!("{vrf}|{prefix}");
        let mut fields = IndexMap::new();
        fields.insert("nexthop".to_string(), nexthop.to_string());
        Ok(ChangeSetBuilder::new(self.name(), "add-static-route", now_ms).push(Change::add("STATIC_ROUTE", key, fields)).build())
    }

    /// `RemoveStaticRoute(vrf, prefix)`.
    pub fn remove_static_route(&self, now_ms: u64, vrf: &str, prefix: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_vrf_exists(vrf).finish()?;

        let key = format!("{vrf}|{prefix}");
        Ok(ChangeSetBuilder::new(self.name(), "remove-static-route", now_ms).push(Change::delete("STATIC_ROUTE", key)).build())
    }
}

#[cfg(test)]
#[path = "route_tests.rs"]
mod tests;
