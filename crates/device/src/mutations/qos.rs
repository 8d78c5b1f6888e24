// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-interface QoS profile binding. A profile is a named, out-of-band
//! declared bundle the same way a `SERVICE` is — `configure-qos` only
//! points `PORT_QOS_MAP` at it, matching `apply-service`'s
//! declare-elsewhere / bind-here split.

use crate::error::DeviceError;
use crate::handle::Device;
use crate::normalize::normalize_interface;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSet, ChangeSetBuilder};

impl Device {
    /// `ConfigureQoS(iface, profile)`.
    pub fn configure_qos(&self, now_ms: u64, iface: &str, profile: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_interface_exists(iface).finish()?;

        let iface = normalize_interface(iface);
        let mut fields = IndexMap::new();
        fields.insert("qos_profile".to_string(), profile.to_string());
        Ok(ChangeSetBuilder::new(self.name(), "configure-qos", now_ms).push(Change::modify("PORT_QOS_MAP", iface, fields)).build())
    }
}

#[cfg(test)]
#[path = "qos_tests.rs"]
mod tests;
