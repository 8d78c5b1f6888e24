// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interface property mutation.

use crate::error::DeviceError;
use crate::handle::Device;
use crate::normalize::normalize_interface;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSet, ChangeSetBuilder};

#[derive(Debug, Clone, Default)]
pub struct InterfaceOpts {
    pub mtu: Option<u32>,
    pub admin_status: Option<String>,
    pub description: Option<String>,
    pub speed: Option<u32>,
}

impl Device {
    /// `ConfigureInterface(name, opts)`. Only the fields set in `opts`
    /// are included as a `Modify`, matching the real schema's
    /// sparse-field-update semantics.
    pub fn configure_interface(&self, now_ms: u64, name: &str, opts: InterfaceOpts) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_interface_exists(name).finish()?;

        let name = normalize_interface(name);
        let mut fields = IndexMap::new();
        if let Some(mtu) = opts.mtu {
            fields.insert("mtu".to_string(), mtu.to_string());
        }
        if let Some(status) = opts.admin_status {
            fields.insert("admin_status".to_string(), status);
        }
        if let Some(desc) = opts.description {
            fields.insert("description".to_string(), desc);
        }
        if let Some(speed) = opts.speed {
            fields.insert("speed".to_string(), speed.to_string());
        }
        let table = if self.has_port_channel(&name) { "PORTCHANNEL" } else { "PORT" };
        Ok(ChangeSetBuilder::new(self.name(), "configure-interface", now_ms).push(Change::modify(table, name, fields)).build())
    }
}

#[cfg(test)]
#[path = "interface_tests.rs"]
mod tests;
