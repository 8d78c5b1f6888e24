// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! LAG (port channel) CRUD.

use crate::error::DeviceError;
use crate::handle::Device;
use crate::normalize::normalize_interface;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSet, ChangeSetBuilder};

#[derive(Debug, Clone, Default)]
pub struct PortChannelOpts {
    pub min_links: Option<u8>,
    pub lacp: bool,
}

impl Device {
    /// `CreatePortChannel(name, members, opts)`.
    pub fn create_port_channel(
        &self,
        now_ms: u64,
        name: &str,
        members: &[String],
        opts: PortChannelOpts,
    ) -> Result<ChangeSet, DeviceError> {
        let mut checker = PreconditionChecker::new(self).require_connected().require_locked().require_port_channel_not_exists(name);
        for m in members {
            checker = checker.require_interface_exists(m).require_interface_not_lag_member(m);
        }
        checker.finish()?;

        let name = normalize_interface(name);
        let mut fields = IndexMap::new();
        if let Some(min_links) = opts.min_links {
            fields.insert("min_links".to_string(), min_links.to_string());
        }
        fields.insert("lacp_key".to_string(), if opts.lacp { "auto" } else { "0" }.to_string());

        let mut builder = ChangeSetBuilder::new(self.name(), "create-port-channel", now_ms).push(Change::add(
            "PORTCHANNEL",
            &name,
            fields,
        ));
        for m in members {
            let key = format!("{name}|{}", normalize_interface(m));
            builder = builder.push(Change::add("PORTCHANNEL_MEMBER", key, IndexMap::new()));
        }
        Ok(builder.build())
    }

    /// `DeletePortChannel(name)`.
    pub fn delete_port_channel(&self, now_ms: u64, name: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_port_channel_exists(name).finish()?;

        let name = normalize_interface(name);
        let mut builder = ChangeSetBuilder::new(self.name(), "delete-port-channel", now_ms);
        for member in self.port_channel_members(&name) {
            builder = builder.push(Change::delete("PORTCHANNEL_MEMBER", format!("{name}|{member}")));
        }
        builder = builder.push(Change::delete("PORTCHANNEL", name));
        Ok(builder.build())
    }
}

#[cfg(test)]
#[path = "portchannel_tests.rs"]
mod tests;
