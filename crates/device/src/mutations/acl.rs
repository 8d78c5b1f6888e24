// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ACL table/rule CRUD and port binding.

use crate::dependency::DependencyChecker;
use crate::error::DeviceError;
use crate::handle::Device;
use crate::normalize::normalize_interface;
use crate::precondition::PreconditionChecker;
use indexmap::IndexMap;
use ntn_core::{Change, ChangeSet, ChangeSetBuilder, ValidationError};

#[derive(Debug, Clone, Default)]
pub struct AclRuleOpts {
    pub priority: u32,
    pub action: String,
    pub fields: IndexMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AclBindOpts {
    pub stage: AclStage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AclStage {
    #[default]
    Ingress,
    Egress,
}

impl Device {
    /// `ACLCreate(name, stage)`.
    pub fn acl_create(&self, now_ms: u64, name: &str, stage: AclStage) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_acl_table_not_exists(name).finish()?;

        let mut fields = IndexMap::new();
        fields.insert("type".to_string(), "L3".to_string());
        fields.insert("stage".to_string(), if stage == AclStage::Ingress { "ingress" } else { "egress" }.to_string());
        Ok(ChangeSetBuilder::new(self.name(), "acl-create", now_ms).push(Change::add("ACL_TABLE", name, fields)).build())
    }

    /// `ACLDelete(name)`, gated on `IsLastACLUser` — the table must have
    /// no bound ports left before it can be removed.
    pub fn acl_delete(&self, now_ms: u64, name: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_acl_table_exists(name).finish()?;

        if !DependencyChecker::new(self).is_last_acl_user(name) {
            return Err(ValidationError::single(format!("ACL table {name} still has bound ports")).into());
        }

        let mut builder = ChangeSetBuilder::new(self.name(), "acl-delete", now_ms);
        for rule in self.acl_rules(name) {
            builder = builder.push(Change::delete("ACL_RULE", format!("{name}|{rule}")));
        }
        builder = builder.push(Change::delete("ACL_TABLE", name));
        Ok(builder.build())
    }

    /// `ACLAddRule(table, rule, opts)`.
    pub fn acl_add_rule(&self, now_ms: u64, table: &str, rule: &str, opts: AclRuleOpts) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_acl_table_exists(table).finish()?;

        let mut fields = opts.fields;
        fields.insert("priority".to_string(), opts.priority.to_string());
        fields.insert("action".to_string(), opts.action);
        let key = format!("{table}|{rule}");
        Ok(ChangeSetBuilder::new(self.name(), "acl-add-rule", now_ms).push(Change::add("ACL_RULE", key, fields)).build())
    }

    /// `ACLDeleteRule(table, rule)`.
    pub fn acl_delete_rule(&self, now_ms: u64, table: &str, rule: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_acl_table_exists(table).finish()?;

        let key = format!("{table}|{rule}");
        Ok(ChangeSetBuilder::new(self.name(), "acl-delete-rule", now_ms).push(Change::delete("ACL_RULE", key)).build())
    }

    /// `ACLBind(table, iface, opts)`.
    pub fn acl_bind(&self, now_ms: u64, table: &str, iface: &str, _opts: AclBindOpts) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self)
            .require_connected()
            .require_locked()
            .require_acl_table_exists(table)
            .require_interface_exists(iface)
            .finish()?;

        let iface = normalize_interface(iface);
        let mut ports = self.acl_table_ports(table);
        if !ports.iter().any(|p| p == &iface) {
            ports.push(iface);
        }
        let mut fields = IndexMap::new();
        fields.insert("ports".to_string(), ports.join(","));
        Ok(ChangeSetBuilder::new(self.name(), "acl-bind", now_ms).push(Change::modify("ACL_TABLE", table, fields)).build())
    }

    /// `ACLUnbind(table, iface)`. If this removes the last bound port,
    /// the caller (the executor) may follow with `acl_delete` per the
    /// dependency algebra; this primitive itself only updates the binding.
    pub fn acl_unbind(&self, now_ms: u64, table: &str, iface: &str) -> Result<ChangeSet, DeviceError> {
        PreconditionChecker::new(self).require_connected().require_locked().require_acl_table_exists(table).finish()?;

        let iface = normalize_interface(iface);
        let remaining: Vec<String> = self.acl_table_ports(table).into_iter().filter(|p| p != &iface).collect();
        let mut fields = IndexMap::new();
        fields.insert("ports".to_string(), remaining.join(","));
        Ok(ChangeSetBuilder::new(self.name(), "acl-unbind", now_ms).push(Change::modify("ACL_TABLE", table, fields)).build())
    }
}

#[cfg(test)]
#[path = "acl_tests.rs"]
mod tests;
