// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed action catalogue as data, a typed schema with fixed
//! params per action. Each entry is a `static ActionSpec` collected into a
//! `once_cell::sync::Lazy<HashMap<...>>` via the `action_spec!` macro —
//! explicit and compile-time-checked rather than reflection, preferring
//! data-driven registries over dynamic dispatch.
//!
//! This module owns the *shape* of every action (name, param types,
//! device cardinality, default timeout). `ntn-actions` owns what each
//! action *does* (the executor implementations); it reads this registry
//! to find an action's declared cardinality and param schema at dispatch
//! time so the two layers never duplicate the catalogue.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::time::Duration;

/// How many devices one step of this action may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// The action ignores `devices` entirely (e.g. `wait`).
    None,
    /// Exactly one device.
    Single,
    /// Two or more devices, explicitly listed.
    Multi,
    /// Every device in the topology (`devices: all`).
    All,
}

impl Cardinality {
    /// Whether `count` devices resolved from a step satisfies this
    /// cardinality requirement.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Cardinality::None => true,
            Cardinality::Single => count == 1,
            Cardinality::Multi | Cardinality::All => count >= 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Int,
    Float,
    Bool,
    StringList,
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
}

/// The full declared shape of one action in the closed catalogue.
#[derive(Debug, Clone)]
pub struct ActionSpec {
    pub name: &'static str,
    pub cardinality: Cardinality,
    pub required: &'static [ParamSpec],
    pub optional: &'static [ParamSpec],
    pub default_timeout: Duration,
}

/// Declare one `ActionSpec` entry. Each invocation inside
/// [`action_registry!`] becomes one `(name, ActionSpec)` pair.
macro_rules! action_spec {
    ($name:literal, $cardinality:expr, required: [$($rname:literal : $rty:expr),* $(,)?], optional: [$($oname:literal : $oty:expr),* $(,)?], timeout_secs: $timeout:expr $(,)?) => {
        ActionSpec {
            name: $name,
            cardinality: $cardinality,
            required: &[$(ParamSpec { name: $rname, ty: $rty }),*],
            optional: &[$(ParamSpec { name: $oname, ty: $oty }),*],
            default_timeout: Duration::from_secs($timeout),
        }
    };
}

macro_rules! action_registry {
    ($($spec:expr),+ $(,)?) => {
        Lazy::new(|| {
            let mut m = HashMap::new();
            $(
                let spec = $spec;
                m.insert(spec.name, spec);
            )+
            m
        })
    };
}

use ParamType::*;

/// The closed catalogue. Unknown action names are a scenario
/// parse-time error, never a runtime panic — every executor in
/// `ntn-actions` has exactly one entry here.
pub static ACTIONS: Lazy<HashMap<&'static str, ActionSpec>> = action_registry![
    // provisioning
    action_spec!("provision", Cardinality::Multi, required: [], optional: ["profile": String], timeout_secs: 120),
    action_spec!("configure-loopback", Cardinality::Single, required: ["address": String], optional: [], timeout_secs: 30),
    action_spec!("apply-frr-defaults", Cardinality::Multi, required: [], optional: [], timeout_secs: 30),
    action_spec!("deprovision", Cardinality::Multi, required: [], optional: [], timeout_secs: 60),
    action_spec!("remove-loopback", Cardinality::Single, required: [], optional: [], timeout_secs: 30),
    action_spec!("remove-frr-defaults", Cardinality::Multi, required: [], optional: [], timeout_secs: 30),

    // verification
    action_spec!("verify-ping", Cardinality::Single, required: ["target": String], optional: ["count": Int, "success_rate": Float], timeout_secs: 30),
    action_spec!("verify-bgp", Cardinality::Multi, required: [], optional: ["neighbor": String, "state": String], timeout_secs: 120),
    action_spec!("verify-health", Cardinality::Multi, required: [], optional: ["kind": String], timeout_secs: 60),
    action_spec!("verify-route", Cardinality::Single, required: ["prefix": String, "vrf": String], optional: [], timeout_secs: 60),
    action_spec!("verify-config-db", Cardinality::Single, required: ["table": String, "key": String], optional: [], timeout_secs: 15),
    action_spec!("verify-state-db", Cardinality::Single, required: ["table": String, "key": String], optional: [], timeout_secs: 15),

    // VLAN / SVI CRUD
    action_spec!("create-vlan", Cardinality::Multi, required: ["vlan_id": Int], optional: ["description": String], timeout_secs: 15),
    action_spec!("delete-vlan", Cardinality::Multi, required: ["vlan_id": Int], optional: [], timeout_secs: 15),
    action_spec!("add-vlan-member", Cardinality::Multi, required: ["vlan_id": Int, "interface": String], optional: ["tagged": Bool], timeout_secs: 15),
    action_spec!("remove-vlan-member", Cardinality::Multi, required: ["vlan_id": Int, "interface": String], optional: [], timeout_secs: 15),

    // VRF
    action_spec!("create-vrf", Cardinality::Multi, required: ["name": String], optional: ["l3vni": Int], timeout_secs: 15),
    action_spec!("delete-vrf", Cardinality::Multi, required: ["name": String], optional: [], timeout_secs: 15),
    action_spec!("set-interface-vrf", Cardinality::Multi, required: ["interface": String, "vrf": String], optional: ["ip": String], timeout_secs: 15),

    // EVPN
    action_spec!("setup-evpn", Cardinality::Multi, required: ["source_ip": String], optional: ["name": String], timeout_secs: 30),
    action_spec!("bind-ipvpn", Cardinality::Multi, required: ["vrf": String, "vni": Int], optional: [], timeout_secs: 15),
    action_spec!("unbind-ipvpn", Cardinality::Multi, required: ["vrf": String, "vni": Int], optional: [], timeout_secs: 15),
    action_spec!("bind-macvpn", Cardinality::Multi, required: ["vlan_id": Int, "vni": Int], optional: [], timeout_secs: 15),
    action_spec!("unbind-macvpn", Cardinality::Multi, required: ["vlan_id": Int, "vni": Int], optional: [], timeout_secs: 15),
    action_spec!("teardown-evpn", Cardinality::Multi, required: [], optional: [], timeout_secs: 30),

    // service
    action_spec!("apply-service", Cardinality::Multi, required: ["interface": String, "service": String], optional: ["ip": String, "vrf": String, "acl_table": String], timeout_secs: 30),
    action_spec!("remove-service", Cardinality::Multi, required: ["interface": String], optional: [], timeout_secs: 30),
    action_spec!("refresh-service", Cardinality::Multi, required: ["interface": String, "service": String], optional: ["ip": String, "vrf": String, "acl_table": String], timeout_secs: 30),

    // QoS
    action_spec!("configure-qos", Cardinality::Multi, required: ["interface": String, "profile": String], optional: [], timeout_secs: 15),

    // BGP
    action_spec!("configure-bgp", Cardinality::Multi, required: ["as_number": Int], optional: ["router_id": String], timeout_secs: 15),
    action_spec!("bgp-add-neighbor", Cardinality::Multi, required: ["address": String, "remote_as": Int], optional: ["peer_group": String, "description": String], timeout_secs: 15),
    action_spec!("bgp-remove-neighbor", Cardinality::Multi, required: ["address": String], optional: [], timeout_secs: 15),
    action_spec!("remove-bgp-globals", Cardinality::Multi, required: [], optional: [], timeout_secs: 15),

    // ACL
    action_spec!("acl-create", Cardinality::Multi, required: ["name": String], optional: ["stage": String], timeout_secs: 15),
    action_spec!("acl-delete", Cardinality::Multi, required: ["name": String], optional: [], timeout_secs: 15),
    action_spec!("acl-add-rule", Cardinality::Multi, required: ["table": String, "rule": String, "priority": Int, "action": String], optional: [], timeout_secs: 15),
    action_spec!("acl-delete-rule", Cardinality::Multi, required: ["table": String, "rule": String], optional: [], timeout_secs: 15),
    action_spec!("acl-bind", Cardinality::Multi, required: ["table": String, "interface": String], optional: [], timeout_secs: 15),
    action_spec!("acl-unbind", Cardinality::Multi, required: ["table": String, "interface": String], optional: [], timeout_secs: 15),

    // LAG
    action_spec!("create-port-channel", Cardinality::Multi, required: ["name": String, "members": StringList], optional: ["min_links": Int, "lacp": Bool], timeout_secs: 15),
    action_spec!("delete-port-channel", Cardinality::Multi, required: ["name": String], optional: [], timeout_secs: 15),

    // interface properties
    action_spec!("set-interface", Cardinality::Multi, required: ["interface": String], optional: ["mtu": Int, "admin_status": String, "description": String, "speed": Int], timeout_secs: 15),

    // static routing
    action_spec!("add-static-route", Cardinality::Multi, required: ["vrf": String, "prefix": String, "nexthop": String], optional: [], timeout_secs: 15),
    action_spec!("remove-static-route", Cardinality::Multi, required: ["vrf": String, "prefix": String], optional: [], timeout_secs: 15),

    // host-side
    action_spec!("host-exec", Cardinality::None, required: ["command": String], optional: ["container": String], timeout_secs: 60),

    // utility
    action_spec!("wait", Cardinality::None, required: ["duration_secs": Int], optional: [], timeout_secs: 3600),
    action_spec!("cleanup", Cardinality::Multi, required: [], optional: [], timeout_secs: 60),
    action_spec!("ssh-command", Cardinality::Single, required: ["command": String], optional: [], timeout_secs: 30),
    action_spec!("restart-service", Cardinality::Single, required: ["service": String], optional: [], timeout_secs: 60),
];

pub fn lookup(action: &str) -> Option<&'static ActionSpec> {
    ACTIONS.get(action)
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
