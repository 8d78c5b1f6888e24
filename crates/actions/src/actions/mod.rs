// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One file per resource family, mirroring `ntn-device::mutations`'
//! layout — each executor in here is a thin adapter from a parsed `Step`
//! to the matching `Device` mutation primitive (or, for `verify`/
//! `utility`, a read or an SSH command instead of a `ChangeSet`).

pub mod acl;
pub mod bgp;
pub mod evpn;
pub mod interface;
pub mod portchannel;
pub mod provisioning;
pub mod qos;
pub mod route;
pub mod service;
pub mod utility;
pub mod verify;
pub mod vlan;
pub mod vrf;
