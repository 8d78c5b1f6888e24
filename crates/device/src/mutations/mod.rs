// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutation primitives: each returns a [`ntn_core::ChangeSet`]
//! without applying it. Every primitive runs its
//! [`crate::precondition::PreconditionChecker`] first and returns
//! `Err(DeviceError::Validation)` without building anything on failure.
//!
//! Grouped one file per resource family, all as `impl Device` blocks —
//! the type stays in `handle.rs`, its mutation surface is split out here
//! rather than one monolithic `impl`.

pub mod acl;
pub mod bgp;
pub mod evpn;
pub mod health;
pub mod interface;
pub mod portchannel;
pub mod provisioning;
pub mod qos;
pub mod route;
pub mod service;
pub mod vlan;
pub mod vrf;

pub use acl::{AclBindOpts, AclRuleOpts, AclStage};
pub use bgp::{BgpGlobalsOpts, BgpNeighborOpts, RouteMapOpts};
pub use evpn::VtepOpts;
pub use health::{HealthCheckKind, HealthCheckReport, HealthCheckResult};
pub use interface::InterfaceOpts;
pub use portchannel::PortChannelOpts;
pub use service::ServiceOpts;
pub use vlan::VlanOpts;
pub use vrf::VrfOpts;
