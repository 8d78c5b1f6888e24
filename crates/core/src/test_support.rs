// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::changeset::{Change, ChangeOp};
use crate::device_profile::DeviceProfile;
use indexmap::IndexMap;
use std::net::{IpAddr, Ipv4Addr};

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::changeset::ChangeOp;
    use crate::status::StepStatus;
    use proptest::prelude::*;

    pub fn arb_step_status() -> impl Strategy<Value = StepStatus> {
        prop_oneof![
            Just(StepStatus::Passed),
            Just(StepStatus::Skipped),
            Just(StepStatus::Failed),
            Just(StepStatus::Error),
        ]
    }

    pub fn arb_change_op() -> impl Strategy<Value = ChangeOp> {
        prop_oneof![Just(ChangeOp::Add), Just(ChangeOp::Modify), Just(ChangeOp::Delete)]
    }
}

pub fn test_device_profile(name: &str) -> DeviceProfile {
    DeviceProfile::new(name, IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)))
}

pub fn vlan_fields(description: &str) -> IndexMap<String, String> {
    let mut m = IndexMap::new();
    m.insert("description".to_string(), description.to_string());
    m
}

pub fn add_change(table: &str, key: &str) -> Change {
    Change { table: table.into(), key: key.into(), op: ChangeOp::Add, new_fields: IndexMap::new() }
}
