// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn validation_error_merges_messages() {
    let mut a = ValidationError::single("VLAN must have no members");
    let b = ValidationError::single("interface not found");
    a.merge(b);
    assert_eq!(a.0.len(), 2);
    assert!(!a.is_empty());
}

#[test]
fn validation_error_display_joins_with_semicolons() {
    let e = ValidationError(vec!["a".into(), "b".into()]);
    assert_eq!(e.to_string(), "validation failed: a; b");
}

#[test]
fn infra_error_formats_op_device_cause() {
    let e = InfraError::new("connect", "leaf1", "timed out");
    assert_eq!(e.to_string(), "infra error during connect on leaf1: timed out");
}

#[test]
fn holder_mismatch_display() {
    let e = HolderMismatch {
        device: "leaf1".into(),
        expected: "host:1:a".into(),
        actual: "host:2:b".into(),
    };
    assert_eq!(e.to_string(), "lock on leaf1 held by host:2:b, not host:1:a");
}
