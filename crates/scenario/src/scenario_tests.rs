// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn devices() -> Vec<String> {
    vec!["leaf1".to_string(), "leaf2".to_string()]
}

const VALID_YAML: &str = r#"
name: bring-up-vlan
description: create a vlan on both leaves
requires: []
steps:
  - name: create
    action: create-vlan
    devices: all
    vlan_id: 500
  - name: wait-a-bit
    action: wait
    duration_secs: 1
"#;

#[test]
fn parses_valid_scenario() {
    let scenario = Scenario::from_yaml(VALID_YAML, &devices()).expect("should parse");
    assert_eq!(scenario.name, "bring-up-vlan");
    assert_eq!(scenario.steps.len(), 2);
}

#[test]
fn rejects_unknown_action() {
    let yaml = r#"
name: bad
steps:
  - name: s
    action: not-a-real-action
    devices: all
"#;
    let err = Scenario::from_yaml(yaml, &devices()).unwrap_err();
    assert!(matches!(err, ScenarioError::UnknownAction(_)));
}

#[test]
fn rejects_missing_required_param() {
    let yaml = r#"
name: bad
steps:
  - name: s
    action: create-vlan
    devices: all
"#;
    let err = Scenario::from_yaml(yaml, &devices()).unwrap_err();
    assert!(matches!(err, ScenarioError::Validation(_)));
}

#[test]
fn referenced_devices_expands_all() {
    let scenario = Scenario::from_yaml(VALID_YAML, &devices()).unwrap();
    assert_eq!(scenario.referenced_devices(&devices()), devices());
}

#[test]
fn requires_defaults_to_empty() {
    let yaml = r#"
name: no-deps
steps:
  - name: w
    action: wait
    duration_secs: 1
"#;
    let scenario = Scenario::from_yaml(yaml, &devices()).unwrap();
    assert!(scenario.requires.is_empty());
}