// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn scenario(name: &str, requires: &[&str]) -> Scenario {
    let yaml = format!(
        "name: {name}\nrequires: [{}]\nsteps:\n  - name: w\n    action: wait\n    duration_secs: 1\n",
        requires.join(", ")
    );
    Scenario::from_yaml(&yaml, &[]).expect("test scenario should parse")
}

#[test]
fn independent_scenarios_keep_input_order() {
    let scenarios = vec![scenario("a", &[]), scenario("b", &[])];
    let order = topological_order(&scenarios).unwrap();
    assert_eq!(order, vec![0, 1]);
}

#[test]
fn dependent_scenario_sorts_after_its_dependency() {
    let scenarios = vec![scenario("b", &["a"]), scenario("a", &[])];
    let order = topological_order(&scenarios).unwrap();
    let pos_a = order.iter().position(|&i| scenarios[i].name == "a").unwrap();
    let pos_b = order.iter().position(|&i| scenarios[i].name == "b").unwrap();
    assert!(pos_a < pos_b);
}

#[test]
fn unknown_dependency_is_rejected() {
    let scenarios = vec![scenario("a", &["ghost"])];
    let err = topological_order(&scenarios).unwrap_err();
    assert!(matches!(err, ScenarioError::MissingDependency { .. }));
}

#[test]
fn direct_cycle_is_rejected() {
    let scenarios = vec![scenario("a", &["b"]), scenario("b", &["a"])];
    let err = topological_order(&scenarios).unwrap_err();
    assert!(matches!(err, ScenarioError::Cycle(_)));
}

#[test]
fn self_dependency_is_a_cycle() {
    let scenarios = vec![scenario("a", &["a"])];
    let err = topological_order(&scenarios).unwrap_err();
    assert!(matches!(err, ScenarioError::Cycle(_)));
}

#[test]
fn diamond_dependency_sorts_consistently() {
    // d requires b and c; b and c both require a.
    let scenarios = vec![scenario("a", &[]), scenario("b", &["a"]), scenario("c", &["a"]), scenario("d", &["b", "c"])];
    let order = topological_order(&scenarios).unwrap();
    let pos = |name: &str| order.iter().position(|&i| scenarios[i].name == name).unwrap();
    assert!(pos("a") < pos("b"));
    assert!(pos("a") < pos("c"));
    assert!(pos("b") < pos("d"));
    assert!(pos("c") < pos("d"));
}