// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;

fn write_scenario(dir: &Path, filename: &str, name: &str, requires: &[&str]) {
    let yaml = format!(
        "name: {name}\nrequires: [{}]\nsteps:\n  - name: w\n    action: wait\n    duration_secs: 1\n",
        requires.join(", ")
    );
    fs::write(dir.join(filename), yaml).unwrap();
}

#[test]
fn loads_and_orders_scenarios_from_directory() {
    let tmp = tempfile::tempdir().unwrap();
    write_scenario(tmp.path(), "b.yaml", "b", &["a"]);
    write_scenario(tmp.path(), "a.yaml", "a", &[]);

    let suite = Suite::load("demo", tmp.path(), &[]).unwrap();
    assert_eq!(suite.scenario_names(), vec!["a", "b"]);
}

#[test]
fn ignores_non_yaml_files_in_directory() {
    let tmp = tempfile::tempdir().unwrap();
    write_scenario(tmp.path(), "a.yaml", "a", &[]);
    fs::write(tmp.path().join("README.md"), "not a scenario").unwrap();

    let suite = Suite::load("demo", tmp.path(), &[]).unwrap();
    assert_eq!(suite.scenario_names(), vec!["a"]);
}

#[test]
fn rejects_duplicate_scenario_names() {
    let tmp = tempfile::tempdir().unwrap();
    write_scenario(tmp.path(), "a.yaml", "dup", &[]);
    write_scenario(tmp.path(), "b.yaml", "dup", &[]);

    let err = Suite::load("demo", tmp.path(), &[]).unwrap_err();
    assert!(matches!(err, ScenarioError::DuplicateScenario(_)));
}

#[test]
fn missing_directory_is_an_io_error() {
    let err = Suite::load("demo", "/no/such/directory/ever", &[]).unwrap_err();
    assert!(matches!(err, ScenarioError::Io { .. }));
}