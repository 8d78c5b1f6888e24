// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end CLI tests: drive the built `ntn` binary the way an
//! operator would, against a throwaway suite/topology fixture. These
//! exercise the CLI surface, not the engine internals already covered
//! by each crate's own unit tests.

use assert_cmd::Command;
use std::fs;
use std::path::Path;

fn ntn() -> Command {
    Command::cargo_bin("ntn").expect("ntn binary is built by the workspace")
}

fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.output().expect("ntn runs");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_fixture(dir: &Path, suite_steps_yaml: &str) {
    fs::create_dir_all(dir.join("suites").join("smoke")).unwrap();
    fs::create_dir_all(dir.join("runs")).unwrap();
    fs::write(dir.join("topology.toml"), "devices = []\n").unwrap();
    fs::write(
        dir.join("newtron.toml"),
        format!(
            "testlab_dir = {:?}\nsuites_base = {:?}\nlab_topology = {:?}\n",
            dir.join("runs"),
            dir.join("suites"),
            dir.join("topology.toml"),
        ),
    )
    .unwrap();
    fs::write(dir.join("suites").join("smoke").join("boot.yaml"), suite_steps_yaml).unwrap();
}

#[test]
fn list_reports_no_suites_against_an_empty_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("runs")).unwrap();
    fs::create_dir_all(dir.path().join("suites")).unwrap();
    fs::write(dir.path().join("topology.toml"), "devices = []\n").unwrap();
    fs::write(
        dir.path().join("newtron.toml"),
        format!(
            "testlab_dir = {:?}\nsuites_base = {:?}\nlab_topology = {:?}\n",
            dir.path().join("runs"),
            dir.path().join("suites"),
            dir.path().join("topology.toml"),
        ),
    )
    .unwrap();

    let mut cmd = ntn();
    cmd.current_dir(dir.path()).arg("list");
    assert!(stdout_of(cmd).contains("no suites found"));
}

#[test]
fn actions_lists_the_closed_catalogue() {
    let mut cmd = ntn();
    cmd.arg("actions");
    assert!(stdout_of(cmd).contains("create-vlan"));
}

#[test]
fn actions_json_is_parseable_and_has_every_entry() {
    let output = ntn().arg("actions").arg("--json").output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = parsed.as_array().unwrap();
    assert!(entries.iter().any(|e| e["name"] == "verify-ping"));
}

#[test]
fn status_on_an_unknown_suite_fails_with_generic_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "name: boot\nsteps: []\n");

    let output = ntn().current_dir(dir.path()).arg("status").arg("never-started").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn start_runs_a_wait_only_suite_to_completion_and_status_reports_it() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(
        dir.path(),
        "name: boot\nsteps:\n  - name: pause-briefly\n    action: wait\n    duration_secs: 0\n",
    );

    let start = ntn().current_dir(dir.path()).arg("start").arg("smoke").output().unwrap();
    assert!(start.status.success(), "stderr: {}", String::from_utf8_lossy(&start.stderr));

    let status = ntn().current_dir(dir.path()).arg("status").arg("smoke").arg("--json").output().unwrap();
    assert!(status.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&status.stdout).unwrap();
    assert_eq!(parsed["status"], "complete");
    assert_eq!(parsed["scenarios"][0]["status"], "passed");
}

#[test]
fn dependency_failure_skips_the_dependent_scenario() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("suites").join("smoke")).unwrap();
    fs::create_dir_all(dir.path().join("runs")).unwrap();
    fs::write(dir.path().join("topology.toml"), "devices = []\n").unwrap();
    fs::write(
        dir.path().join("newtron.toml"),
        format!(
            "testlab_dir = {:?}\nsuites_base = {:?}\nlab_topology = {:?}\n",
            dir.path().join("runs"),
            dir.path().join("suites"),
            dir.path().join("topology.toml"),
        ),
    )
    .unwrap();
    // "boot" targets a device absent from the (empty) topology, so its
    // step errors; "verify" requires "boot" and must be skipped.
    fs::write(
        dir.path().join("suites").join("smoke").join("boot.yaml"),
        "name: boot\nsteps:\n  - name: bad\n    action: create-vlan\n    devices: ghost\n    vlan_id: 10\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("suites").join("smoke").join("verify.yaml"),
        "name: verify\nrequires: [boot]\nsteps:\n  - name: noop\n    action: wait\n    duration_secs: 0\n",
    )
    .unwrap();

    let start = ntn().current_dir(dir.path()).arg("start").arg("smoke").output().unwrap();
    assert_eq!(start.status.code(), Some(1));

    let status = ntn().current_dir(dir.path()).arg("status").arg("smoke").arg("--json").output().unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&status.stdout).unwrap();
    assert_eq!(parsed["status"], "failed");
    let verify = parsed["scenarios"].as_array().unwrap().iter().find(|s| s["name"] == "verify").unwrap();
    assert_eq!(verify["status"], "skipped");
}
