// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{connected_device, test_ctx};
use ntn_core::StepStatus;
use ntn_device::ShellOutput;
use ntn_scenario::ParamValue;

fn step(action: &str, params: &[(&str, ParamValue)]) -> Step {
    Step {
        name: "s".into(),
        action: action.into(),
        devices: None,
        params: params.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect(),
        expect: Default::default(),
        timeout_secs: None,
    }
}

#[tokio::test]
async fn wait_sleeps_and_passes() {
    let ctx = test_ctx();
    let result = Wait.execute(&ctx, &step("wait", &[("duration_secs", ParamValue::Int(0))]), vec![]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
}

#[tokio::test]
async fn wait_rejects_negative_duration() {
    let ctx = test_ctx();
    let result = Wait.execute(&ctx, &step("wait", &[("duration_secs", ParamValue::Int(-1))]), vec![]).await;
    assert_ne!(result.status, StepStatus::Passed);
}

#[tokio::test]
async fn host_exec_runs_local_shell_command() {
    let ctx = test_ctx();
    let result = HostExec.execute(&ctx, &step("host-exec", &[("command", ParamValue::String("true".into()))]), vec![]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
}

#[tokio::test]
async fn host_exec_reports_nonzero_exit() {
    let ctx = test_ctx();
    let result = HostExec.execute(&ctx, &step("host-exec", &[("command", ParamValue::String("false".into()))]), vec![]).await;
    assert_ne!(result.status, StepStatus::Passed);
}

#[tokio::test]
async fn ssh_command_reports_shell_output() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    let shell = std::sync::Arc::new(
        ntn_device::shell::fake::FakeRemoteShell::new()
            .with_response("uptime", ShellOutput { exit_status: 0, stdout: "up 1 day".into(), stderr: String::new() }),
    );
    let action = SshCommand::new(shell);
    let result = action.execute(&ctx, &step("ssh-command", &[("command", ParamValue::String("uptime".into()))]), vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
}

#[tokio::test]
async fn restart_service_reports_failure_exit() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    let shell = std::sync::Arc::new(
        ntn_device::shell::fake::FakeRemoteShell::new()
            .with_response("systemctl restart bgp", ShellOutput { exit_status: 1, stdout: String::new(), stderr: "unit not found".into() }),
    );
    let action = RestartService::new(shell);
    let result = action.execute(&ctx, &step("restart-service", &[("service", ParamValue::String("bgp".into()))]), vec![dev.clone()]).await;
    assert_ne!(result.status, StepStatus::Passed);
}

#[tokio::test]
async fn cleanup_is_best_effort_on_empty_device() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    let result = Cleanup.execute(&ctx, &step("cleanup", &[]), vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
}