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
async fn verify_health_passes_with_no_state() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    let result = VerifyHealth.execute(&ctx, &step("verify-health", &[]), vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
}

#[tokio::test]
async fn verify_config_db_checks_field_value() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    crate::actions::vlan::CreateVlan
        .execute(&ctx, &step("create-vlan", &[("vlan_id", ParamValue::Int(100))]), vec![dev.clone()])
        .await;

    let verify = step(
        "verify-config-db",
        &[
            ("table", ParamValue::String("VLAN".into())),
            ("key", ParamValue::String("Vlan100".into())),
        ],
    );
    let result = VerifyConfigDb.execute(&ctx, &verify, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
}

#[tokio::test]
async fn verify_config_db_missing_key_fails() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    let verify = step(
        "verify-config-db",
        &[("table", ParamValue::String("VLAN".into())), ("key", ParamValue::String("Vlan999".into()))],
    );
    let result = VerifyConfigDb.execute(&ctx, &verify, vec![dev.clone()]).await;
    assert_ne!(result.status, StepStatus::Passed);
}

#[tokio::test]
async fn verify_ping_passes_on_full_success() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    let command = "ping -c 5 -W 1 10.0.0.1";
    let shell = std::sync::Arc::new(
        ntn_device::shell::fake::FakeRemoteShell::new()
            .with_response(command, ShellOutput { exit_status: 0, stdout: "5 packets transmitted, 5 received, 0% packet loss".into(), stderr: String::new() }),
    );
    let verify = VerifyPing::new(shell);
    let result = verify.execute(&ctx, &step("verify-ping", &[("target", ParamValue::String("10.0.0.1".into()))]), vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
}

#[tokio::test]
async fn verify_ping_fails_below_success_rate() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    let command = "ping -c 5 -W 1 10.0.0.1";
    let shell = std::sync::Arc::new(
        ntn_device::shell::fake::FakeRemoteShell::new()
            .with_response(command, ShellOutput { exit_status: 0, stdout: "5 packets transmitted, 1 received, 80% packet loss".into(), stderr: String::new() }),
    );
    let verify = VerifyPing::new(shell);
    let result = verify.execute(&ctx, &step("verify-ping", &[("target", ParamValue::String("10.0.0.1".into()))]), vec![dev.clone()]).await;
    assert_ne!(result.status, StepStatus::Passed);
}