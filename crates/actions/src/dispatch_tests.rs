// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{connected_device, test_ctx};
use ntn_core::StepStatus;
use ntn_device::shell::fake::FakeRemoteShell;
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
async fn run_per_device_locks_and_unlocks_around_work() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    let result = run_per_device(&ctx, vec![dev.clone()], |device, now_ms| async move {
        let changeset = device.create_vlan(now_ms, 100, Default::default())?;
        device.apply(&changeset).await
    })
    .await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(!dev.is_locked());
}

#[tokio::test]
async fn run_per_device_unlocks_after_a_failing_precondition() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    let result = run_per_device(&ctx, vec![dev.clone()], |device, now_ms| async move {
        let changeset = device.delete_vlan(now_ms, 999)?;
        device.apply(&changeset).await
    })
    .await;
    assert_ne!(result.status, StepStatus::Passed);
    assert!(!dev.is_locked());
}

#[tokio::test]
async fn dispatcher_routes_known_action_and_rejects_unknown() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    let dispatcher: Dispatcher<ntn_core::FakeClock> = Dispatcher::new(Arc::new(FakeRemoteShell::new()));

    let result = dispatcher.dispatch(&ctx, &step("create-vlan", &[("vlan_id", ParamValue::Int(200))]), vec![dev.clone()]).await.unwrap();
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");

    let err = dispatcher.dispatch(&ctx, &step("not-a-real-action", &[]), vec![dev.clone()]).await;
    assert!(matches!(err, Err(ActionError::UnknownAction(_))));
}

#[tokio::test]
async fn reject_reports_one_failure_per_intended_device() {
    let dev_a = connected_device("leaf1").await;
    let dev_b = connected_device("leaf2").await;
    let err = ntn_core::ValidationError::single("missing param \"vlan_id\"".to_string());
    let result = reject(std::time::Instant::now(), &[dev_a, dev_b], err);
    assert_eq!(result.details.len(), 2);
    assert_ne!(result.status, StepStatus::Passed);
}