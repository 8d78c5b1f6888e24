// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{connected_device_with_service, test_ctx};
use ntn_core::StepStatus;
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
async fn apply_then_remove_service() {
    let ctx = test_ctx();
    let dev = connected_device_with_service("leaf1", "Ethernet0", "web-tier").await;

    let apply = step(
        "apply-service",
        &[("interface", ParamValue::String("Ethernet0".into())), ("service", ParamValue::String("web-tier".into()))],
    );
    let result = ApplyService.execute(&ctx, &apply, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert_eq!(dev.interface_service("Ethernet0").as_deref(), Some("web-tier"));

    let remove = step("remove-service", &[("interface", ParamValue::String("Ethernet0".into()))]);
    let result = RemoveService.execute(&ctx, &remove, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(dev.interface_service("Ethernet0").is_none());
}

#[tokio::test]
async fn refresh_service_preserves_binding() {
    let ctx = test_ctx();
    let dev = connected_device_with_service("leaf1", "Ethernet0", "web-tier").await;
    ApplyService
        .execute(
            &ctx,
            &step("apply-service", &[("interface", ParamValue::String("Ethernet0".into())), ("service", ParamValue::String("web-tier".into()))]),
            vec![dev.clone()],
        )
        .await;

    let refresh = step("refresh-service", &[("interface", ParamValue::String("Ethernet0".into()))]);
    let result = RefreshService.execute(&ctx, &refresh, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert_eq!(dev.interface_service("Ethernet0").as_deref(), Some("web-tier"));
}

#[tokio::test]
async fn apply_service_unknown_fails() {
    let ctx = test_ctx();
    let dev = connected_device_with_service("leaf1", "Ethernet0", "web-tier").await;

    let apply = step(
        "apply-service",
        &[("interface", ParamValue::String("Ethernet0".into())), ("service", ParamValue::String("not-declared".into()))],
    );
    let result = ApplyService.execute(&ctx, &apply, vec![dev.clone()]).await;
    assert_ne!(result.status, StepStatus::Passed);
}