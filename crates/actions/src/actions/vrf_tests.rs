// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{connected_device_with_interfaces, test_ctx};
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
async fn create_vrf_then_bind_interface() {
    let ctx = test_ctx();
    let dev = connected_device_with_interfaces("leaf1", &["Ethernet0"]).await;

    let create = step("create-vrf", &[("name", ParamValue::String("Vrf1".into())), ("l3vni", ParamValue::Int(10100))]);
    let result = CreateVrf.execute(&ctx, &create, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(dev.has_vrf("Vrf1"));

    let bind = step(
        "set-interface-vrf",
        &[("interface", ParamValue::String("Ethernet0".into())), ("vrf", ParamValue::String("Vrf1".into()))],
    );
    let result = SetInterfaceVrf.execute(&ctx, &bind, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
}

#[tokio::test]
async fn delete_vrf_blocked_while_bound() {
    let ctx = test_ctx();
    let dev = connected_device_with_interfaces("leaf1", &["Ethernet0"]).await;
    CreateVrf.execute(&ctx, &step("create-vrf", &[("name", ParamValue::String("Vrf1".into()))]), vec![dev.clone()]).await;
    SetInterfaceVrf
        .execute(
            &ctx,
            &step(
                "set-interface-vrf",
                &[("interface", ParamValue::String("Ethernet0".into())), ("vrf", ParamValue::String("Vrf1".into()))],
            ),
            vec![dev.clone()],
        )
        .await;

    let result = DeleteVrf.execute(&ctx, &step("delete-vrf", &[("name", ParamValue::String("Vrf1".into()))]), vec![dev.clone()]).await;
    assert_ne!(result.status, StepStatus::Passed);
}