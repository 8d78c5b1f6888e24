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
async fn configure_qos_sets_profile() {
    let ctx = test_ctx();
    let dev = connected_device_with_interfaces("leaf1", &["Ethernet0"]).await;

    let configure = step(
        "configure-qos",
        &[("interface", ParamValue::String("Ethernet0".into())), ("profile", ParamValue::String("AZURE".into()))],
    );
    let result = ConfigureQos.execute(&ctx, &configure, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    let fields = dev.config_snapshot().get("PORT_QOS_MAP", "Ethernet0").cloned().expect("qos map entry");
    assert_eq!(fields.get("qos_profile").map(String::as_str), Some("AZURE"));
}

#[tokio::test]
async fn configure_qos_missing_interface_fails() {
    let ctx = test_ctx();
    let dev = connected_device_with_interfaces("leaf1", &[]).await;

    let configure = step(
        "configure-qos",
        &[("interface", ParamValue::String("Ethernet0".into())), ("profile", ParamValue::String("AZURE".into()))],
    );
    let result = ConfigureQos.execute(&ctx, &configure, vec![dev.clone()]).await;
    assert_ne!(result.status, StepStatus::Passed);
}