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
async fn create_then_delete_port_channel() {
    let ctx = test_ctx();
    let dev = connected_device_with_interfaces("leaf1", &["Ethernet0", "Ethernet4"]).await;

    let create = step(
        "create-port-channel",
        &[
            ("name", ParamValue::String("PortChannel100".into())),
            ("members", ParamValue::List(vec![ParamValue::String("Ethernet0".into()), ParamValue::String("Ethernet4".into())])),
        ],
    );
    let result = CreatePortChannel.execute(&ctx, &create, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(dev.has_port_channel("PortChannel100"));
    assert_eq!(dev.port_channel_members("PortChannel100").len(), 2);

    let delete = step("delete-port-channel", &[("name", ParamValue::String("PortChannel100".into()))]);
    let result = DeletePortChannel.execute(&ctx, &delete, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(!dev.has_port_channel("PortChannel100"));
}

#[tokio::test]
async fn create_with_missing_member_fails() {
    let ctx = test_ctx();
    let dev = connected_device_with_interfaces("leaf1", &["Ethernet0"]).await;

    let create = step(
        "create-port-channel",
        &[
            ("name", ParamValue::String("PortChannel100".into())),
            ("members", ParamValue::List(vec![ParamValue::String("Ethernet0".into()), ParamValue::String("Ethernet8".into())])),
        ],
    );
    let result = CreatePortChannel.execute(&ctx, &create, vec![dev.clone()]).await;
    assert_ne!(result.status, StepStatus::Passed);
}