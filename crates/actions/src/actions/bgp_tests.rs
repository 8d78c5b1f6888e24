// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{connected_device, test_ctx};
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
async fn configure_bgp_then_add_neighbor_then_remove() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;

    let configure = step("configure-bgp", &[("as_number", ParamValue::Int(65001))]);
    let result = ConfigureBgp.execute(&ctx, &configure, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(dev.has_bgp_globals());

    let add = step(
        "bgp-add-neighbor",
        &[("address", ParamValue::String("10.0.0.2".into())), ("remote_as", ParamValue::Int(65002))],
    );
    let result = BgpAddNeighbor.execute(&ctx, &add, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(dev.has_bgp_neighbor("10.0.0.2"));

    let remove = step("bgp-remove-neighbor", &[("address", ParamValue::String("10.0.0.2".into()))]);
    let result = BgpRemoveNeighbor.execute(&ctx, &remove, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(!dev.has_bgp_neighbor("10.0.0.2"));

    let result = RemoveBgpGlobals.execute(&ctx, &step("remove-bgp-globals", &[]), vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(!dev.has_bgp_globals());
}

#[tokio::test]
async fn add_neighbor_missing_peer_group_fails() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    ConfigureBgp.execute(&ctx, &step("configure-bgp", &[("as_number", ParamValue::Int(65001))]), vec![dev.clone()]).await;

    let add = step(
        "bgp-add-neighbor",
        &[
            ("address", ParamValue::String("10.0.0.2".into())),
            ("remote_as", ParamValue::Int(65002)),
            ("peer_group", ParamValue::String("LEAFS".into())),
        ],
    );
    let result = BgpAddNeighbor.execute(&ctx, &add, vec![dev.clone()]).await;
    assert_ne!(result.status, StepStatus::Passed);
}