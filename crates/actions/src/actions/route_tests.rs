// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::actions::vrf::CreateVrf;
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
async fn add_then_remove_static_route() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    CreateVrf.execute(&ctx, &step("create-vrf", &[("name", ParamValue::String("Vrf1".into()))]), vec![dev.clone()]).await;

    let add = step(
        "add-static-route",
        &[
            ("vrf", ParamValue::String("Vrf1".into())),
            ("prefix", ParamValue::String("10.10.0.0/24".into())),
            ("nexthop", ParamValue::String("10.0.0.1".into())),
        ],
    );
    let result = AddStaticRoute.execute(&ctx, &add, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(dev.config_snapshot().exists("STATIC_ROUTE", "Vrf1|10.10.0.0/24"));

    let remove = step("remove-static-route", &[("vrf", ParamValue::String("Vrf1".into())), ("prefix", ParamValue::String("10.10.0.0/24".into()))]);
    let result = RemoveStaticRoute.execute(&ctx, &remove, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(!dev.config_snapshot().exists("STATIC_ROUTE", "Vrf1|10.10.0.0/24"));
}

#[tokio::test]
async fn add_static_route_missing_vrf_fails() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;

    let add = step(
        "add-static-route",
        &[
            ("vrf", ParamValue::String("Vrf1".into())),
            ("prefix", ParamValue::String("10.10.0.0/24".into())),
            ("nexthop", ParamValue::String("10.0.0.1".into())),
        ],
    );
    let result = AddStaticRoute.execute(&ctx, &add, vec![dev.clone()]).await;
    assert_ne!(result.status, StepStatus::Passed);
}