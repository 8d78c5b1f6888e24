// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::actions::vlan::CreateVlan;
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
async fn setup_then_teardown_evpn() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;

    let setup = step("setup-evpn", &[("source_ip", ParamValue::String("10.0.0.1".into()))]);
    let result = SetupEvpn.execute(&ctx, &setup, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(dev.has_vtep());

    let result = TeardownEvpn.execute(&ctx, &step("teardown-evpn", &[]), vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
    assert!(!dev.has_vtep());
}

#[tokio::test]
async fn bind_then_unbind_ipvpn_and_macvpn() {
    let ctx = test_ctx();
    let dev = connected_device("leaf1").await;
    SetupEvpn.execute(&ctx, &step("setup-evpn", &[("source_ip", ParamValue::String("10.0.0.1".into()))]), vec![dev.clone()]).await;
    CreateVrf.execute(&ctx, &step("create-vrf", &[("name", ParamValue::String("Vrf1".into()))]), vec![dev.clone()]).await;
    CreateVlan.execute(&ctx, &step("create-vlan", &[("vlan_id", ParamValue::Int(500))]), vec![dev.clone()]).await;

    let bind = step("bind-ipvpn", &[("vrf", ParamValue::String("Vrf1".into())), ("vni", ParamValue::Int(10100))]);
    let result = BindIpvpn.execute(&ctx, &bind, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");

    let unbind = step("unbind-ipvpn", &[("vrf", ParamValue::String("Vrf1".into())), ("vni", ParamValue::Int(10100))]);
    let result = UnbindIpvpn.execute(&ctx, &unbind, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");

    let bind = step("bind-macvpn", &[("vlan_id", ParamValue::Int(500)), ("vni", ParamValue::Int(10500))]);
    let result = BindMacvpn.execute(&ctx, &bind, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");

    let unbind = step("unbind-macvpn", &[("vlan_id", ParamValue::Int(500)), ("vni", ParamValue::Int(10500))]);
    let result = UnbindMacvpn.execute(&ctx, &unbind, vec![dev.clone()]).await;
    assert_eq!(result.status, StepStatus::Passed, "{result:?}");
}