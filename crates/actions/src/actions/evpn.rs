// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dispatch::{reject, run_per_device};
use crate::executor::{ActionContext, Executor, StepResult};
use crate::params::{optional_str, required_ip, required_str, required_u16, required_u32};
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::mutations::VtepOpts;
use ntn_device::Device;
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::Instant;

pub struct SetupEvpn;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for SetupEvpn {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let source_ip = match required_ip(&step.params, "source_ip") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let name = optional_str(&step.params, "name").map(str::to_string);
        run_per_device(ctx, devices, move |device, now_ms| {
            let opts = VtepOpts { name: name.clone() };
            async move {
                let changeset = device.create_vtep(now_ms, source_ip, opts)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct TeardownEvpn;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for TeardownEvpn {
    async fn execute(&self, ctx: &ActionContext<C>, _step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        run_per_device(ctx, devices, move |device, now_ms| async move {
            for key in device.config_snapshot().keys("VXLAN_TUNNEL_MAP") {
                let changeset = ntn_core::ChangeSetBuilder::new(device.name(), "teardown-evpn", now_ms)
                    .push(ntn_core::Change::delete("VXLAN_TUNNEL_MAP", key))
                    .build();
                device.apply(&changeset).await?;
            }
            let changeset = device.delete_vtep(now_ms)?;
            device.apply(&changeset).await
        })
        .await
    }
}

pub struct BindIpvpn;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for BindIpvpn {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vrf = match required_str(&step.params, "vrf") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let vni = match required_u32(&step.params, "vni") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let vrf = vrf.clone();
            async move {
                let changeset = device.map_l3_vni(now_ms, &vrf, vni)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct UnbindIpvpn;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for UnbindIpvpn {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vrf = match required_str(&step.params, "vrf") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let vni = match required_u32(&step.params, "vni") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let vrf = vrf.clone();
            async move {
                let changeset = device.unmap_l3_vni(now_ms, &vrf, vni)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct BindMacvpn;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for BindMacvpn {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vlan_id = match required_u16(&step.params, "vlan_id") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let vni = match required_u32(&step.params, "vni") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| async move {
            let changeset = device.map_l2_vni(now_ms, vlan_id, vni)?;
            device.apply(&changeset).await
        })
        .await
    }
}

pub struct UnbindMacvpn;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for UnbindMacvpn {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vlan_id = match required_u16(&step.params, "vlan_id") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let vni = match required_u32(&step.params, "vni") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| async move {
            let changeset = device.unmap_l2_vni(now_ms, vlan_id, vni)?;
            device.apply(&changeset).await
        })
        .await
    }
}

#[cfg(test)]
#[path = "evpn_tests.rs"]
mod tests;
