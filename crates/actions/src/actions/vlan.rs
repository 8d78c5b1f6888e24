// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dispatch::{reject, run_per_device};
use crate::executor::{ActionContext, Executor, StepResult};
use crate::params::{required_bool, required_str, required_u16};
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::mutations::VlanOpts;
use ntn_device::Device;
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::Instant;

pub struct CreateVlan;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for CreateVlan {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vlan_id = match required_u16(&step.params, "vlan_id") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let description = step.params.get("description").and_then(|v| v.as_str()).map(str::to_string);
        run_per_device(ctx, devices, move |device, now_ms| {
            let opts = VlanOpts { description: description.clone() };
            async move {
                let changeset = device.create_vlan(now_ms, vlan_id, opts)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct DeleteVlan;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for DeleteVlan {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vlan_id = match required_u16(&step.params, "vlan_id") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| async move {
            let changeset = device.delete_vlan(now_ms, vlan_id)?;
            device.apply(&changeset).await
        })
        .await
    }
}

pub struct AddVlanMember;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for AddVlanMember {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vlan_id = match required_u16(&step.params, "vlan_id") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let iface = match required_str(&step.params, "interface") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let tagged = required_bool(&step.params, "tagged", true);
        run_per_device(ctx, devices, move |device, now_ms| {
            let iface = iface.clone();
            async move {
                let changeset = device.add_vlan_member(now_ms, vlan_id, &iface, tagged)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct RemoveVlanMember;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for RemoveVlanMember {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vlan_id = match required_u16(&step.params, "vlan_id") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let iface = match required_str(&step.params, "interface") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let iface = iface.clone();
            async move {
                let changeset = device.remove_vlan_member(now_ms, vlan_id, &iface)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "vlan_tests.rs"]
mod tests;
