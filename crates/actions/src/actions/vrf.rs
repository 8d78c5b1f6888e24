// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dispatch::{reject, run_per_device};
use crate::executor::{ActionContext, Executor, StepResult};
use crate::params::{optional_str, optional_u32, required_str};
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::mutations::VrfOpts;
use ntn_device::Device;
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::Instant;

pub struct CreateVrf;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for CreateVrf {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let name = match required_str(&step.params, "name") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let l3vni = match optional_u32(&step.params, "l3vni") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let name = name.clone();
            async move {
                let changeset = device.create_vrf(now_ms, &name, VrfOpts { l3vni })?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct DeleteVrf;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for DeleteVrf {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let name = match required_str(&step.params, "name") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let name = name.clone();
            async move {
                let changeset = device.delete_vrf(now_ms, &name)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct SetInterfaceVrf;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for SetInterfaceVrf {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let iface = match required_str(&step.params, "interface") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let vrf = match required_str(&step.params, "vrf") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let ip = optional_str(&step.params, "ip").map(str::to_string);
        run_per_device(ctx, devices, move |device, now_ms| {
            let iface = iface.clone();
            let vrf = vrf.clone();
            let ip = ip.clone();
            async move {
                let changeset = device.set_interface_vrf(now_ms, &iface, &vrf, ip.as_deref())?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "vrf_tests.rs"]
mod tests;
