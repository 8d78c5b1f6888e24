// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dispatch::{reject, run_per_device};
use crate::executor::{ActionContext, Executor, StepResult};
use crate::params::{optional_str, required_ip, required_u32};
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::mutations::{BgpGlobalsOpts, BgpNeighborOpts};
use ntn_device::Device;
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::Instant;

pub struct ConfigureBgp;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for ConfigureBgp {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let as_number = match required_u32(&step.params, "as_number") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let router_id = match step.params.get("router_id") {
            None => None,
            Some(_) => match required_ip(&step.params, "router_id") {
                Ok(v) => Some(v),
                Err(e) => return reject(start, &devices, e),
            },
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let opts = BgpGlobalsOpts { router_id };
            async move {
                let changeset = device.set_bgp_globals(now_ms, as_number, opts)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct RemoveBgpGlobals;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for RemoveBgpGlobals {
    async fn execute(&self, ctx: &ActionContext<C>, _step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        run_per_device(ctx, devices, move |device, now_ms| async move {
            let changeset = device.remove_bgp_globals(now_ms)?;
            device.apply(&changeset).await
        })
        .await
    }
}

pub struct BgpAddNeighbor;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for BgpAddNeighbor {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let address = match required_ip(&step.params, "address") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let remote_as = match required_u32(&step.params, "remote_as") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let peer_group = optional_str(&step.params, "peer_group").map(str::to_string);
        let description = optional_str(&step.params, "description").map(str::to_string);
        run_per_device(ctx, devices, move |device, now_ms| {
            let opts = BgpNeighborOpts { peer_group: peer_group.clone(), description: description.clone() };
            async move {
                let changeset = device.add_bgp_neighbor(now_ms, address, remote_as, opts)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct BgpRemoveNeighbor;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for BgpRemoveNeighbor {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let address = match required_ip(&step.params, "address") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| async move {
            let changeset = device.remove_bgp_neighbor(now_ms, address)?;
            device.apply(&changeset).await
        })
        .await
    }
}

#[cfg(test)]
#[path = "bgp_tests.rs"]
mod tests;
