// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dispatch::{reject, run_per_device};
use crate::executor::{ActionContext, Executor, StepResult};
use crate::params::required_str;
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::Device;
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::Instant;

pub struct AddStaticRoute;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for AddStaticRoute {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vrf = match required_str(&step.params, "vrf") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let prefix = match required_str(&step.params, "prefix") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let nexthop = match required_str(&step.params, "nexthop") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let vrf = vrf.clone();
            let prefix = prefix.clone();
            let nexthop = nexthop.clone();
            async move {
                let changeset = device.add_static_route(now_ms, &vrf, &prefix, &nexthop)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct RemoveStaticRoute;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for RemoveStaticRoute {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vrf = match required_str(&step.params, "vrf") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let prefix = match required_str(&step.params, "prefix") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let vrf = vrf.clone();
            let prefix = prefix.clone();
            async move {
                let changeset = device.remove_static_route(now_ms, &vrf, &prefix)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "route_tests.rs"]
mod tests;
