// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dispatch::{reject, run_per_device};
use crate::executor::{ActionContext, Executor, StepResult};
use crate::params::{optional_u8, required_bool, required_str, required_str_list};
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::mutations::PortChannelOpts;
use ntn_device::Device;
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::Instant;

pub struct CreatePortChannel;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for CreatePortChannel {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let name = match required_str(&step.params, "name") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let members = match required_str_list(&step.params, "members") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let min_links = match optional_u8(&step.params, "min_links") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let lacp = required_bool(&step.params, "lacp", true);
        run_per_device(ctx, devices, move |device, now_ms| {
            let name = name.clone();
            let members = members.clone();
            async move {
                let opts = PortChannelOpts { min_links, lacp };
                let changeset = device.create_port_channel(now_ms, &name, &members, opts)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct DeletePortChannel;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for DeletePortChannel {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let name = match required_str(&step.params, "name") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let name = name.clone();
            async move {
                let changeset = device.delete_port_channel(now_ms, &name)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "portchannel_tests.rs"]
mod tests;
