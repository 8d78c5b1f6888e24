// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dispatch::{reject, run_per_device};
use crate::executor::{ActionContext, Executor, StepResult};
use crate::params::{optional_str, optional_u32, required_str};
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::mutations::InterfaceOpts;
use ntn_device::Device;
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::Instant;

pub struct SetInterface;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for SetInterface {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let name = match required_str(&step.params, "interface") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let mtu = match optional_u32(&step.params, "mtu") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let speed = match optional_u32(&step.params, "speed") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let admin_status = optional_str(&step.params, "admin_status").map(str::to_string);
        let description = optional_str(&step.params, "description").map(str::to_string);
        run_per_device(ctx, devices, move |device, now_ms| {
            let name = name.clone();
            let opts = InterfaceOpts { mtu, admin_status: admin_status.clone(), description: description.clone(), speed };
            async move {
                let changeset = device.configure_interface(now_ms, &name, opts)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "interface_tests.rs"]
mod tests;
