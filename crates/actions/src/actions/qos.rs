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

pub struct ConfigureQos;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for ConfigureQos {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let iface = match required_str(&step.params, "interface") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let profile = match required_str(&step.params, "profile") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let iface = iface.clone();
            let profile = profile.clone();
            async move {
                let changeset = device.configure_qos(now_ms, &iface, &profile)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "qos_tests.rs"]
mod tests;
