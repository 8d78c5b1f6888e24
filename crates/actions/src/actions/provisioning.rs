// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dispatch::run_per_device;
use crate::executor::{ActionContext, Executor, StepResult};
use crate::params::required_ip;
use crate::dispatch::reject;
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::Device;
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::Instant;

pub struct ConfigureLoopback;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for ConfigureLoopback {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let address = match required_ip(&step.params, "address") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| async move {
            let changeset = device.configure_loopback(now_ms, address)?;
            device.apply(&changeset).await
        })
        .await
    }
}

pub struct RemoveLoopback;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for RemoveLoopback {
    async fn execute(&self, ctx: &ActionContext<C>, _step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        run_per_device(ctx, devices, move |device, now_ms| async move {
            let changeset = device.remove_loopback(now_ms)?;
            device.apply(&changeset).await
        })
        .await
    }
}

pub struct ApplyFrrDefaults;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for ApplyFrrDefaults {
    async fn execute(&self, ctx: &ActionContext<C>, _step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        run_per_device(ctx, devices, move |device, now_ms| async move {
            let changeset = device.apply_frr_defaults(now_ms)?;
            device.apply(&changeset).await
        })
        .await
    }
}

pub struct RemoveFrrDefaults;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for RemoveFrrDefaults {
    async fn execute(&self, ctx: &ActionContext<C>, _step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        run_per_device(ctx, devices, move |device, now_ms| async move {
            let changeset = device.remove_frr_defaults(now_ms)?;
            device.apply(&changeset).await
        })
        .await
    }
}

/// `provision`: the baseline every topology-specific action depends on —
/// FRR defaults always, plus a loopback when the device's profile
/// declares one (`device.profile().loopback_address`). Each primitive is
/// applied as its own `ChangeSet` so a failure partway through leaves the
/// parts that did land reflected in the reloaded snapshot.
pub struct Provision;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for Provision {
    async fn execute(&self, ctx: &ActionContext<C>, _step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        run_per_device(ctx, devices, move |device, now_ms| async move {
            let changeset = device.apply_frr_defaults(now_ms)?;
            device.apply(&changeset).await?;

            if let Some(address) = device.profile().loopback_address {
                let changeset = device.configure_loopback(now_ms, address)?;
                device.apply(&changeset).await?;
            }
            Ok(())
        })
        .await
    }
}

/// `deprovision`: the reverse of `provision`, same ordering — loopback
/// first (if one was configured), then the FRR defaults flag.
pub struct Deprovision;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for Deprovision {
    async fn execute(&self, ctx: &ActionContext<C>, _step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        run_per_device(ctx, devices, move |device, now_ms| async move {
            if device.profile().loopback_address.is_some() {
                let changeset = device.remove_loopback(now_ms)?;
                device.apply(&changeset).await?;
            }
            let changeset = device.remove_frr_defaults(now_ms)?;
            device.apply(&changeset).await
        })
        .await
    }
}

#[cfg(test)]
#[path = "provisioning_tests.rs"]
mod tests;
