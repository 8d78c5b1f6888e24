// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dispatch::{reject, run_per_device};
use crate::executor::{ActionContext, Executor, StepResult};
use crate::params::{optional_str, required_str};
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::mutations::ServiceOpts;
use ntn_device::Device;
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::Instant;

pub struct ApplyService;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for ApplyService {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let iface = match required_str(&step.params, "interface") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let service = match required_str(&step.params, "service") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let ip = optional_str(&step.params, "ip").map(str::to_string);
        let vrf = optional_str(&step.params, "vrf").map(str::to_string);
        let acl_table = optional_str(&step.params, "acl_table").map(str::to_string);
        run_per_device(ctx, devices, move |device, now_ms| {
            let iface = iface.clone();
            let service = service.clone();
            let opts = ServiceOpts { ip: ip.clone(), vrf: vrf.clone(), acl_table: acl_table.clone() };
            async move {
                let changeset = device.apply_service(now_ms, &iface, &service, opts)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct RemoveService;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for RemoveService {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let iface = match required_str(&step.params, "interface") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let iface = iface.clone();
            async move {
                let changeset = device.remove_service(now_ms, &iface)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

/// `refresh-service`: reapply a binding's current `SERVICE` without an
/// intermediate unbound window — remove then re-apply against the same
/// interface/service pair already on file.
pub struct RefreshService;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for RefreshService {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let iface = match required_str(&step.params, "interface") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let iface = iface.clone();
            async move {
                let Some(service) = device.interface_service(&iface) else {
                    return Err(ntn_core::ValidationError::single(format!("interface {iface} has no service applied")).into());
                };
                let changeset = device.remove_service(now_ms, &iface)?;
                device.apply(&changeset).await?;
                let changeset = device.apply_service(now_ms, &iface, &service, ServiceOpts::default())?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
