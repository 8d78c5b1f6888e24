// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::dispatch::{reject, run_per_device};
use crate::executor::{ActionContext, Executor, StepResult};
use crate::params::{optional_str, required_str, required_u32};
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::mutations::{AclBindOpts, AclRuleOpts, AclStage};
use ntn_device::Device;
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::Instant;

pub struct AclCreate;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for AclCreate {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let name = match required_str(&step.params, "name") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let stage = match optional_str(&step.params, "stage") {
            Some("egress") => AclStage::Egress,
            _ => AclStage::Ingress,
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let name = name.clone();
            async move {
                let changeset = device.acl_create(now_ms, &name, stage)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct AclDelete;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for AclDelete {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let name = match required_str(&step.params, "name") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let name = name.clone();
            async move {
                let changeset = device.acl_delete(now_ms, &name)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct AclAddRule;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for AclAddRule {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let table = match required_str(&step.params, "table") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let rule = match required_str(&step.params, "rule") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let priority = match required_u32(&step.params, "priority") {
            Ok(v) => v,
            Err(e) => return reject(start, &devices, e),
        };
        let action = match required_str(&step.params, "action") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let table = table.clone();
            let rule = rule.clone();
            let action = action.clone();
            async move {
                let opts = AclRuleOpts { priority, action, fields: Default::default() };
                let changeset = device.acl_add_rule(now_ms, &table, &rule, opts)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct AclDeleteRule;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for AclDeleteRule {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let table = match required_str(&step.params, "table") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let rule = match required_str(&step.params, "rule") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let table = table.clone();
            let rule = rule.clone();
            async move {
                let changeset = device.acl_delete_rule(now_ms, &table, &rule)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct AclBind;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for AclBind {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let table = match required_str(&step.params, "table") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let iface = match required_str(&step.params, "interface") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let table = table.clone();
            let iface = iface.clone();
            async move {
                let changeset = device.acl_bind(now_ms, &table, &iface, AclBindOpts::default())?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

pub struct AclUnbind;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for AclUnbind {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let table = match required_str(&step.params, "table") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let iface = match required_str(&step.params, "interface") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        run_per_device(ctx, devices, move |device, now_ms| {
            let table = table.clone();
            let iface = iface.clone();
            async move {
                let changeset = device.acl_unbind(now_ms, &table, &iface)?;
                device.apply(&changeset).await
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "acl_tests.rs"]
mod tests;
