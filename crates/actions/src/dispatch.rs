// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shared per-device fan-out every mutation executor is built from,
//! plus the registry mapping action name to executor.
//!
//! Every mutation action follows the same shape: lock each target device,
//! run the operation (which validates preconditions and builds a
//! `ChangeSet` in one call), apply it, unlock. `run_per_device` is that
//! shape factored out once so individual action files only supply the
//! per-device closure and typed param parsing.

use crate::error::ActionError;
use crate::executor::{ActionContext, Executor, PerDeviceResult, StepResult};
use ntn_core::Clock;
use ntn_device::{Device, DeviceError, RemoteShell};
use ntn_scenario::Step;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Run `work` against every device in `devices`, bounded by
/// `ctx.max_parallel_devices` concurrent workers, acquiring and releasing
/// each device's lock around the call. Workers are independent: one
/// device's failure never cancels another's.
pub async fn run_per_device<C, F, Fut>(ctx: &ActionContext<C>, devices: Vec<Arc<Device>>, work: F) -> StepResult
where
    C: Clock + 'static,
    F: Fn(Arc<Device>, u64) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), DeviceError>> + Send + 'static,
{
    let now_ms = ctx.now_ms();
    let start = Instant::now();
    let semaphore = Arc::new(tokio::sync::Semaphore::new(ctx.max_parallel_devices.max(1)));
    let holder = ctx.holder.clone();
    let ttl = ctx.lock_ttl;
    let work = Arc::new(work);

    let mut tasks = Vec::with_capacity(devices.len());
    for device in devices {
        let semaphore = Arc::clone(&semaphore);
        let holder = holder.clone();
        let work = Arc::clone(&work);
        tasks.push(tokio::spawn(async move {
            let name = device.name().to_string();
            let permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return PerDeviceResult::errored(name, "device worker pool closed"),
            };
            let outcome = run_one_device(&device, holder, ttl, now_ms, work.as_ref()).await;
            drop(permit);
            match outcome {
                Ok(()) => PerDeviceResult::passed(name),
                Err(e) => classify(name, e),
            }
        }));
    }

    let mut details = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(result) => details.push(result),
            Err(join_err) => details.push(PerDeviceResult::errored("unknown", join_err.to_string())),
        }
    }

    StepResult::from_details(start.elapsed().as_millis() as u64, details)
}

/// A param parse failure never touches a device, but still reports one
/// `Failed` detail per intended target so the step's rollup and message
/// surface the same way a per-device precondition failure would.
pub fn reject(start: Instant, devices: &[Arc<Device>], e: ntn_core::ValidationError) -> StepResult {
    let message = e.to_string();
    let details = devices.iter().map(|d| PerDeviceResult::failed(d.name(), message.clone())).collect();
    StepResult::from_details(start.elapsed().as_millis() as u64, details)
}

async fn run_one_device<F, Fut>(
    device: &Arc<Device>,
    holder: ntn_core::HolderId,
    ttl: std::time::Duration,
    now_ms: u64,
    work: &F,
) -> Result<(), DeviceError>
where
    F: Fn(Arc<Device>, u64) -> Fut,
    Fut: Future<Output = Result<(), DeviceError>>,
{
    device.lock(holder, ttl, now_ms).await?;
    let result = work(Arc::clone(device), now_ms).await;
    let _ = device.unlock().await;
    result
}

/// `DeviceLocked` is a transport/contention fact, not a caller mistake —
/// it rolls up as `error`, matching the rest of the lock-protocol errors.
/// Everything else from a mutation primitive (validation, store I/O) is
/// `failed`.
fn classify(device: String, e: DeviceError) -> PerDeviceResult {
    match e {
        DeviceError::Locked(_) | DeviceError::Store(_) | DeviceError::Infra(_) => {
            PerDeviceResult::errored(device, e.to_string())
        }
        _ => PerDeviceResult::failed(device, e.to_string()),
    }
}

/// Maps action names to their executor. Built once per run; immutable
/// thereafter, mirroring `schema::ACTIONS`'s data-registry shape rather
/// than a mutable plugin system.
pub struct Dispatcher<C: Clock> {
    executors: HashMap<&'static str, Box<dyn Executor<C>>>,
}

impl<C: Clock + 'static> Dispatcher<C> {
    /// `shell` backs every action that needs a live SSH command rather
    /// than a store mutation (`verify-ping`, `verify-bgp`, `ssh-command`,
    /// `restart-service`, `host-exec`).
    pub fn new(shell: Arc<dyn RemoteShell>) -> Self {
        Self { executors: crate::catalogue::build_registry(shell) }
    }

    pub fn register(&mut self, name: &'static str, executor: Box<dyn Executor<C>>) {
        self.executors.insert(name, executor);
    }

    pub async fn dispatch(
        &self,
        ctx: &ActionContext<C>,
        step: &Step,
        devices: Vec<Arc<Device>>,
    ) -> Result<StepResult, ActionError> {
        let executor = self.executors.get(step.action.as_str()).ok_or_else(|| ActionError::UnknownAction(step.action.clone()))?;
        Ok(executor.execute(ctx, step, devices).await)
    }

    pub fn known_actions(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.executors.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
