// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The executor contract: an executor consumes a parsed step and its
//! resolved target devices, and produces one `StepResult` aggregating a
//! `PerDeviceResult` per device.

use async_trait::async_trait;
use ntn_core::{Clock, HolderId, StepStatus};
use ntn_device::Device;
use ntn_scenario::Step;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Shared, per-suite-run context every executor receives. Generic over
/// the clock rather than boxing it — `Clock: Clone` isn't object-safe,
/// so a trait object would need its own wrapper type for no benefit here.
#[derive(Clone)]
pub struct ActionContext<C: Clock> {
    pub clock: C,
    pub holder: HolderId,
    pub lock_ttl: Duration,
    /// Upper bound on concurrently in-flight device workers for one
    /// step's fan-out, enforced with a `tokio::sync::Semaphore` by the
    /// dispatcher.
    pub max_parallel_devices: usize,
}

impl<C: Clock> ActionContext<C> {
    pub fn new(clock: C, holder: HolderId, lock_ttl: Duration, max_parallel_devices: usize) -> Self {
        Self { clock, holder, lock_ttl, max_parallel_devices }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.epoch_ms()
    }
}

/// Outcome of one step on one device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerDeviceResult {
    pub device: String,
    pub status: StepStatus,
    pub message: Option<String>,
}

impl PerDeviceResult {
    pub fn passed(device: impl Into<String>) -> Self {
        Self { device: device.into(), status: StepStatus::Passed, message: None }
    }

    pub fn failed(device: impl Into<String>, message: impl Into<String>) -> Self {
        Self { device: device.into(), status: StepStatus::Failed, message: Some(message.into()) }
    }

    pub fn errored(device: impl Into<String>, message: impl Into<String>) -> Self {
        Self { device: device.into(), status: StepStatus::Error, message: Some(message.into()) }
    }
}

/// Outcome of one step as a whole, after rolling up every device's result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub status: StepStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    pub details: Vec<PerDeviceResult>,
}

impl StepResult {
    pub fn from_details(duration_ms: u64, details: Vec<PerDeviceResult>) -> Self {
        let status = StepStatus::rollup(details.iter().map(|d| d.status));
        let message = details
            .iter()
            .filter(|d| d.status.is_terminal_failure())
            .filter_map(|d| d.message.as_deref())
            .collect::<Vec<_>>()
            .join("; ");
        Self { status, duration_ms, message: (!message.is_empty()).then_some(message), details }
    }

    /// A result with no per-device detail at all (e.g. `wait`, which
    /// ignores `devices` entirely).
    pub fn single(duration_ms: u64, status: StepStatus, message: Option<String>) -> Self {
        Self { status, duration_ms, message, details: Vec::new() }
    }

    /// Whether the scenario engine should stop running further steps in
    /// this scenario after this one.
    pub fn is_fatal(&self) -> bool {
        self.status.is_terminal_failure()
    }
}

#[async_trait]
pub trait Executor<C: Clock>: Send + Sync {
    /// `devices` is already resolved and deduplicated by the scenario
    /// runner against the suite's topology; an executor never resolves
    /// names itself.
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult;
}
