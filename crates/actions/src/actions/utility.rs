// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The four actions that do not fit the per-device `ChangeSet` shape:
//! `wait` (ignores devices entirely), `host-exec` (runs on the machine
//! driving the suite, never on a fabric device), and `ssh-command`/
//! `restart-service` (a live SSH command against exactly one device).
//! `cleanup` fans out like a mutation action but is deliberately
//! best-effort — it tears down whatever provisioning it finds rather
//! than failing the step over state that was never there.

use crate::executor::{ActionContext, Executor, PerDeviceResult, StepResult};
use crate::params::{optional_str, required_str};
use async_trait::async_trait;
use ntn_core::{Clock, StepStatus};
use ntn_device::{Device, RemoteShell};
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// `wait(duration_secs)`.
pub struct Wait;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for Wait {
    async fn execute(&self, _ctx: &ActionContext<C>, step: &Step, _devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let secs = match crate::params::required_i64(&step.params, "duration_secs") {
            Ok(v) => v,
            Err(e) => return StepResult::single(start.elapsed().as_millis() as u64, StepStatus::Failed, Some(e.to_string())),
        };
        if secs < 0 {
            return StepResult::single(
                start.elapsed().as_millis() as u64,
                StepStatus::Failed,
                Some(format!("duration_secs must be non-negative, got {secs}")),
            );
        }
        tokio::time::sleep(Duration::from_secs(secs as u64)).await;
        StepResult::single(start.elapsed().as_millis() as u64, StepStatus::Passed, None)
    }
}

/// `host-exec(command, container?)`: runs on the suite-runner host itself,
/// optionally inside a named container via `docker exec`, rather than
/// over SSH to a fabric device.
pub struct HostExec;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for HostExec {
    async fn execute(&self, _ctx: &ActionContext<C>, step: &Step, _devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let command = match required_str(&step.params, "command") {
            Ok(v) => v,
            Err(e) => return StepResult::single(start.elapsed().as_millis() as u64, StepStatus::Failed, Some(e.to_string())),
        };
        let container = optional_str(&step.params, "container");

        let mut cmd = match container {
            Some(container) => {
                let mut c = tokio::process::Command::new("docker");
                c.args(["exec", container, "sh", "-c", command]);
                c
            }
            None => {
                let mut c = tokio::process::Command::new("sh");
                c.args(["-c", command]);
                c
            }
        };

        match cmd.output().await {
            Ok(output) if output.status.success() => {
                StepResult::single(start.elapsed().as_millis() as u64, StepStatus::Passed, None)
            }
            Ok(output) => StepResult::single(
                start.elapsed().as_millis() as u64,
                StepStatus::Failed,
                Some(format!("exit {}: {}", output.status, String::from_utf8_lossy(&output.stderr))),
            ),
            Err(e) => StepResult::single(start.elapsed().as_millis() as u64, StepStatus::Error, Some(e.to_string())),
        }
    }
}

/// `ssh-command(command)`: one device, one command, over `RemoteShell`.
pub struct SshCommand {
    shell: Arc<dyn RemoteShell>,
}

impl SshCommand {
    pub fn new(shell: Arc<dyn RemoteShell>) -> Self {
        Self { shell }
    }
}

#[async_trait]
impl<C: Clock + 'static> Executor<C> for SshCommand {
    async fn execute(&self, _ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let command = match required_str(&step.params, "command") {
            Ok(v) => v.to_string(),
            Err(e) => {
                let details = devices.iter().map(|d| PerDeviceResult::failed(d.name(), e.to_string())).collect();
                return StepResult::from_details(start.elapsed().as_millis() as u64, details);
            }
        };
        let mut details = Vec::with_capacity(devices.len());
        for device in &devices {
            match self.shell.exec(device.profile(), &command, Duration::from_secs(30)).await {
                Ok(output) if output.success() => details.push(PerDeviceResult::passed(device.name())),
                Ok(output) => details.push(PerDeviceResult::failed(device.name(), format!("exit {}: {}", output.exit_status, output.stderr))),
                Err(e) => details.push(PerDeviceResult::errored(device.name(), e.to_string())),
            }
        }
        StepResult::from_details(start.elapsed().as_millis() as u64, details)
    }
}

/// `restart-service(service)`: one device, `systemctl restart <service>`.
pub struct RestartService {
    shell: Arc<dyn RemoteShell>,
}

impl RestartService {
    pub fn new(shell: Arc<dyn RemoteShell>) -> Self {
        Self { shell }
    }
}

#[async_trait]
impl<C: Clock + 'static> Executor<C> for RestartService {
    async fn execute(&self, _ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let service = match required_str(&step.params, "service") {
            Ok(v) => v.to_string(),
            Err(e) => {
                let details = devices.iter().map(|d| PerDeviceResult::failed(d.name(), e.to_string())).collect();
                return StepResult::from_details(start.elapsed().as_millis() as u64, details);
            }
        };
        let command = format!("systemctl restart {service}");
        let mut details = Vec::with_capacity(devices.len());
        for device in &devices {
            match self.shell.exec(device.profile(), &command, Duration::from_secs(60)).await {
                Ok(output) if output.success() => details.push(PerDeviceResult::passed(device.name())),
                Ok(output) => details.push(PerDeviceResult::failed(device.name(), format!("exit {}: {}", output.exit_status, output.stderr))),
                Err(e) => details.push(PerDeviceResult::errored(device.name(), e.to_string())),
            }
        }
        StepResult::from_details(start.elapsed().as_millis() as u64, details)
    }
}

/// `cleanup`: best-effort teardown across every target device — undo
/// anything `provision` would have set up. Never fails the step over
/// state that simply wasn't there; only a store/transport error counts.
pub struct Cleanup;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for Cleanup {
    async fn execute(&self, ctx: &ActionContext<C>, _step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let now_ms = ctx.now_ms();
        let mut details = Vec::with_capacity(devices.len());
        for device in &devices {
            if let Err(e) = device.reload().await {
                details.push(PerDeviceResult::errored(device.name(), e.to_string()));
                continue;
            }
            if let Err(e) = device.lock(ctx.holder.clone(), ctx.lock_ttl, now_ms).await {
                details.push(PerDeviceResult::errored(device.name(), e.to_string()));
                continue;
            }

            let mut errored = None;
            if device.config_snapshot().exists("LOOPBACK_INTERFACE", "Loopback0") {
                if let Ok(cs) = device.remove_loopback(now_ms) {
                    if let Err(e) = device.apply(&cs).await {
                        errored = Some(e.to_string());
                    }
                }
            }
            for key in device.config_snapshot().keys("VXLAN_TUNNEL_MAP") {
                let cs = ntn_core::ChangeSetBuilder::new(device.name(), "cleanup", now_ms)
                    .push(ntn_core::Change::delete("VXLAN_TUNNEL_MAP", key))
                    .build();
                if let Err(e) = device.apply(&cs).await {
                    errored = Some(e.to_string());
                }
            }
            if device.has_vtep() {
                if let Ok(cs) = device.delete_vtep(now_ms) {
                    let _ = device.apply(&cs).await;
                }
            }
            let _ = device.unlock().await;

            match errored {
                Some(message) => details.push(PerDeviceResult::failed(device.name(), message)),
                None => details.push(PerDeviceResult::passed(device.name())),
            }
        }
        StepResult::from_details(start.elapsed().as_millis() as u64, details)
    }
}

#[cfg(test)]
#[path = "utility_tests.rs"]
mod tests;
