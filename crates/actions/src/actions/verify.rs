// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Verification actions. Each one reads rather than mutates: most walk a
//! device's already-loaded snapshot, but `verify-ping`/`verify-bgp` open a
//! live SSH session through the shared `RemoteShell` to run `ping`/`vtysh`
//! against the fabric itself rather than trusting the config-DB mirror.

use crate::dispatch::reject;
use crate::executor::{ActionContext, Executor, PerDeviceResult, StepResult};
use crate::params::{optional_f64, optional_str, required_str};
use async_trait::async_trait;
use ntn_core::Clock;
use ntn_device::mutations::HealthCheckKind;
use ntn_device::{Device, RemoteShell};
use ntn_scenario::Step;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn rollup(start: Instant, details: Vec<PerDeviceResult>) -> StepResult {
    StepResult::from_details(start.elapsed().as_millis() as u64, details)
}

pub struct VerifyHealth;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for VerifyHealth {
    async fn execute(&self, _ctx: &ActionContext<C>, _step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let mut details = Vec::with_capacity(devices.len());
        for device in &devices {
            let _ = device.reload().await;
            match device.run_health_checks(Some(HealthCheckKind::All)) {
                Ok(report) if report.all_healthy() => details.push(PerDeviceResult::passed(device.name())),
                Ok(report) => {
                    let unhealthy: Vec<String> =
                        report.results.iter().filter(|r| !r.healthy).map(|r| format!("{}:{}", r.name, r.detail)).collect();
                    details.push(PerDeviceResult::failed(device.name(), unhealthy.join(", ")))
                }
                Err(e) => details.push(PerDeviceResult::errored(device.name(), e.to_string())),
            }
        }
        rollup(start, details)
    }
}

pub struct VerifyBgpSnapshot;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for VerifyBgpSnapshot {
    async fn execute(&self, _ctx: &ActionContext<C>, _step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let mut details = Vec::with_capacity(devices.len());
        for device in &devices {
            let _ = device.reload().await;
            match device.run_health_checks(Some(HealthCheckKind::Bgp)) {
                Ok(report) if report.all_healthy() => details.push(PerDeviceResult::passed(device.name())),
                Ok(report) => {
                    let down: Vec<String> =
                        report.results.iter().filter(|r| !r.healthy).map(|r| format!("{}:{}", r.name, r.detail)).collect();
                    details.push(PerDeviceResult::failed(device.name(), down.join(", ")))
                }
                Err(e) => details.push(PerDeviceResult::errored(device.name(), e.to_string())),
            }
        }
        rollup(start, details)
    }
}

pub struct VerifyRoute;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for VerifyRoute {
    async fn execute(&self, _ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let vrf = match required_str(&step.params, "vrf") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let prefix = match required_str(&step.params, "prefix") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let key = format!("{vrf}|{prefix}");
        let mut details = Vec::with_capacity(devices.len());
        for device in &devices {
            let _ = device.reload().await;
            if device.config_snapshot().exists("STATIC_ROUTE", &key) || device.state_snapshot().exists("ROUTE_TABLE", &key) {
                details.push(PerDeviceResult::passed(device.name()));
            } else {
                details.push(PerDeviceResult::failed(device.name(), format!("no route for {key}")));
            }
        }
        rollup(start, details)
    }
}

pub struct VerifyConfigDb;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for VerifyConfigDb {
    async fn execute(&self, _ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let table = match required_str(&step.params, "table") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let key = match required_str(&step.params, "key") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let field = optional_str(&step.params, "field").map(str::to_string);
        let expected = optional_str(&step.params, "value").map(str::to_string);
        let mut details = Vec::with_capacity(devices.len());
        for device in &devices {
            let _ = device.reload().await;
            let snapshot = device.config_snapshot();
            let Some(fields) = snapshot.get(&table, &key) else {
                details.push(PerDeviceResult::failed(device.name(), format!("{table}|{key} not present")));
                continue;
            };
            match (&field, &expected) {
                (Some(field), Some(expected)) => match fields.get(field) {
                    Some(actual) if actual == expected => details.push(PerDeviceResult::passed(device.name())),
                    Some(actual) => details.push(PerDeviceResult::failed(device.name(), format!("{field}={actual}, expected {expected}"))),
                    None => details.push(PerDeviceResult::failed(device.name(), format!("field {field} not present"))),
                },
                _ => details.push(PerDeviceResult::passed(device.name())),
            }
        }
        rollup(start, details)
    }
}

pub struct VerifyStateDb;

#[async_trait]
impl<C: Clock + 'static> Executor<C> for VerifyStateDb {
    async fn execute(&self, _ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let table = match required_str(&step.params, "table") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let key = match required_str(&step.params, "key") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let field = optional_str(&step.params, "field").map(str::to_string);
        let expected = optional_str(&step.params, "value").map(str::to_string);
        let mut details = Vec::with_capacity(devices.len());
        for device in &devices {
            let _ = device.reload().await;
            let snapshot = device.state_snapshot();
            let Some(fields) = snapshot.get(&table, &key) else {
                details.push(PerDeviceResult::failed(device.name(), format!("{table}|{key} not present")));
                continue;
            };
            match (&field, &expected) {
                (Some(field), Some(expected)) => match fields.get(field) {
                    Some(actual) if actual == expected => details.push(PerDeviceResult::passed(device.name())),
                    Some(actual) => details.push(PerDeviceResult::failed(device.name(), format!("{field}={actual}, expected {expected}"))),
                    None => details.push(PerDeviceResult::failed(device.name(), format!("field {field} not present"))),
                },
                _ => details.push(PerDeviceResult::passed(device.name())),
            }
        }
        rollup(start, details)
    }
}

/// `verify-ping(target, success_rate?)`: runs `ping -c 5 <target>` over
/// the device's own SSH session and parses the received-packet count out
/// of the summary line, the same shape iputils prints on every SONiC
/// image. Defaults to requiring every probe to land.
pub struct VerifyPing {
    shell: Arc<dyn RemoteShell>,
}

impl VerifyPing {
    pub fn new(shell: Arc<dyn RemoteShell>) -> Self {
        Self { shell }
    }
}

#[async_trait]
impl<C: Clock + 'static> Executor<C> for VerifyPing {
    async fn execute(&self, _ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let start = Instant::now();
        let target = match required_str(&step.params, "target") {
            Ok(v) => v.to_string(),
            Err(e) => return reject(start, &devices, e),
        };
        let min_success_rate = optional_f64(&step.params, "success_rate").unwrap_or(1.0);
        let count = 5u32;
        let command = format!("ping -c {count} -W 1 {target}");
        let mut details = Vec::with_capacity(devices.len());
        for device in &devices {
            match self.shell.exec(device.profile(), &command, Duration::from_secs(15)).await {
                Ok(output) => {
                    let received = parse_ping_received(&output.stdout);
                    let rate = f64::from(received) / f64::from(count);
                    if rate + f64::EPSILON >= min_success_rate {
                        details.push(PerDeviceResult::passed(device.name()));
                    } else {
                        details.push(PerDeviceResult::failed(
                            device.name(),
                            format!("ping to {target}: {received}/{count} received"),
                        ));
                    }
                }
                Err(e) => details.push(PerDeviceResult::errored(device.name(), e.to_string())),
            }
        }
        rollup(start, details)
    }
}

fn parse_ping_received(stdout: &str) -> u32 {
    for line in stdout.lines() {
        if let Some(rest) = line.split(" packets transmitted, ").nth(1) {
            if let Some(received) = rest.split_whitespace().next() {
                return received.parse().unwrap_or(0);
            }
        }
    }
    0
}

/// `verify-bgp(neighbor?)`: prefers the live `vtysh -c "show bgp summary"`
/// reading over the state-DB snapshot when a shell is available, falling
/// back to the snapshot check `VerifyBgpSnapshot` performs if `neighbor`
/// is omitted.
pub struct VerifyBgp {
    shell: Arc<dyn RemoteShell>,
}

impl VerifyBgp {
    pub fn new(shell: Arc<dyn RemoteShell>) -> Self {
        Self { shell }
    }
}

#[async_trait]
impl<C: Clock + 'static> Executor<C> for VerifyBgp {
    async fn execute(&self, ctx: &ActionContext<C>, step: &Step, devices: Vec<Arc<Device>>) -> StepResult {
        let Some(neighbor) = optional_str(&step.params, "neighbor") else {
            return VerifyBgpSnapshot.execute(ctx, step, devices).await;
        };
        let start = Instant::now();
        let command = format!("vtysh -c 'show bgp neighbor {neighbor} json'");
        let mut details = Vec::with_capacity(devices.len());
        for device in &devices {
            match self.shell.exec(device.profile(), &command, Duration::from_secs(15)).await {
                Ok(output) if output.stdout.contains("\"Established\"") => details.push(PerDeviceResult::passed(device.name())),
                Ok(output) => details.push(PerDeviceResult::failed(device.name(), format!("neighbor {neighbor} not established: {}", output.stdout.trim()))),
                Err(e) => details.push(PerDeviceResult::errored(device.name(), e.to_string())),
            }
        }
        rollup(start, details)
    }
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
