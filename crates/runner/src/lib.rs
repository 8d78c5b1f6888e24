// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ntn-runner: the scenario runner and run-state machine.
//!
//! Ties the lower layers together into the one thing a CLI needs: given
//! a suite name, load its scenarios and the lab topology, connect every
//! device the suite touches, run (or resume) it against a persisted
//! `RunState`, and report progress as it goes. Everything below this
//! crate (`ntn-scenario`, `ntn-actions`, `ntn-device`, `ntn-store`) stays
//! ignorant of process-level concerns like the PID lock or `newtron.toml`.

pub mod config;
pub mod devices;
pub mod engine;
pub mod error;
pub mod pid_lock;
pub mod reporter;
pub mod state;
pub mod topology;

pub use config::RunnerConfig;
pub use devices::connect_all;
pub use engine::{RunControl, ScenarioEngine};
pub use error::RunnerError;
pub use pid_lock::PidLock;
pub use reporter::{ConsoleReporter, ProgressReporter, StateReporter};
pub use state::{RunState, ScenarioState, StepState};
pub use topology::Topology;

use ntn_actions::Dispatcher;
use ntn_core::{Clock, HolderId, SuiteStatus, SystemClock};
use ntn_device::shell::Ssh2RemoteShell;
use ntn_scenario::Suite;
use ntn_store::tunnel::TunnelPool;
use std::sync::Arc;

/// Everything `start`/`status`/`list` need for one suite, assembled once
/// from a `RunnerConfig` and a `Topology`. This is the object a CLI binds
/// to its subcommands; nothing in it is specific to any one command.
pub struct Runner {
    config: RunnerConfig,
    topology: Topology,
}

impl Runner {
    pub fn new(config: RunnerConfig, topology: Topology) -> Self {
        Self { config, topology }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Loads and topologically sorts every scenario file under
    /// `<suites_base>/<suite>/`, validating them against the known device
    /// set from the topology.
    pub fn load_suite(&self, suite: &str) -> Result<Suite, RunnerError> {
        let known = self.topology.device_names();
        Ok(Suite::load(suite, self.config.suite_dir(suite), &known)?)
    }

    /// Starts (or resumes, if `state.json` already exists and is not
    /// terminal) a run of `suite`. Acquires the suite's PID lock for the
    /// lifetime of the run — only one runner may drive a suite at a
    /// time — connects every device the suite's topology names, and
    /// drives the `ScenarioEngine` to completion, pause, or abort.
    pub async fn start(&self, suite: &str, control: &RunControl) -> Result<SuiteStatus, RunnerError> {
        let _pid_lock = PidLock::acquire(self.config.lock_path(suite), suite)?;
        let parsed = self.load_suite(suite)?;

        let state_path = self.config.state_path(suite);
        let suite_dir = self.config.suite_dir(suite);
        let topology = parsed.scenarios.iter().find_map(|s| s.topology.clone());
        let platform = parsed.scenarios.iter().find_map(|s| s.platform.clone());
        let clock = SystemClock;
        let initial = match RunState::load(&state_path) {
            Ok(existing) if existing.status.is_live() || existing.scenarios.iter().any(|s| !s.status.is_terminal()) => existing,
            Ok(_) | Err(_) => {
                RunState::new(suite, suite_dir, topology, platform, std::process::id(), clock.epoch_ms(), &parsed.scenarios)
            }
        };
        let reporter = StateReporter::new(&state_path, initial);

        let tunnels = TunnelPool::new();
        let known = self.topology.device_names();
        let profiles: Vec<_> = parsed
            .scenarios
            .iter()
            .flat_map(|s| &s.steps)
            .filter_map(|step| step.devices.as_ref())
            .flat_map(|sel| sel.resolve(&known))
            .filter_map(|name| self.topology.profile(&name).cloned())
            .collect();
        let devices = connect_all(&dedup_profiles(profiles), &tunnels).await?;

        let dispatcher: Dispatcher<SystemClock> = Dispatcher::new(Arc::new(Ssh2RemoteShell));
        let holder = HolderId::new(hostname(), std::process::id());
        let ctx = ntn_actions::ActionContext::new(clock, holder, self.config.lock_ttl(), self.config.max_parallel_devices);
        let engine = ScenarioEngine::new(dispatcher, ctx, devices);

        engine.run(&parsed, &reporter, control).await
    }

    /// Reads the persisted `RunState` for `suite` without taking the PID
    /// lock, the way `status`/`--monitor` must be able to observe an
    /// actively-running suite from a second process.
    pub fn status(&self, suite: &str) -> Result<RunState, RunnerError> {
        let path = self.config.state_path(suite);
        RunState::load_tolerant(&path, 3, std::time::Duration::from_millis(20)).map_err(|_| RunnerError::NoActiveRun(suite.to_string()))
    }

    /// Requests that a live run transition to `pausing`; honored by the
    /// engine at the next scenario boundary, never mid-scenario.
    pub fn request_pause(&self, suite: &str) -> Result<(), RunnerError> {
        let path = self.config.state_path(suite);
        let mut state = RunState::load(&path)?;
        if !state.status.is_live() {
            return Err(RunnerError::NoActiveRun(suite.to_string()));
        }
        state.status = SuiteStatus::Pausing;
        state.save(&path)
    }

    pub fn list_suites(&self) -> Result<Vec<String>, RunnerError> {
        let mut names = Vec::new();
        let entries = std::fs::read_dir(&self.config.suites_base)
            .map_err(|source| RunnerError::Io { path: self.config.suites_base.clone(), source })?;
        for entry in entries {
            let entry = entry.map_err(|source| RunnerError::Io { path: self.config.suites_base.clone(), source })?;
            if entry.path().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn dedup_profiles(profiles: Vec<ntn_core::DeviceProfile>) -> Vec<ntn_core::DeviceProfile> {
    let mut seen = std::collections::HashSet::new();
    profiles.into_iter().filter(|p| seen.insert(p.name.clone())).collect()
}

fn hostname() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string())
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn dedup_profiles_keeps_first_occurrence() {
        let a = ntn_core::test_support::test_device_profile("leaf1");
        let b = ntn_core::test_support::test_device_profile("leaf1");
        let c = ntn_core::test_support::test_device_profile("leaf2");
        let deduped = dedup_profiles(vec![a, b, c]);
        assert_eq!(deduped.len(), 2);
    }
}
