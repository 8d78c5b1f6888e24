// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reporter chain: the engine notifies a list of `ProgressReporter`s as a
//! run proceeds. `StateReporter` is the one reporter every run installs —
//! it mutates and persists `RunState` after each event — while a CLI
//! attaches a console reporter alongside it for live output, the same
//! "trait object, fan out to every entry" shape `ntn-device::RemoteShell`
//! and `ntn-actions::Executor` already use at their seams.

use crate::error::RunnerError;
use crate::state::{RunState, StepState};
use ntn_core::ScenarioStatus;
use parking_lot::Mutex;
use std::path::PathBuf;

pub trait ProgressReporter: Send + Sync {
    fn scenario_started(&self, _name: &str) {}
    fn scenario_finished(&self, _name: &str, _status: ScenarioStatus) {}
    fn step_finished(&self, _scenario: &str, _step: &StepState) {}
    fn suite_finished(&self, _state: &RunState) {}
}

/// Logs progress at `info`, matching the structured-field convention
/// (`device=`, `action=`, `scenario=`) used across the action executors.
pub struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn scenario_started(&self, name: &str) {
        tracing::info!(scenario = name, "scenario started");
    }

    fn scenario_finished(&self, name: &str, status: ScenarioStatus) {
        tracing::info!(scenario = name, %status, "scenario finished");
    }

    fn step_finished(&self, scenario: &str, step: &StepState) {
        tracing::info!(scenario, step = %step.name, action = %step.action, %step.status, step.duration_ms, "step finished");
    }

    fn suite_finished(&self, state: &RunState) {
        tracing::info!(suite = %state.suite, %state.status, "suite finished");
    }
}

/// Persists `RunState` to `path` after every event, write-replace, so a
/// concurrent reader never observes a torn document.
pub struct StateReporter {
    path: PathBuf,
    state: Mutex<RunState>,
}

impl StateReporter {
    pub fn new(path: impl Into<PathBuf>, state: RunState) -> Self {
        Self { path: path.into(), state: Mutex::new(state) }
    }

    pub fn snapshot(&self) -> RunState {
        self.state.lock().clone()
    }

    /// Polls the persisted file for a `pausing` status written by a
    /// separate `ntn pause` process. The engine calls this at every
    /// scenario boundary rather than relying solely on the in-process
    /// `RunControl`, since `pause` runs as its own process and has no
    /// other way to reach a live `start`.
    pub fn external_pause_requested(&self) -> bool {
        match RunState::load(&self.path) {
            Ok(on_disk) => on_disk.status == ntn_core::SuiteStatus::Pausing,
            Err(_) => false,
        }
    }

    fn persist(&self, state: &RunState) -> Result<(), RunnerError> {
        state.save(&self.path)
    }

    pub fn begin_scenario(&self, name: &str, now_ms: u64) -> Result<(), RunnerError> {
        let mut state = self.state.lock();
        if let Some(scenario) = state.scenarios.iter_mut().find(|s| s.name == name) {
            scenario.status = ScenarioStatus::Running;
            scenario.started_at_ms = Some(now_ms);
        }
        state.updated_at_ms = now_ms;
        self.persist(&state)
    }

    /// Records which step a scenario is currently dispatching, so
    /// `ntn status --monitor` can show progress mid-scenario rather than
    /// only between the incrementally-appended `steps` entries.
    pub fn begin_step(&self, scenario: &str, step_name: &str, step_index: usize, now_ms: u64) -> Result<(), RunnerError> {
        let mut state = self.state.lock();
        if let Some(s) = state.scenarios.iter_mut().find(|s| s.name == scenario) {
            s.current_step = Some(step_name.to_string());
            s.current_step_index = Some(step_index);
        }
        state.updated_at_ms = now_ms;
        self.persist(&state)
    }

    pub fn record_step(&self, scenario: &str, step: StepState, now_ms: u64) -> Result<(), RunnerError> {
        let mut state = self.state.lock();
        if let Some(s) = state.scenarios.iter_mut().find(|s| s.name == scenario) {
            s.steps.push(step);
            s.current_step = None;
            s.current_step_index = None;
        }
        state.updated_at_ms = now_ms;
        self.persist(&state)
    }

    /// `reason` is only meaningful for `ScenarioStatus::Skipped` (a
    /// dependency that didn't pass, or a truthy `skip_if`); every other
    /// status clears it.
    pub fn finish_scenario(&self, name: &str, status: ScenarioStatus, reason: Option<String>, now_ms: u64) -> Result<(), RunnerError> {
        let mut state = self.state.lock();
        if let Some(scenario) = state.scenarios.iter_mut().find(|s| s.name == name) {
            scenario.status = status;
            scenario.skip_reason = reason;
            scenario.duration_ms = scenario.started_at_ms.map(|started| now_ms.saturating_sub(started)).unwrap_or(0);
            scenario.current_step = None;
            scenario.current_step_index = None;
        }
        state.updated_at_ms = now_ms;
        self.persist(&state)
    }

    pub fn finish_suite(&self, status: ntn_core::SuiteStatus, now_ms: u64) -> Result<(), RunnerError> {
        let mut state = self.state.lock();
        state.status = status;
        state.updated_at_ms = now_ms;
        state.finished_at_ms = Some(now_ms);
        self.persist(&state)
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
