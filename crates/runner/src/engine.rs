// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ScenarioEngine`: runs a dependency-ordered `Suite` scenario by
//! scenario, step by step, against a fixed set of connected devices.
//! Pause is only honored at a scenario boundary (never mid-step, so a
//! paused run always resumes at a clean scenario start); cancellation is
//! checked before every step and stops immediately, leaving the
//! in-flight scenario's remaining steps unrun.

use crate::error::RunnerError;
use crate::reporter::{ConsoleReporter, ProgressReporter, StateReporter};
use crate::state::StepState;
use ntn_actions::{ActionContext, Dispatcher};
use ntn_core::{Clock, ScenarioStatus, SuiteStatus};
use ntn_device::Device;
use ntn_scenario::{DeviceSelector, Scenario, Suite};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;

const SIGNAL_NONE: u8 = 0;
const SIGNAL_PAUSE: u8 = 1;
const SIGNAL_CANCEL: u8 = 2;

/// Shared handle a CLI's `pause`/`stop` command sets; the engine polls it
/// between scenarios (pause) and between steps (cancel).
#[derive(Clone, Default)]
pub struct RunControl {
    signal: Arc<AtomicU8>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_pause(&self) {
        self.signal.store(SIGNAL_PAUSE, Ordering::SeqCst);
    }

    pub fn request_cancel(&self) {
        self.signal.store(SIGNAL_CANCEL, Ordering::SeqCst);
    }

    fn pause_requested(&self) -> bool {
        self.signal.load(Ordering::SeqCst) == SIGNAL_PAUSE
    }

    fn cancel_requested(&self) -> bool {
        self.signal.load(Ordering::SeqCst) == SIGNAL_CANCEL
    }
}

pub struct ScenarioEngine<C: Clock> {
    dispatcher: Dispatcher<C>,
    ctx: ActionContext<C>,
    devices: HashMap<String, Arc<Device>>,
    extra_reporters: Vec<Box<dyn ProgressReporter>>,
}

impl<C: Clock + 'static> ScenarioEngine<C> {
    pub fn new(dispatcher: Dispatcher<C>, ctx: ActionContext<C>, devices: HashMap<String, Arc<Device>>) -> Self {
        Self { dispatcher, ctx, devices, extra_reporters: vec![Box::new(ConsoleReporter)] }
    }

    /// Runs `suite` against `reporter`'s current state. Any scenario whose
    /// persisted status is already terminal (`Passed`/`Failed`/`Error`/
    /// `Skipped`) is a completed scenario from a prior process — it is
    /// skipped with its recorded result left untouched, which is what
    /// makes resume safe: restarting never re-executes a finished
    /// scenario, and a scenario left `Running` by a crash is re-run from
    /// its first step since it never reached a terminal status.
    ///
    /// Dependency gating cascades from *any* non-`Passed` terminal status,
    /// not only a fresh `Failed`/`Error` this run: a scenario resumed as
    /// already-`Skipped`/`Failed`/`Error` from a prior process, and a
    /// scenario skipped here via `skip_if`, both mark their transitive
    /// dependents for skipping exactly like a fresh failure would.
    pub async fn run(&self, suite: &Suite, reporter: &StateReporter, control: &RunControl) -> Result<SuiteStatus, RunnerError> {
        let initial = reporter.snapshot();
        let completed: HashMap<String, ScenarioStatus> =
            initial.scenarios.iter().filter(|s| s.status.is_terminal()).map(|s| (s.name.clone(), s.status)).collect();

        let mut skip: HashMap<String, String> = HashMap::new();
        for (name, status) in &completed {
            if !status.is_passed() {
                mark_transitive_dependents(suite, name, &mut skip);
            }
        }

        for scenario in &suite.scenarios {
            if control.cancel_requested() {
                return self.finish(reporter, SuiteStatus::Aborted).await;
            }
            if control.pause_requested() || reporter.external_pause_requested() {
                return self.finish(reporter, SuiteStatus::Paused).await;
            }

            if completed.contains_key(&scenario.name) {
                continue;
            }
            if let Some(reason) = skip.get(&scenario.name).cloned() {
                reporter.finish_scenario(&scenario.name, ScenarioStatus::Skipped, Some(reason), self.ctx.now_ms())?;
                continue;
            }
            if let Some(reason) = scenario_skip_reason_by_env(scenario) {
                reporter.finish_scenario(&scenario.name, ScenarioStatus::Skipped, Some(reason), self.ctx.now_ms())?;
                mark_transitive_dependents(suite, &scenario.name, &mut skip);
                continue;
            }

            let status = self.run_scenario(scenario, reporter, control).await?;
            if !status.is_passed() {
                mark_transitive_dependents(suite, &scenario.name, &mut skip);
            }
        }

        let statuses: Vec<ScenarioStatus> = suite.scenarios.iter().map(|s| reporter.snapshot().scenarios.iter().find(|st| st.name == s.name).map(|st| st.status).unwrap_or(ScenarioStatus::Pending)).collect();
        self.finish(reporter, SuiteStatus::finalize(statuses)).await
    }

    async fn finish(&self, reporter: &StateReporter, status: SuiteStatus) -> Result<SuiteStatus, RunnerError> {
        reporter.finish_suite(status, self.ctx.now_ms())?;
        for r in &self.extra_reporters {
            r.suite_finished(&reporter.snapshot());
        }
        Ok(status)
    }

    async fn run_scenario(&self, scenario: &Scenario, reporter: &StateReporter, control: &RunControl) -> Result<ScenarioStatus, RunnerError> {
        reporter.begin_scenario(&scenario.name, self.ctx.now_ms())?;
        for r in &self.extra_reporters {
            r.scenario_started(&scenario.name);
        }

        let mut rollup = ntn_core::StepStatus::Passed;
        for (index, step) in scenario.steps.iter().enumerate() {
            if control.cancel_requested() {
                break;
            }

            reporter.begin_step(&scenario.name, &step.name, index, self.ctx.now_ms())?;
            let start = Instant::now();
            let step_state = match self.resolve_devices(step) {
                Ok(devices) => {
                    let result = self.dispatcher.dispatch(&self.ctx, step, devices).await?;
                    StepState {
                        name: step.name.clone(),
                        action: step.action.clone(),
                        status: result.status,
                        duration_ms: start.elapsed().as_millis() as u64,
                        message: result.message.clone(),
                        details: result.details.clone(),
                    }
                }
                Err(e) => StepState {
                    name: step.name.clone(),
                    action: step.action.clone(),
                    status: ntn_core::StepStatus::Error,
                    duration_ms: start.elapsed().as_millis() as u64,
                    message: Some(e.to_string()),
                    details: Vec::new(),
                },
            };
            reporter.record_step(&scenario.name, step_state.clone(), self.ctx.now_ms())?;
            for r in &self.extra_reporters {
                r.step_finished(&scenario.name, &step_state);
            }

            rollup = ntn_core::StepStatus::rollup([rollup, step_state.status]);
            if step_state.status.is_terminal_failure() {
                break;
            }
        }

        let status = ScenarioStatus::from_step_rollup(rollup);
        reporter.finish_scenario(&scenario.name, status, None, self.ctx.now_ms())?;
        for r in &self.extra_reporters {
            r.scenario_finished(&scenario.name, status);
        }
        Ok(status)
    }

    fn resolve_devices(&self, step: &ntn_scenario::Step) -> Result<Vec<Arc<Device>>, RunnerError> {
        let Some(selector) = &step.devices else { return Ok(Vec::new()) };
        let known: Vec<String> = self.devices.keys().cloned().collect();
        let names = match selector {
            DeviceSelector::All(_) => known,
            other => other.resolve(&known),
        };
        names
            .into_iter()
            .map(|name| self.devices.get(&name).cloned().ok_or_else(|| RunnerError::Action(ntn_actions::ActionError::UnknownDevice(name))))
            .collect()
    }
}

/// Walks `requires` edges transitively: any scenario (directly or through
/// a chain) that requires `not_passed` is skipped rather than run against
/// a fabric left in a known-bad state. The reason recorded for each
/// dependent names the nearest `requires` edge that pulled it in, so a
/// scenario several hops downstream still gets an actionable message
/// rather than the original root cause's name.
fn mark_transitive_dependents(suite: &Suite, not_passed: &str, skip: &mut HashMap<String, String>) {
    let mut frontier = vec![not_passed.to_string()];
    while let Some(name) = frontier.pop() {
        for scenario in &suite.scenarios {
            if scenario.requires.iter().any(|r| r == &name) {
                if let std::collections::hash_map::Entry::Vacant(entry) = skip.entry(scenario.name.clone()) {
                    entry.insert(format!("dependency `{name}` did not pass"));
                    frontier.push(scenario.name.clone());
                }
            }
        }
    }
}

/// `skip_if` names an environment variable; the scenario is skipped when
/// it is set to anything other than empty, `0`, or `false`. Returns the
/// skip reason to persist rather than a bare bool, since `skip_if` skips
/// must cascade to dependents exactly like a failed/errored scenario.
fn scenario_skip_reason_by_env(scenario: &Scenario) -> Option<String> {
    let var = scenario.skip_if.as_ref()?;
    match std::env::var(var) {
        Ok(value) if !matches!(value.as_str(), "" | "0" | "false") => Some(format!("skip_if `{var}` is set")),
        _ => None,
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
