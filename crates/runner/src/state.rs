// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `RunState`: the single persisted document describing a suite run —
//! one writer (the engine), many tolerant readers (`ntn status`, a
//! `--monitor` poll loop). Every write replaces the whole file via a
//! same-directory temp file + rename, so a reader never observes a
//! half-written document; a reader that still races the rename treats a
//! transiently missing or unparseable file as "not ready yet", not an
//! error.

use crate::error::RunnerError;
use ntn_actions::PerDeviceResult;
use ntn_core::{ScenarioStatus, StepStatus, SuiteStatus};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepState {
    pub name: String,
    pub action: String,
    pub status: StepStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    pub details: Vec<PerDeviceResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioState {
    pub name: String,
    pub description: Option<String>,
    pub status: ScenarioStatus,
    pub started_at_ms: Option<u64>,
    pub duration_ms: u64,
    /// Name of the step currently dispatching, `None` once the scenario
    /// is terminal or before its first step has started.
    pub current_step: Option<String>,
    pub current_step_index: Option<usize>,
    pub total_steps: usize,
    /// Populated when `status == Skipped`: why, e.g. a failed/skipped
    /// `requires` dependency or a truthy `skip_if`.
    pub skip_reason: Option<String>,
    pub steps: Vec<StepState>,
}

impl ScenarioState {
    pub fn pending(scenario: &ntn_scenario::Scenario) -> Self {
        Self {
            name: scenario.name.clone(),
            description: scenario.description.clone(),
            status: ScenarioStatus::Pending,
            started_at_ms: None,
            duration_ms: 0,
            current_step: None,
            current_step_index: None,
            total_steps: scenario.steps.len(),
            skip_reason: None,
            steps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub suite: String,
    pub suite_dir: PathBuf,
    pub topology: Option<String>,
    pub platform: Option<String>,
    pub status: SuiteStatus,
    pub pid: u32,
    pub started_at_ms: u64,
    pub updated_at_ms: u64,
    pub finished_at_ms: Option<u64>,
    pub scenarios: Vec<ScenarioState>,
}

impl RunState {
    pub fn new(
        suite: impl Into<String>,
        suite_dir: impl Into<PathBuf>,
        topology: Option<String>,
        platform: Option<String>,
        pid: u32,
        now_ms: u64,
        scenarios: &[ntn_scenario::Scenario],
    ) -> Self {
        Self {
            suite: suite.into(),
            suite_dir: suite_dir.into(),
            topology,
            platform,
            status: SuiteStatus::Running,
            pid,
            started_at_ms: now_ms,
            updated_at_ms: now_ms,
            finished_at_ms: None,
            scenarios: scenarios.iter().map(ScenarioState::pending).collect(),
        }
    }

    pub fn current_scenario(&self) -> Option<&ScenarioState> {
        self.scenarios.iter().find(|s| !s.status.is_terminal())
    }

    /// Save as `<path>.tmp` then rename over `path`, so concurrent readers
    /// only ever see a complete prior version or a complete new one.
    #[allow(clippy::expect_used)]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RunnerError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| RunnerError::Io { path: parent.to_path_buf(), source })?;
        }
        let tmp = path.with_extension("json.tmp");
        let text = serde_json::to_vec_pretty(self).expect("RunState serialization cannot fail");
        std::fs::write(&tmp, &text).map_err(|source| RunnerError::Io { path: tmp.clone(), source })?;
        std::fs::rename(&tmp, path).map_err(|source| RunnerError::Io { path: path.to_path_buf(), source })?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RunnerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RunnerError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text).map_err(|source| RunnerError::StateCorrupt { path: path.to_path_buf(), source })
    }

    /// Retry a handful of times on a missing or unparseable file before
    /// surfacing the error — covers the narrow window between the
    /// temp-file write and the rename a poll loop might race.
    #[allow(clippy::expect_used)]
    pub fn load_tolerant(path: impl AsRef<Path>, attempts: u32, delay: Duration) -> Result<Self, RunnerError> {
        let path = path.as_ref();
        let mut last_err = None;
        for attempt in 0..attempts.max(1) {
            match Self::load(path) {
                Ok(state) => return Ok(state),
                Err(e) => {
                    last_err = Some(e);
                    if attempt + 1 < attempts {
                        std::thread::sleep(delay);
                    }
                }
            }
        }
        Err(last_err.expect("attempts.max(1) guarantees at least one iteration"))
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
