// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status enums and the severity rollup used to derive a step's, scenario's,
//! and suite's overall status from its constituent parts.

use serde::{Deserialize, Serialize};

/// Outcome of a single step on a single device, or of a step as a whole once
/// its per-device results are rolled up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Passed,
    Skipped,
    Failed,
    Error,
}

crate::simple_display! {
    StepStatus {
        Passed => "passed",
        Skipped => "skipped",
        Failed => "failed",
        Error => "error",
    }
}

impl StepStatus {
    /// Combine statuses across devices (a step) or steps (a scenario),
    /// keeping the most severe. `StepStatus` derives `Ord` in declaration
    /// order (`passed < skipped < failed < error`).
    pub fn rollup(statuses: impl IntoIterator<Item = StepStatus>) -> StepStatus {
        statuses.into_iter().fold(StepStatus::Passed, std::cmp::Ord::max)
    }

    pub fn is_terminal_failure(self) -> bool {
        matches!(self, StepStatus::Failed | StepStatus::Error)
    }
}

/// Status of one scenario within a suite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Pending,
    Running,
    Passed,
    Failed,
    Error,
    Skipped,
}

crate::simple_display! {
    ScenarioStatus {
        Pending => "pending",
        Running => "running",
        Passed => "passed",
        Failed => "failed",
        Error => "error",
        Skipped => "skipped",
    }
}

impl ScenarioStatus {
    /// A scenario's terminal status counts as "passed" for dependency gating.
    pub fn is_passed(self) -> bool {
        matches!(self, ScenarioStatus::Passed)
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, ScenarioStatus::Pending | ScenarioStatus::Running)
    }

    pub fn from_step_rollup(rollup: StepStatus) -> ScenarioStatus {
        match rollup {
            StepStatus::Passed => ScenarioStatus::Passed,
            StepStatus::Skipped => ScenarioStatus::Skipped,
            StepStatus::Failed => ScenarioStatus::Failed,
            StepStatus::Error => ScenarioStatus::Error,
        }
    }
}

/// Status of the suite run as a whole, persisted at `RunState.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteStatus {
    Running,
    Pausing,
    Paused,
    Complete,
    Aborted,
    Failed,
}

crate::simple_display! {
    SuiteStatus {
        Running => "running",
        Pausing => "pausing",
        Paused => "paused",
        Complete => "complete",
        Aborted => "aborted",
        Failed => "failed",
    }
}

impl SuiteStatus {
    /// Suite final status: `paused` if interrupted, `failed` if any
    /// scenario failed or errored, else `complete`.
    pub fn finalize(scenario_statuses: impl IntoIterator<Item = ScenarioStatus>) -> SuiteStatus {
        let mut any_failed = false;
        for s in scenario_statuses {
            if matches!(s, ScenarioStatus::Failed | ScenarioStatus::Error) {
                any_failed = true;
            }
        }
        if any_failed {
            SuiteStatus::Failed
        } else {
            SuiteStatus::Complete
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, SuiteStatus::Running | SuiteStatus::Pausing)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
