// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised above the action-dispatch layer: suite/topology loading,
//! run-state persistence, the PID lock, and pause/cancel signaling.

use ntn_core::{InfraError, PauseError, StepError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error(transparent)]
    Step(#[from] StepError),

    #[error(transparent)]
    Pause(#[from] PauseError),

    #[error("scenario error: {0}")]
    Scenario(#[from] ntn_scenario::ScenarioError),

    #[error("action error: {0}")]
    Action(#[from] ntn_actions::ActionError),

    #[error("device error: {0}")]
    Device(#[from] ntn_device::DeviceError),

    #[error("store error: {0}")]
    Store(#[from] ntn_store::StoreError),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error at {path}: {source}")]
    Io { path: std::path::PathBuf, source: std::io::Error },

    #[error("state file corrupt at {path}: {source}")]
    StateCorrupt { path: std::path::PathBuf, source: serde_json::Error },

    #[error("a runner is already active for suite {suite:?} (pid {pid})")]
    AlreadyRunning { suite: String, pid: u32 },

    #[error("no active run found for suite {0:?}")]
    NoActiveRun(String),
}
