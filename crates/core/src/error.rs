// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured error taxonomy shared across the engine.
//!
//! Each crate boundary (store, device, actions, runner) defines its own
//! narrow error enum and converts into these shared variants only where a
//! caller genuinely needs to match across crates (severity rollup, exit
//! code mapping) — small, local error types over one god-enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A failed precondition or schema check. Caller fault; never retried.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("validation failed: {}", .0.join("; "))]
pub struct ValidationError(pub Vec<String>);

impl ValidationError {
    pub fn single(msg: impl Into<String>) -> Self {
        Self(vec![msg.into()])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn merge(&mut self, other: ValidationError) {
        self.0.extend(other.0);
    }
}

/// Transport, SSH, deploy, or connect failure. Surfaces as process exit code 2.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("infra error during {op} on {device}: {cause}")]
pub struct InfraError {
    pub op: String,
    pub device: String,
    pub cause: String,
}

impl InfraError {
    pub fn new(op: impl Into<String>, device: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self { op: op.into(), device: device.into(), cause: cause.to_string() }
    }
}

/// Executor-level failure, aggregating the per-device results of one step.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("step {step} (action {action}) failed: {cause}")]
pub struct StepError {
    pub step: String,
    pub action: String,
    pub cause: String,
}

/// Not a failure: the engine observed a pause signal and is persisting
/// `paused` state before a clean exit.
#[derive(Debug, Clone, thiserror::Error)]
#[error("suite paused after {completed} completed scenario(s)")]
pub struct PauseError {
    pub completed: usize,
}

/// The device's `NEWTRON_LOCK|<device>` key is already held by another holder.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("device {0} is locked")]
pub struct DeviceLocked(pub String);

/// Release was attempted by a holder that does not match the current token.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("lock on {device} held by {actual}, not {expected}")]
pub struct HolderMismatch {
    pub device: String,
    pub expected: String,
    pub actual: String,
}

/// A mutation was attempted on a device without first acquiring its lock.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("device {0} is not locked by this process")]
pub struct NotLocked(pub String);

/// A verification action's poll deadline elapsed before `expect` was satisfied.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("convergence timeout on {device} after {elapsed_ms}ms: {last_observed}")]
pub struct ConvergenceTimeout {
    pub device: String,
    pub elapsed_ms: u64,
    pub last_observed: String,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
