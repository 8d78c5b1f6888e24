// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, so `main()` is the only place that actually terminates the
//! process — everything above it (including the PID lock's `Drop`) still
//! gets to run its cleanup on the way out.
//!
//! Exit codes: `0` success, `1` generic failure, `2` infrastructure
//! error (deploy, connect, SSH, lock contention).

use ntn_runner::RunnerError;
use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(1, message)
    }

    pub fn infra(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

/// Maps the runner's error taxonomy onto the two failure exit codes:
/// transport/connect/lock-contention errors are infrastructure problems
/// (exit `2`), everything else is a generic failure (exit `1`).
impl From<RunnerError> for ExitError {
    fn from(e: RunnerError) -> Self {
        match &e {
            RunnerError::Infra(_) | RunnerError::Store(_) | RunnerError::Device(_) | RunnerError::AlreadyRunning { .. } => {
                Self::infra(e.to_string())
            }
            _ => Self::generic(e.to_string()),
        }
    }
}
