// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch-time errors: a step whose shape is fine but whose
//! per-action typed param parse fails never reaches a device at all.

use ntn_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown action {0:?}")]
    UnknownAction(String),

    #[error("no device named {0:?} in this suite's topology")]
    UnknownDevice(String),
}
