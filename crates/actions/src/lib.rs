// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action executors: one `Executor<C>` per entry in the closed catalogue
//! declared by `ntn_scenario::schema::ACTIONS`, fanned out across a
//! step's resolved devices by `dispatch::run_per_device` and collected
//! into the registry `catalogue::build_registry` hands the scenario
//! runner.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod actions;
pub mod catalogue;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod params;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use dispatch::Dispatcher;
pub use error::ActionError;
pub use executor::{ActionContext, Executor, PerDeviceResult, StepResult};
