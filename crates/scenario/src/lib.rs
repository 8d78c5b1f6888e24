// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario/step YAML parsing, the closed action schema registry, and
//! dependency ordering via a schema-as-data catalogue and dependency resolution.
//!
//! This crate has no I/O beyond reading scenario files off disk: it knows
//! the shape of a suite and the order to run it in, never how to execute
//! a step against a device.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod depgraph;
pub mod error;
pub mod param;
pub mod schema;
pub mod scenario;
pub mod step;
pub mod suite;

pub use error::ScenarioError;
pub use param::{ParamMap, ParamValue};
pub use schema::{ActionSpec, Cardinality, ParamSpec, ParamType, ACTIONS};
pub use scenario::Scenario;
pub use step::{DeviceSelector, Expect, Step};
pub use suite::Suite;
