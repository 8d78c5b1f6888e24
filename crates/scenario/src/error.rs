// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parse-time error taxonomy: everything here is a caller/author fault
//! discovered before a single device is ever touched.

use ntn_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("malformed scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown action {0:?}")]
    UnknownAction(String),

    #[error("duplicate scenario name {0:?} in suite")]
    DuplicateScenario(String),

    #[error("scenario {scenario:?} requires unknown scenario {requires:?}")]
    MissingDependency { scenario: String, requires: String },

    #[error("dependency cycle among scenarios: {0}")]
    Cycle(String),

    #[error("io error reading {path:?}: {source}")]
    Io { path: std::path::PathBuf, #[source] source: std::io::Error },
}
