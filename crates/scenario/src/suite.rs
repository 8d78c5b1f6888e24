// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Suite`: a directory of scenario YAML files loaded together, ordered
//! by their `requires` edges at load time so the runner never has to
//! resolve dependencies mid-run.

use crate::depgraph;
use crate::error::ScenarioError;
use crate::scenario::Scenario;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Suite {
    pub name: String,
    pub dir: PathBuf,
    /// Scenarios in dependency-resolved execution order.
    pub scenarios: Vec<Scenario>,
}

impl Suite {
    /// Load every `*.yaml`/`*.yml` file directly under `dir` (no
    /// recursion — a suite is a flat directory of scenario files),
    /// validate each against `known_devices`, then topologically sort
    /// by `requires`.
    pub fn load(name: impl Into<String>, dir: impl AsRef<Path>, known_devices: &[String]) -> Result<Self, ScenarioError> {
        let dir = dir.as_ref().to_path_buf();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
            .map_err(|source| ScenarioError::Io { path: dir.clone(), source })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| matches!(p.extension().and_then(|e| e.to_str()), Some("yaml") | Some("yml")))
            .collect();
        paths.sort();

        let mut scenarios = Vec::with_capacity(paths.len());
        let mut seen_names = std::collections::HashSet::new();
        for path in paths.drain(..) {
            let text = std::fs::read_to_string(&path).map_err(|source| ScenarioError::Io { path: path.clone(), source })?;
            let scenario = Scenario::from_yaml(&text, known_devices)?;
            if !seen_names.insert(scenario.name.clone()) {
                return Err(ScenarioError::DuplicateScenario(scenario.name));
            }
            scenarios.push(scenario);
        }

        let order = depgraph::topological_order(&scenarios)?;
        let sorted = order.into_iter().map(|i| scenarios[i].clone()).collect();

        Ok(Self { name: name.into(), dir, scenarios: sorted })
    }

    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
