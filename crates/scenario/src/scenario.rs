// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Scenario`: a named, ordered list of steps with optional dependencies
//! Immutable once parsed — nothing downstream mutates a `Scenario`,
//! it only reads from one.

use crate::error::ScenarioError;
use crate::step::Step;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topology: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub skip_if: Option<String>,
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse one scenario document from YAML and validate every step
    /// against the closed catalogue. `known_devices` resolves each step's
    /// `devices` selector to a count for the cardinality check; a step
    /// without an explicit `devices` field is treated as cardinality-zero
    /// (only valid for `Cardinality::None` actions).
    pub fn from_yaml(yaml: &str, known_devices: &[String]) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_yaml::from_str(yaml)?;
        scenario.validate(known_devices)?;
        Ok(scenario)
    }

    pub fn validate(&self, known_devices: &[String]) -> Result<(), ScenarioError> {
        let mut errors = Vec::new();
        for step in &self.steps {
            let count = step.devices.as_ref().map(|sel| sel.resolve(known_devices).len()).unwrap_or(0);
            match step.validate(count) {
                Ok(()) => {}
                Err(ScenarioError::Validation(v)) => errors.extend(v.0),
                Err(other) => return Err(other),
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScenarioError::Validation(ntn_core::ValidationError(errors)))
        }
    }

    /// Every device name referenced by any step, in first-appearance order.
    pub fn referenced_devices(&self, known_devices: &[String]) -> Vec<String> {
        let mut seen = indexmap::IndexSet::new();
        for step in &self.steps {
            if let Some(sel) = &step.devices {
                for d in sel.resolve(known_devices) {
                    seen.insert(d);
                }
            }
        }
        seen.into_iter().collect()
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
