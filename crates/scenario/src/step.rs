// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Step`: a single parameterized unit of work dispatched to one or more
//! devices. Parsing a `Step` validates its shape against the
//! closed action catalogue but does not resolve device names against a
//! topology — that happens once, at scenario-load time, against the full
//! device set (see `scenario.rs`).

use crate::error::ScenarioError;
use crate::param::{ParamMap, ParamValue};
use crate::schema::{self, ParamSpec, ParamType};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `devices:` as written in YAML — a scalar, a list, or the literal `all`.
/// Resolved against a topology's device set at scenario-load time via
/// [`DeviceSelector::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceSelector {
    All(AllMarker),
    Many(Vec<String>),
    One(String),
}

/// Matches only the YAML scalar `all`, distinguishing it from a device
/// literally named `all` (which would arrive as `DeviceSelector::One`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllMarker;

impl Serialize for AllMarker {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("all")
    }
}

impl<'de> Deserialize<'de> for AllMarker {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == "all" {
            Ok(AllMarker)
        } else {
            Err(serde::de::Error::custom("not the `all` sentinel"))
        }
    }
}

impl DeviceSelector {
    /// Resolve against the full device name set known to the suite.
    /// `devices: all` expands to every known device, in `known` order.
    pub fn resolve(&self, known: &[String]) -> Vec<String> {
        match self {
            DeviceSelector::All(_) => known.to_vec(),
            DeviceSelector::Many(names) => names.clone(),
            DeviceSelector::One(name) => vec![name.clone()],
        }
    }
}

/// A per-action assertion bundle attached to a step (e.g. `state:
/// Established`, `success_rate: 0.8`, `contains: "foo"`). Kept as an open
/// map like `params` rather than a fixed struct, since each verification
/// action interprets its own subset of keys.
pub type Expect = ParamMap;

/// One step of a scenario. `action` is a symbol from the closed catalogue
/// in `schema::ACTIONS`; `devices` is optional because utility actions
/// (`wait`, `host-exec`) ignore it entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    pub action: String,
    #[serde(default)]
    pub devices: Option<DeviceSelector>,
    /// Parameters are flattened directly into the step body in YAML
    /// (`vlan_id: 500` alongside `name`/`action`), not nested under a
    /// `params:` key — matches the scenario file format.
    #[serde(flatten)]
    pub params: ParamMap,
    #[serde(default)]
    pub expect: Expect,
    #[serde(default, rename = "timeout")]
    pub timeout_secs: Option<u64>,
}

impl Step {
    /// Look up this step's declared shape in the closed catalogue,
    /// checking device cardinality and required/optional params against
    /// it. Does not resolve device names (that needs the full topology);
    /// `device_count` is the number of names the selector would produce
    /// once resolved, or `0` for a selector-less step.
    pub fn validate(&self, device_count: usize) -> Result<(), ScenarioError> {
        let spec = schema::lookup(&self.action).ok_or_else(|| ScenarioError::UnknownAction(self.action.clone()))?;

        if !spec.cardinality.accepts(device_count) {
            return Err(ScenarioError::Validation(ntn_core::ValidationError::single(format!(
                "step {:?}: action {:?} requires {:?} device(s), got {}",
                self.name, self.action, spec.cardinality, device_count
            ))));
        }

        let mut errors = Vec::new();
        for required in spec.required {
            match self.params.get(required.name) {
                None => errors.push(format!("step {:?}: missing required param {:?}", self.name, required.name)),
                Some(value) => {
                    if let Err(msg) = check_type(required, value) {
                        errors.push(format!("step {:?}: {msg}", self.name));
                    }
                }
            }
        }
        for (key, value) in &self.params {
            let known = spec.required.iter().chain(spec.optional).find(|p| p.name == key.as_str());
            match known {
                Some(pspec) => {
                    if let Err(msg) = check_type(pspec, value) {
                        errors.push(format!("step {:?}: {msg}", self.name));
                    }
                }
                None => errors.push(format!(
                    "step {:?}: action {:?} does not accept param {:?}",
                    self.name, self.action, key
                )),
            }
        }
        if !errors.is_empty() {
            return Err(ScenarioError::Validation(ntn_core::ValidationError(errors)));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            Some(secs) => Duration::from_secs(secs),
            None => schema::lookup(&self.action).map(|s| s.default_timeout).unwrap_or(Duration::from_secs(30)),
        }
    }
}

fn check_type(spec: &ParamSpec, value: &ParamValue) -> Result<(), String> {
    let ok = match spec.ty {
        ParamType::String => value.as_str().is_some(),
        ParamType::Int => value.as_i64().is_some(),
        ParamType::Float => value.as_f64().is_some(),
        ParamType::Bool => value.as_bool().is_some(),
        ParamType::StringList => value.as_str_list().is_some(),
    };
    if ok {
        Ok(())
    } else {
        Err(format!("param {:?} expected {:?}, got {}", spec.name, spec.ty, value.type_name()))
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
