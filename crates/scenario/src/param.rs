// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Step.params`: an open string-keyed map, shaped per-action. Stored as
//! parsed YAML scalars/sequences rather than re-stringified, so an
//! executor's typed param parser that returns a
//! typed param struct") can pull out ints/bools/lists without a second
//! parse pass.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One parameter value as it came off the YAML step body. Deliberately
/// narrower than `serde_yaml::Value` — a scenario step's params are
/// always scalars, lists of scalars, or nested maps of the same, never
/// arbitrary YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<ParamValue>),
    Map(indexmap::IndexMap<String, ParamValue>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            ParamValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_i64().and_then(|i| u64::try_from(i).ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(f) => Some(*f),
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            ParamValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_str_list(&self) -> Option<Vec<String>> {
        match self {
            ParamValue::List(items) => items.iter().map(ParamValue::as_str).map(|s| s.map(str::to_string)).collect(),
            ParamValue::String(s) => Some(vec![s.clone()]),
            _ => None,
        }
    }

    /// The type tag used in schema-mismatch error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::String(_) => "string",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Bool(_) => "bool",
            ParamValue::List(_) => "list",
            ParamValue::Map(_) => "map",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => write!(f, "{s}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::List(items) => write!(f, "[{}]", items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")),
            ParamValue::Map(_) => write!(f, "<map>"),
        }
    }
}

pub type ParamMap = indexmap::IndexMap<String, ParamValue>;

#[cfg(test)]
#[path = "param_tests.rs"]
mod tests;
