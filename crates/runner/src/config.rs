// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner configuration: a suite-root `newtron.toml` document, layered
//! with environment overrides on top of a built-in default so partial or
//! entirely missing config is still valid.

use crate::error::RunnerError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// On-disk shape of `newtron.toml`. Every field has a default so an empty
/// or partial file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Root directory holding per-suite run state (`<testlab_dir>/<suite>/state.json`).
    pub testlab_dir: PathBuf,
    /// Root directory holding suite definitions (`<suites_base>/<suite>/*.yaml`).
    pub suites_base: PathBuf,
    /// Path to the lab topology document describing the device fleet.
    pub lab_topology: PathBuf,
    /// Upper bound on concurrently in-flight device workers for one step.
    pub max_parallel_devices: usize,
    /// Lock TTL this runner process requests when locking a device.
    pub lock_ttl_secs: u64,
    /// Default per-step timeout, used when a step and its action both
    /// omit one.
    pub default_step_timeout_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            testlab_dir: PathBuf::from("/var/lib/newtron/runs"),
            suites_base: PathBuf::from("/etc/newtron/suites"),
            lab_topology: PathBuf::from("/etc/newtron/topology.toml"),
            max_parallel_devices: 8,
            lock_ttl_secs: 60,
            default_step_timeout_secs: 30,
        }
    }
}

impl RunnerConfig {
    /// Load `path` if present, then apply `TESTLAB_DIR`/`SUITES_BASE`/
    /// `LAB_TOPOLOGY` environment overrides on top. A missing file is not
    /// an error — defaults plus environment overrides are still valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RunnerError> {
        let path = path.as_ref();
        let mut config = match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text).map_err(|e| RunnerError::Config(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => return Err(RunnerError::Io { path: path.to_path_buf(), source }),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("TESTLAB_DIR") {
            self.testlab_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("SUITES_BASE") {
            self.suites_base = PathBuf::from(dir);
        }
        if let Ok(path) = std::env::var("LAB_TOPOLOGY") {
            self.lab_topology = PathBuf::from(path);
        }
    }

    pub fn lock_ttl(&self) -> Duration {
        Duration::from_secs(self.lock_ttl_secs)
    }

    pub fn default_step_timeout(&self) -> Duration {
        Duration::from_secs(self.default_step_timeout_secs)
    }

    pub fn suite_dir(&self, suite: &str) -> PathBuf {
        self.suites_base.join(suite)
    }

    pub fn run_dir(&self, suite: &str) -> PathBuf {
        self.testlab_dir.join(suite)
    }

    pub fn state_path(&self, suite: &str) -> PathBuf {
        self.run_dir(suite).join("state.json")
    }

    pub fn lock_path(&self, suite: &str) -> PathBuf {
        self.run_dir(suite).join("runner.lock")
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
