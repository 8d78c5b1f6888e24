// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The lab topology: the fleet of devices a suite may reference, loaded
//! once per run from `RunnerConfig::lab_topology` and handed to
//! `Scenario::from_yaml`/`Suite::load` as the known-device set.

use crate::error::RunnerError;
use ntn_core::DeviceProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub devices: Vec<DeviceProfile>,
}

impl Topology {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RunnerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RunnerError::Io { path: path.to_path_buf(), source })?;
        let topology: Topology = toml::from_str(&text).map_err(|e| RunnerError::Config(format!("{}: {e}", path.display())))?;
        topology.validate()?;
        Ok(topology)
    }

    fn validate(&self) -> Result<(), RunnerError> {
        let mut seen = std::collections::HashSet::new();
        for device in &self.devices {
            if !seen.insert(device.name.as_str()) {
                return Err(RunnerError::Config(format!("duplicate device name {:?} in topology", device.name)));
            }
        }
        Ok(())
    }

    pub fn device_names(&self) -> Vec<String> {
        self.devices.iter().map(|d| d.name.clone()).collect()
    }

    pub fn profile(&self, name: &str) -> Option<&DeviceProfile> {
        self.devices.iter().find(|d| d.name == name)
    }
}

#[cfg(test)]
#[path = "topology_tests.rs"]
mod tests;
