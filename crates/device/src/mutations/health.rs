// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `RunHealthChecks(kind?)`: the one operational probe that reads the
//! state snapshot rather than building a `ChangeSet` — there is nothing
//! to mutate, only operational-state tables to interpret. Backs the
//! `verify-bgp`/`verify-health` actions' non-SSH fast path; a deeper probe
//! (interface counters, vtysh) goes through the remote shell adapter in
//! `ntn-actions` instead.

use crate::error::DeviceError;
use crate::handle::Device;
use crate::precondition::PreconditionChecker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCheckKind {
    /// Every configured BGP neighbor's session state.
    Bgp,
    /// Interface operational (link) status for every `PORT` entry.
    Interfaces,
    /// Both of the above.
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub name: String,
    pub healthy: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthCheckReport {
    pub results: Vec<HealthCheckResult>,
}

impl HealthCheckReport {
    pub fn all_healthy(&self) -> bool {
        self.results.iter().all(|r| r.healthy)
    }
}

impl Device {
    /// Reads `BGP_NEIGHBOR_STATE`/`PORT_TABLE` from the state snapshot
    /// (refreshed by the most recent `reload`, never fetched fresh here —
    /// callers that need ground truth call `reload` first).
    pub fn run_health_checks(&self, kind: Option<HealthCheckKind>) -> Result<HealthCheckReport, DeviceError> {
        PreconditionChecker::new(self).require_connected().finish()?;

        let kind = kind.unwrap_or(HealthCheckKind::All);
        let mut results = Vec::new();
        if matches!(kind, HealthCheckKind::Bgp | HealthCheckKind::All) {
            results.extend(self.bgp_health());
        }
        if matches!(kind, HealthCheckKind::Interfaces | HealthCheckKind::All) {
            results.extend(self.interface_health());
        }
        Ok(HealthCheckReport { results })
    }

    fn bgp_health(&self) -> Vec<HealthCheckResult> {
        let state = self.state_snapshot();
        let Some(neighbors) = state.table("BGP_NEIGHBOR_STATE") else {
            return Vec::new();
        };
        neighbors
            .iter()
            .map(|(addr, fields)| {
                let session_state = fields.get("state").map(String::as_str).unwrap_or("unknown");
                HealthCheckResult {
                    name: format!("bgp:{addr}"),
                    healthy: session_state.eq_ignore_ascii_case("established"),
                    detail: session_state.to_string(),
                }
            })
            .collect()
    }

    fn interface_health(&self) -> Vec<HealthCheckResult> {
        let state = self.state_snapshot();
        let Some(ports) = state.table("PORT_TABLE") else {
            return Vec::new();
        };
        ports
            .iter()
            .map(|(name, fields)| {
                let oper_status = fields.get("oper_status").map(String::as_str).unwrap_or("unknown");
                HealthCheckResult { name: name.clone(), healthy: oper_status.eq_ignore_ascii_case("up"), detail: oper_status.to_string() }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
