// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Device identity and profile: everything the engine needs to know about a
//! fabric device before it ever connects to one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

crate::define_id! {
    /// Short, human-chosen device name (e.g. `leaf1`), not a generated ID.
    ///
    /// Kept as a `define_id!`-shaped newtype purely for the `Display`/
    /// `Borrow<str>`/`Deref` ergonomics; `DeviceId::from_string` is the only
    /// constructor callers use in practice (there is no `DeviceId::new()`
    /// random-generation path — device names come from the topology).
    pub struct DeviceId("dev-");
}

/// SSH credentials for a device. Never logged or persisted in `RunState`;
/// `Debug` redacts the secret by treating it as a distinct, non-logged
/// type rather than a plain `String` field.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub secret: CredentialSecret,
}

#[derive(Clone, Serialize, Deserialize)]
pub enum CredentialSecret {
    Password(String),
    KeyFile(std::path::PathBuf),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("username", &self.username).field("secret", &"<redacted>").finish()
    }
}

/// BGP neighbor declared in a device's profile (used to seed `configure-bgp`
/// and to validate `bgp-add-neighbor` params against the topology).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpNeighborSpec {
    pub address: IpAddr,
    pub remote_as: u32,
    #[serde(default)]
    pub peer_group: Option<String>,
}

/// Static, topology-derived facts about a device. Immutable for the
/// lifetime of a suite run; contrasts with `ConfigSnapshot`/`StateSnapshot`,
/// which are live mirrors of mutable remote state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub name: String,
    pub management_address: IpAddr,
    #[serde(default)]
    pub loopback_address: Option<IpAddr>,
    #[serde(default)]
    pub as_number: Option<u32>,
    #[serde(default)]
    pub router_id: Option<IpAddr>,
    #[serde(default)]
    pub vtep_source: Option<IpAddr>,
    #[serde(default)]
    pub bgp_neighbors: Vec<BgpNeighborSpec>,
    #[serde(default)]
    pub credentials: Option<Credentials>,
    /// Store connection: direct TCP, or SSH-tunneled when the store only
    /// binds loopback on the device.
    #[serde(default)]
    pub store_port: u16,
    #[serde(default)]
    pub store_via_ssh: bool,
    /// Platform port whitelist for `RequirePortAllowed`. Empty means every
    /// port is allowed (no platform-specific restriction declared).
    #[serde(default)]
    pub allowed_ports: Vec<String>,
}

impl DeviceProfile {
    pub fn new(name: impl Into<String>, management_address: IpAddr) -> Self {
        Self {
            name: name.into(),
            management_address,
            loopback_address: None,
            as_number: None,
            router_id: None,
            vtep_source: None,
            bgp_neighbors: Vec::new(),
            credentials: None,
            store_port: 6379,
            store_via_ssh: false,
            allowed_ports: Vec::new(),
        }
    }

    crate::setters! {
        option {
            loopback_address: IpAddr,
            as_number: u32,
            router_id: IpAddr,
            vtep_source: IpAddr,
            credentials: Credentials,
        }
        set {
            store_port: u16,
            store_via_ssh: bool,
        }
    }

    pub fn with_bgp_neighbor(mut self, neighbor: BgpNeighborSpec) -> Self {
        self.bgp_neighbors.push(neighbor);
        self
    }

    pub fn with_allowed_port(mut self, port: impl Into<String>) -> Self {
        self.allowed_ports.push(port.into());
        self
    }

    /// Whether `port` is permitted on this device's platform. An empty
    /// whitelist permits every port (no restriction declared).
    pub fn allows_port(&self, port: &str) -> bool {
        self.allowed_ports.is_empty() || self.allowed_ports.iter().any(|p| p == port)
    }
}

#[cfg(test)]
#[path = "device_profile_tests.rs"]
mod tests;
