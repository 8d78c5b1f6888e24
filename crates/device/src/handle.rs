// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The device handle: the per-device stateful facade that owns both
//! snapshots, the lock token, and the introspection cache. Everything
//! above this layer (operations, actions, the scenario runner) talks to
//! a device exclusively through this type.

use crate::cache::Cache;
use crate::error::DeviceError;
use crate::normalize::normalize_interface;
use async_trait::async_trait;
use indexmap::IndexMap;
use ntn_core::{ChangeSet, ConfigSnapshot, DeviceLocked, DeviceProfile, HolderId, LockToken, StateSnapshot};
use ntn_store::{db::DbId, lock_ops::AcquireOutcome, LockOps, StoreClient};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;

/// `Construct -> Connect -> Lock (optional) -> ... -> Unlock -> Disconnect`.
///
/// A `Device` owns exactly one `LockToken` at a time and is never shared
/// across concurrent workers; the fan-out layer constructs one handle per
/// device per step.
pub struct Device {
    profile: DeviceProfile,
    store: Arc<dyn StoreClient>,
    lock_ops: Arc<dyn LockOps>,
    config: RwLock<ConfigSnapshot>,
    state: RwLock<StateSnapshot>,
    lock_token: Mutex<Option<LockToken>>,
    connected: std::sync::atomic::AtomicBool,
    cache: Cache,
}

impl Device {
    pub fn new(profile: DeviceProfile, store: Arc<dyn StoreClient>, lock_ops: Arc<dyn LockOps>) -> Self {
        Self {
            profile,
            store,
            lock_ops,
            config: RwLock::new(ConfigSnapshot::new()),
            state: RwLock::new(StateSnapshot::new()),
            lock_token: Mutex::new(None),
            connected: std::sync::atomic::AtomicBool::new(false),
            cache: Cache::new(),
        }
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn is_locked(&self) -> bool {
        self.lock_token.lock().is_some()
    }

    pub fn lock_token(&self) -> Option<LockToken> {
        self.lock_token.lock().clone()
    }

    /// TCP ping the store, then load both snapshots in full.
    pub async fn connect(&self) -> Result<(), DeviceError> {
        self.store.connect().await?;
        self.reload().await?;
        self.connected.store(true, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    /// Re-fetch both snapshots and invalidate the introspection cache.
    /// Called after every `ChangeSet::apply` and by `connect`.
    pub async fn reload(&self) -> Result<(), DeviceError> {
        let config = self.store.get_all(DbId::Config).await?;
        let state = self.store.get_all(DbId::State).await?;
        *self.config.write() = config;
        *self.state.write() = state;
        self.cache.invalidate();
        Ok(())
    }

    /// Acquire the device's distributed lock. Fails with `DeviceLocked`
    /// if another holder already has it and its TTL has not expired.
    pub async fn lock(&self, holder: HolderId, ttl: Duration, now_ms: u64) -> Result<(), DeviceError> {
        match self.lock_ops.acquire(self.name(), holder, ttl, now_ms).await? {
            AcquireOutcome::Acquired(token) => {
                *self.lock_token.lock() = Some(token);
                Ok(())
            }
            AcquireOutcome::HeldBy(_) => Err(DeviceError::Locked(DeviceLocked(self.name().to_string()))),
        }
    }

    /// Release the device's lock if this handle is the current holder.
    pub async fn unlock(&self) -> Result<(), DeviceError> {
        let holder = {
            let guard = self.lock_token.lock();
            guard.as_ref().map(|t| t.holder.clone())
        };
        let Some(holder) = holder else {
            return Ok(());
        };
        self.lock_ops.release(self.name(), &holder).await?;
        *self.lock_token.lock() = None;
        Ok(())
    }

    /// Drop any in-memory snapshot state; does not touch the lock (callers
    /// should `unlock` first if they held one).
    pub fn disconnect(&self) {
        self.connected.store(false, std::sync::atomic::Ordering::SeqCst);
        *self.config.write() = ConfigSnapshot::new();
        *self.state.write() = StateSnapshot::new();
        self.cache.invalidate();
    }

    pub fn config_snapshot(&self) -> ConfigSnapshot {
        self.config.read().clone()
    }

    pub fn state_snapshot(&self) -> StateSnapshot {
        self.state.read().clone()
    }

    pub(crate) fn store(&self) -> &Arc<dyn StoreClient> {
        &self.store
    }

    // ---- introspection -------------------------------------------------

    pub fn has_vlan(&self, vlan_id: u16) -> bool {
        let key = format!("Vlan{vlan_id}");
        self.cache.get_or_compute_bool(format!("vlan:{vlan_id}"), || self.config.read().exists("VLAN", &key))
    }

    pub fn has_vrf(&self, name: &str) -> bool {
        self.cache.get_or_compute_bool(format!("vrf:{name}"), || self.config.read().exists("VRF", name))
    }

    pub fn has_port_channel(&self, name: &str) -> bool {
        let name = normalize_interface(name);
        self.cache.get_or_compute_bool(format!("pc:{name}"), || self.config.read().exists("PORTCHANNEL", &name))
    }

    pub fn has_acl_table(&self, name: &str) -> bool {
        self.cache.get_or_compute_bool(format!("acl:{name}"), || self.config.read().exists("ACL_TABLE", name))
    }

    pub fn has_vtep(&self) -> bool {
        self.cache.get_or_compute_bool("vtep", || !self.config.read().keys("VXLAN_TUNNEL").unwrap_or_default().is_empty())
    }

    pub fn has_bgp_neighbor(&self, address: &str) -> bool {
        self.cache.get_or_compute_bool(format!("bgpnbr:{address}"), || self.config.read().exists("BGP_NEIGHBOR", address))
    }

    pub fn has_interface(&self, name: &str) -> bool {
        let name = normalize_interface(name);
        self.cache.get_or_compute_bool(format!("iface:{name}"), || {
            self.config.read().exists("PORT", &name) || self.config.read().exists("PORTCHANNEL", &name)
        })
    }

    pub fn has_service(&self, name: &str) -> bool {
        self.cache.get_or_compute_bool(format!("service:{name}"), || self.config.read().exists("SERVICE", name))
    }

    pub fn has_filter_spec(&self, name: &str) -> bool {
        self.cache.get_or_compute_bool(format!("filterspec:{name}"), || self.config.read().exists("FILTER_SPEC", name))
    }

    pub fn has_peer_group(&self, name: &str) -> bool {
        self.cache.get_or_compute_bool(format!("peergroup:{name}"), || self.config.read().exists("BGP_PEER_GROUP", name))
    }

    pub fn list_interfaces(&self) -> Vec<String> {
        self.config.read().keys("PORT").unwrap_or_default()
    }

    pub fn list_vlans(&self) -> Vec<String> {
        self.config.read().keys("VLAN").unwrap_or_default()
    }

    pub fn list_vrfs(&self) -> Vec<String> {
        self.config.read().keys("VRF").unwrap_or_default()
    }

    pub fn list_port_channels(&self) -> Vec<String> {
        self.config.read().keys("PORTCHANNEL").unwrap_or_default()
    }

    pub fn get_vlan(&self, vlan_id: u16) -> Option<IndexMap<String, String>> {
        self.config.read().get("VLAN", &format!("Vlan{vlan_id}")).cloned()
    }

    pub fn get_interface(&self, name: &str) -> Option<IndexMap<String, String>> {
        let name = normalize_interface(name);
        self.config.read().get("PORT", &name).cloned()
    }

    pub fn get_vrf(&self, name: &str) -> Option<IndexMap<String, String>> {
        self.config.read().get("VRF", name).cloned()
    }

    /// Members of a VLAN, keyed `Vlan<id>|<interface>` in the real schema;
    /// callers get back just the interface names.
    pub fn vlan_members(&self, vlan_id: u16) -> Vec<String> {
        let prefix = format!("Vlan{vlan_id}|");
        self.config
            .read()
            .keys("VLAN_MEMBER")
            .unwrap_or_default()
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    /// Every ACL table's currently-bound ports, from `ACL_TABLE.ports`
    /// (a comma-separated field in the real schema).
    pub fn acl_table_ports(&self, table: &str) -> Vec<String> {
        self.config
            .read()
            .get("ACL_TABLE", table)
            .and_then(|fields| fields.get("ports"))
            .map(|ports| ports.split(',').filter(|p| !p.is_empty()).map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Members of a port channel, keyed `<name>|<interface>` in the real
    /// schema.
    pub fn port_channel_members(&self, name: &str) -> Vec<String> {
        let name = normalize_interface(name);
        let prefix = format!("{name}|");
        self.config
            .read()
            .keys("PORTCHANNEL_MEMBER")
            .unwrap_or_default()
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    /// The port channel that currently owns `iface` as a member, if any.
    pub fn lag_owner_of(&self, iface: &str) -> Option<String> {
        let iface = normalize_interface(iface);
        self.config.read().keys("PORTCHANNEL_MEMBER").unwrap_or_default().into_iter().find_map(|k| {
            let (pc, member) = k.split_once('|')?;
            (member == iface).then(|| pc.to_string())
        })
    }

    /// Whether a `BGP_GLOBALS` entry (the `default` VRF's ASN/router-id)
    /// has been configured on this device.
    pub fn has_bgp_globals(&self) -> bool {
        self.cache.get_or_compute_bool("bgp_globals", || self.config.read().exists("BGP_GLOBALS", "default"))
    }

    /// Interfaces currently bound to a VRF other than the default one,
    /// via `INTERFACE.vrf_name` / `PORTCHANNEL_INTERFACE.vrf_name`.
    pub fn vrf_members(&self, vrf: &str) -> Vec<String> {
        let mut members = Vec::new();
        for table in ["INTERFACE", "PORTCHANNEL_INTERFACE", "VLAN_INTERFACE"] {
            if let Some(rows) = self.config.read().table(table) {
                for (key, fields) in rows {
                    if fields.get("vrf_name").map(String::as_str) == Some(vrf) {
                        members.push(key.split('|').next().unwrap_or(key).to_string());
                    }
                }
            }
        }
        members
    }

    /// ACL rule keys currently bound under `table`, from `ACL_RULE` keyed
    /// `<table>|<rule>`.
    pub fn acl_rules(&self, table: &str) -> Vec<String> {
        let prefix = format!("{table}|");
        self.config
            .read()
            .keys("ACL_RULE")
            .unwrap_or_default()
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    /// Whether a named service (interface-level declarative config bundle
    /// applied by `apply-service`) is currently bound to `iface`.
    pub fn interface_service(&self, iface: &str) -> Option<String> {
        let iface = normalize_interface(iface);
        self.config.read().get("SERVICE_BINDING", &iface).and_then(|f| f.get("service").cloned())
    }

    // ---- apply -----------------------------------------------------------

    /// Write every `Change` in `changeset.apply_order()` against the
    /// configuration DB, then force a full reload so both snapshots
    /// reflect ground truth even if the apply failed partway through.
    /// No silent rollback on a mid-apply transport failure: the caller
    /// (the executor) decides what to do with a partially-applied set.
    pub async fn apply(&self, changeset: &ChangeSet) -> Result<(), DeviceError> {
        let result = self.apply_inner(DbId::Config, changeset).await;
        self.reload().await?;
        result
    }

    async fn apply_inner(&self, db: DbId, changeset: &ChangeSet) -> Result<(), DeviceError> {
        use ntn_core::ChangeOp;
        for change in changeset.apply_order() {
            match change.op {
                ChangeOp::Delete => self.store.delete(db, &change.table, &change.key).await?,
                ChangeOp::Add | ChangeOp::Modify => {
                    self.store.set(db, &change.table, &change.key, change.new_fields.clone()).await?
                }
            }
        }
        Ok(())
    }
}

/// Marker so `Device` can be embedded behind `Arc<dyn ...>` seams in the
/// executor layer without leaking its concrete type.
#[async_trait]
pub trait DeviceHandle: Send + Sync {
    fn name(&self) -> &str;
}

#[async_trait]
impl DeviceHandle for Device {
    fn name(&self) -> &str {
        Device::name(self)
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
