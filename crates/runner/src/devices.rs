// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns a topology's device profiles into connected, ready-to-use
//! `ntn_device::Device` handles: direct TCP to the store when
//! `store_via_ssh` is unset, otherwise an SSH-forwarded local port shared
//! by the store client and the lock client (the tunnel only relays one
//! connection at a time, so both must reuse one `ConnectionManager`
//! rather than dialing the forward twice).

use crate::error::RunnerError;
use ntn_core::DeviceProfile;
use ntn_device::Device;
use ntn_store::client::RedisStoreClient;
use ntn_store::lock_ops::RedisLockOps;
use ntn_store::tunnel::{self, TunnelPool};
use std::collections::HashMap;
use std::sync::Arc;

/// Connect every device in `profiles`, returning a name-keyed map of
/// ready `Device` handles. `tunnels` is shared across an entire run so
/// concurrent steps against the same SSH-only device reuse one tunnel.
pub async fn connect_all(profiles: &[DeviceProfile], tunnels: &TunnelPool) -> Result<HashMap<String, Arc<Device>>, RunnerError> {
    let mut devices = HashMap::with_capacity(profiles.len());
    for profile in profiles {
        let device = connect_one(profile, tunnels).await?;
        devices.insert(profile.name.clone(), device);
    }
    Ok(devices)
}

async fn connect_one(profile: &DeviceProfile, tunnels: &TunnelPool) -> Result<Arc<Device>, RunnerError> {
    let manager = connection_manager(profile, tunnels).await?;
    let store = Arc::new(RedisStoreClient::from_manager(manager.clone()));
    let lock_ops = Arc::new(RedisLockOps::new(manager));
    let device = Arc::new(Device::new(profile.clone(), store, lock_ops));
    device.connect().await?;
    Ok(device)
}

async fn connection_manager(profile: &DeviceProfile, tunnels: &TunnelPool) -> Result<redis::aio::ConnectionManager, RunnerError> {
    let (addr, port) = if profile.store_via_ssh {
        let tunnel = match tunnels.get(&profile.name) {
            Some(tunnel) => {
                tunnel.acquire();
                tunnel
            }
            None => {
                let credentials = profile.credentials.as_ref().ok_or_else(|| {
                    RunnerError::Config(format!("device {:?} has store_via_ssh set but no credentials", profile.name))
                })?;
                let tunnel = tunnel::open(
                    profile.management_address.to_string(),
                    credentials.username.clone(),
                    credentials.secret.clone(),
                    profile.store_port,
                )
                .await
                .map_err(RunnerError::Store)?;
                tunnels.insert(&profile.name, tunnel)
            }
        };
        ("127.0.0.1".to_string(), tunnel.local_port())
    } else {
        (profile.management_address.to_string(), profile.store_port)
    };

    let client = redis::Client::open(format!("redis://{addr}:{port}")).map_err(ntn_store::StoreError::from).map_err(RunnerError::Store)?;
    client.get_connection_manager().await.map_err(ntn_store::StoreError::from).map_err(RunnerError::Store)
}
