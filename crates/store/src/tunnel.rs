// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SSH local-forward tunnels for devices whose store only binds
//! loopback, so the only reachable path is through the management SSH
//! session.
//!
//! `ssh2` is synchronous; every blocking call here runs inside
//! `spawn_blocking` so the tunnel never stalls the async runtime.

use crate::error::StoreError;
use parking_lot::Mutex;
use ntn_core::CredentialSecret;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::JoinHandle;

/// A local TCP port forwarded to `remote_port` on a device's loopback,
/// backed by an SSH session held open for the tunnel's lifetime.
pub struct SshTunnel {
    local_port: u16,
    refcount: Arc<Mutex<usize>>,
    shutdown: Arc<std::sync::atomic::AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SshTunnel {
    pub fn local_port(&self) -> u16 {
        self.local_port
    }

    /// Register an additional holder of this tunnel. Call `release` an
    /// equal number of times to let the tunnel close.
    pub fn acquire(&self) {
        *self.refcount.lock() += 1;
    }

    /// Drop a holder; the background thread stops once the count reaches
    /// zero and the listener wakes up for its next accept.
    pub fn release(&self) {
        let mut count = self.refcount.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.shutdown.store(true, std::sync::atomic::Ordering::SeqCst);
        }
    }
}

impl Drop for SshTunnel {
    fn drop(&mut self) {
        self.shutdown.store(true, std::sync::atomic::Ordering::SeqCst);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

/// Establish an SSH session to `management_address` and forward a local
/// ephemeral port to `remote_port` on the device's loopback.
///
/// Blocking `ssh2` setup and the forwarding loop both run on a dedicated
/// OS thread via `spawn_blocking`, keeping the tunnel off the tokio
/// reactor.
pub async fn open(
    management_address: String,
    username: String,
    secret: CredentialSecret,
    remote_port: u16,
) -> Result<SshTunnel, StoreError> {
    tokio::task::spawn_blocking(move || open_blocking(&management_address, &username, &secret, remote_port))
        .await
        .map_err(|e| StoreError::Tunnel(format!("tunnel worker panicked: {e}")))?
}

fn open_blocking(
    management_address: &str,
    username: &str,
    secret: &CredentialSecret,
    remote_port: u16,
) -> Result<SshTunnel, StoreError> {
    let tcp = TcpStream::connect((management_address, 22)).map_err(|e| StoreError::Tunnel(e.to_string()))?;
    let mut session = ssh2::Session::new().map_err(|e| StoreError::Tunnel(e.to_string()))?;
    session.set_tcp_stream(tcp);
    session.handshake().map_err(|e| StoreError::Tunnel(e.to_string()))?;
    authenticate(&session, username, secret)?;

    let listener = TcpListener::bind(("127.0.0.1", 0)).map_err(|e| StoreError::Tunnel(e.to_string()))?;
    let local_port = listener.local_addr().map_err(|e| StoreError::Tunnel(e.to_string()))?.port();
    listener.set_nonblocking(true).map_err(|e| StoreError::Tunnel(e.to_string()))?;

    let shutdown = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let refcount = Arc::new(Mutex::new(1usize));
    let worker_shutdown = Arc::clone(&shutdown);

    let worker = std::thread::Builder::new()
        .name("ntn-ssh-tunnel".into())
        .spawn(move || forward_loop(session, listener, remote_port, worker_shutdown))
        .map_err(|e| StoreError::Tunnel(e.to_string()))?;

    Ok(SshTunnel { local_port, refcount, shutdown, worker: Some(worker) })
}

pub fn authenticate(session: &ssh2::Session, username: &str, secret: &CredentialSecret) -> Result<(), StoreError> {
    match secret {
        CredentialSecret::Password(password) => {
            session.userauth_password(username, password).map_err(|e| StoreError::Tunnel(e.to_string()))?;
        }
        CredentialSecret::KeyFile(path) => {
            session.userauth_pubkey_file(username, None, path, None).map_err(|e| StoreError::Tunnel(e.to_string()))?;
        }
    }
    if !session.authenticated() {
        return Err(StoreError::Tunnel("authentication rejected".into()));
    }
    Ok(())
}

fn forward_loop(
    session: ssh2::Session,
    listener: TcpListener,
    remote_port: u16,
    shutdown: Arc<std::sync::atomic::AtomicBool>,
) {
    while !shutdown.load(std::sync::atomic::Ordering::SeqCst) {
        match listener.accept() {
            Ok((client, _)) => {
                if let Err(err) = relay_one(&session, client, remote_port) {
                    tracing::warn!(?err, "ssh tunnel relay dropped");
                }
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(std::time::Duration::from_millis(25));
            }
            Err(err) => {
                tracing::warn!(?err, "ssh tunnel listener error");
                break;
            }
        }
    }
}

fn relay_one(session: &ssh2::Session, mut client: TcpStream, remote_port: u16) -> Result<(), StoreError> {
    let mut channel = session
        .channel_direct_tcpip("127.0.0.1", remote_port, None)
        .map_err(|e| StoreError::Tunnel(e.to_string()))?;
    let mut buf = [0u8; 4096];
    loop {
        let n = client.read(&mut buf).map_err(|e| StoreError::Tunnel(e.to_string()))?;
        if n == 0 {
            break;
        }
        channel.write_all(&buf[..n]).map_err(|e| StoreError::Tunnel(e.to_string()))?;
        let m = channel.read(&mut buf).map_err(|e| StoreError::Tunnel(e.to_string()))?;
        if m == 0 {
            break;
        }
        client.write_all(&buf[..m]).map_err(|e| StoreError::Tunnel(e.to_string()))?;
    }
    let _ = channel.close();
    Ok(())
}

/// Reference-counted pool keyed by device name, so several callers (e.g.
/// concurrent actions against the same device) share one tunnel.
#[derive(Default)]
pub struct TunnelPool {
    tunnels: Mutex<HashMap<String, Arc<SshTunnel>>>,
}

impl TunnelPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, device: &str) -> Option<Arc<SshTunnel>> {
        let guard = self.tunnels.lock();
        guard.get(device).cloned()
    }

    pub fn insert(&self, device: &str, tunnel: SshTunnel) -> Arc<SshTunnel> {
        let tunnel = Arc::new(tunnel);
        self.tunnels.lock().insert(device.to_string(), Arc::clone(&tunnel));
        tunnel
    }

    pub fn remove(&self, device: &str) {
        self.tunnels.lock().remove(device);
    }
}

#[cfg(test)]
#[path = "tunnel_tests.rs"]
mod tests;
