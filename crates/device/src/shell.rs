// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote shell execution: password- or key-auth SSH to a device's
//! management address, used by verification
//! actions (`verify-ping`, `verify-bgp`) to run `ping`/`vtysh` and by
//! `ssh-command`/`restart-service` to run an arbitrary command.
//!
//! This is a distinct concern from `ntn-store::tunnel`, which forwards
//! the *store's* TCP port through SSH — `RemoteShell` opens its own
//! session and runs a command to completion, returning output rather
//! than relaying bytes indefinitely. Both share the same `ssh2`
//! blocking-session-on-a-dedicated-thread idiom.

use async_trait::async_trait;
use ntn_core::{CredentialSecret, DeviceProfile, InfraError};
use std::io::Read;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ShellOutput {
    pub exit_status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.exit_status == 0
    }
}

#[async_trait]
pub trait RemoteShell: Send + Sync {
    async fn exec(&self, profile: &DeviceProfile, command: &str, timeout: Duration) -> Result<ShellOutput, InfraError>;
}

/// Production shell: one fresh SSH session per command, run on a
/// dedicated OS thread since `ssh2` is synchronous.
pub struct Ssh2RemoteShell;

#[async_trait]
impl RemoteShell for Ssh2RemoteShell {
    async fn exec(&self, profile: &DeviceProfile, command: &str, timeout: Duration) -> Result<ShellOutput, InfraError> {
        let address = profile.management_address.to_string();
        let device = profile.name.clone();
        let Some(creds) = profile.credentials.clone() else {
            return Err(InfraError::new("ssh-exec", &device, "device profile has no credentials configured"));
        };
        let command = command.to_string();
        let device_for_err = device.clone();
        tokio::time::timeout(
            timeout,
            tokio::task::spawn_blocking(move || exec_blocking(&address, &creds, &command)),
        )
        .await
        .map_err(|_| InfraError::new("ssh-exec", &device_for_err, "command timed out"))?
        .map_err(|e| InfraError::new("ssh-exec", &device, format!("ssh worker panicked: {e}")))?
    }
}

fn exec_blocking(address: &str, creds: &ntn_core::Credentials, command: &str) -> Result<ShellOutput, InfraError> {
    let infra = |cause: String| InfraError::new("ssh-exec", address, cause);
    let tcp = std::net::TcpStream::connect((address, 22)).map_err(|e| infra(e.to_string()))?;
    let mut session = ssh2::Session::new().map_err(|e| infra(e.to_string()))?;
    session.set_tcp_stream(tcp);
    session.handshake().map_err(|e| infra(e.to_string()))?;
    authenticate(&session, &creds.username, &creds.secret).map_err(|e| infra(e))?;

    let mut channel = session.channel_session().map_err(|e| infra(e.to_string()))?;
    channel.exec(command).map_err(|e| infra(e.to_string()))?;
    let mut stdout = String::new();
    channel.read_to_string(&mut stdout).map_err(|e| infra(e.to_string()))?;
    let mut stderr = String::new();
    channel.stderr().read_to_string(&mut stderr).map_err(|e| infra(e.to_string()))?;
    channel.wait_close().map_err(|e| infra(e.to_string()))?;
    let exit_status = channel.exit_status().map_err(|e| infra(e.to_string()))?;
    Ok(ShellOutput { exit_status, stdout, stderr })
}

fn authenticate(session: &ssh2::Session, username: &str, secret: &CredentialSecret) -> Result<(), String> {
    match secret {
        CredentialSecret::Password(password) => {
            session.userauth_password(username, password).map_err(|e| e.to_string())?;
        }
        CredentialSecret::KeyFile(path) => {
            session.userauth_pubkey_file(username, None, path, None).map_err(|e| e.to_string())?;
        }
    }
    if !session.authenticated() {
        return Err("authentication rejected".to_string());
    }
    Ok(())
}

/// Deterministic in-memory shell for tests: returns a fixed or
/// programmed response per command without ever touching the network.
#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct FakeRemoteShell {
        responses: Mutex<HashMap<String, ShellOutput>>,
        default: ShellOutput,
    }

    impl FakeRemoteShell {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(HashMap::new()),
                default: ShellOutput { exit_status: 0, stdout: String::new(), stderr: String::new() },
            }
        }

        pub fn with_response(self, command: impl Into<String>, output: ShellOutput) -> Self {
            self.responses.lock().insert(command.into(), output);
            self
        }
    }

    #[async_trait]
    impl RemoteShell for FakeRemoteShell {
        async fn exec(&self, _profile: &DeviceProfile, command: &str, _timeout: Duration) -> Result<ShellOutput, InfraError> {
            Ok(self.responses.lock().get(command).cloned().unwrap_or_else(|| self.default.clone()))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRemoteShell;

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
