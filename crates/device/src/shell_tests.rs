// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::fake::FakeRemoteShell;
use super::*;
use ntn_core::DeviceProfile;
use std::net::Ipv4Addr;

#[tokio::test]
async fn fake_shell_returns_programmed_response() {
    let shell = FakeRemoteShell::new().with_response(
        "ping -c 1 10.0.0.1",
        ShellOutput { exit_status: 0, stdout: "1 packets transmitted, 1 received".into(), stderr: String::new() },
    );
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let out = shell.exec(&profile, "ping -c 1 10.0.0.1", std::time::Duration::from_secs(5)).await.unwrap();
    assert!(out.success());
    assert!(out.stdout.contains("1 received"));
}

#[tokio::test]
async fn fake_shell_default_response_is_success() {
    let shell = FakeRemoteShell::new();
    let profile = DeviceProfile::new("leaf1", Ipv4Addr::new(10, 0, 0, 1).into());
    let out = shell.exec(&profile, "anything", std::time::Duration::from_secs(5)).await.unwrap();
    assert!(out.success());
}