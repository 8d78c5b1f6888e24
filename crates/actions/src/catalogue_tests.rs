// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ntn_core::FakeClock;
use ntn_device::shell::fake::FakeRemoteShell;

#[test]
fn every_catalogue_action_has_an_executor() {
    let shell: Arc<dyn RemoteShell> = Arc::new(FakeRemoteShell::new());
    let registry = build_registry::<FakeClock>(shell);
    let mut missing = Vec::new();
    for name in ntn_scenario::schema::ACTIONS.keys() {
        if !registry.contains_key(name) {
            missing.push(*name);
        }
    }
    assert!(missing.is_empty(), "actions with no executor: {missing:?}");
}

#[test]
fn registry_has_no_unknown_extra_entries() {
    let shell: Arc<dyn RemoteShell> = Arc::new(FakeRemoteShell::new());
    let registry = build_registry::<FakeClock>(shell);
    for name in registry.keys() {
        assert!(ntn_scenario::schema::ACTIONS.contains_key(name), "executor {name:?} has no catalogue entry");
    }
}