// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::cell::Cell;

#[test]
fn second_lookup_does_not_recompute() {
    let cache = Cache::new();
    let calls = Cell::new(0);
    let compute = || {
        calls.set(calls.get() + 1);
        true
    };
    assert!(cache.get_or_compute_bool("vlan:500", compute));
    assert!(cache.get_or_compute_bool("vlan:500", compute));
    assert_eq!(calls.get(), 1);
}

#[test]
fn invalidate_forces_recompute() {
    let cache = Cache::new();
    let calls = Cell::new(0);
    let compute = || {
        calls.set(calls.get() + 1);
        true
    };
    cache.get_or_compute_bool("vlan:500", compute);
    cache.invalidate();
    cache.get_or_compute_bool("vlan:500", compute);
    assert_eq!(calls.get(), 2);
}
