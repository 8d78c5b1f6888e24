// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    eth = { "Eth0", "Ethernet0" },
    po = { "Po100", "PortChannel100" },
    vl = { "Vl500", "Vlan500" },
    already_canonical = { "Ethernet12", "Ethernet12" },
    unrelated = { "Loopback0", "Loopback0" },
)]
fn normalizes_known_aliases(input: &str, expected: &str) {
    assert_eq!(normalize_interface(input), expected);
}

#[test]
fn alias_prefix_without_digits_passes_through() {
    assert_eq!(normalize_interface("Ethx"), "Ethx");
}
