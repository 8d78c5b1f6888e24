// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn formats_sub_second() {
    assert_eq!(format_elapsed_ms(500), "500ms");
}

#[test]
fn formats_seconds() {
    assert_eq!(format_elapsed_ms(3_400), "3.4s");
}

#[test]
fn formats_minutes() {
    assert_eq!(format_elapsed_ms(125_000), "2m05s");
}

#[test]
fn formats_hours() {
    assert_eq!(format_elapsed_ms(3_725_000), "1h02m");
}

#[test]
fn epoch_formats_unix_epoch() {
    assert_eq!(format_epoch_ms(0), "1970-01-01T00:00:00.000Z");
}

#[test]
fn epoch_formats_known_date() {
    // 2026-07-28T00:00:00Z
    assert_eq!(format_epoch_ms(1_785_196_800_000), "2026-07-28T00:00:00.000Z");
}
