// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color for the one place this crate actually needs it: a
//! PASS/FAIL/SKIP/ERROR badge per scenario/step line. Clap's own help
//! styling reuses the same palette so `--help` and run output read as
//! one program.

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use ntn_core::{ScenarioStatus, StepStatus};
use std::io::IsTerminal;

pub mod codes {
    pub const HEADER: u8 = 74;
    pub const LITERAL: u8 = 250;
    pub const CONTEXT: u8 = 245;
    pub const PASSED: u8 = 34;
    pub const SKIPPED: u8 = 214;
    pub const FAILED: u8 = 160;
    pub const ERROR: u8 = 126;
}

/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

fn fg256(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    fg256(codes::HEADER, text)
}

pub fn context(text: &str) -> String {
    fg256(codes::CONTEXT, text)
}

pub fn scenario_badge(status: ScenarioStatus) -> String {
    match status {
        ScenarioStatus::Passed => fg256(codes::PASSED, "PASS"),
        ScenarioStatus::Skipped => fg256(codes::SKIPPED, "SKIP"),
        ScenarioStatus::Failed => fg256(codes::FAILED, "FAIL"),
        ScenarioStatus::Error => fg256(codes::ERROR, "ERROR"),
        ScenarioStatus::Pending => fg256(codes::CONTEXT, "PENDING"),
        ScenarioStatus::Running => fg256(codes::HEADER, "RUNNING"),
    }
}

pub fn step_badge(status: StepStatus) -> String {
    match status {
        StepStatus::Passed => fg256(codes::PASSED, "pass"),
        StepStatus::Skipped => fg256(codes::SKIPPED, "skip"),
        StepStatus::Failed => fg256(codes::FAILED, "fail"),
        StepStatus::Error => fg256(codes::ERROR, "error"),
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
