// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::exit_error::ExitError;
use std::path::Path;

pub fn run(config_path: &Path) -> Result<(), ExitError> {
    let runner = super::build_runner(config_path)?;
    let suites = runner.list_suites()?;
    if suites.is_empty() {
        println!("{}", crate::color::context("no suites found"));
        return Ok(());
    }
    for suite in suites {
        println!("{suite}");
    }
    Ok(())
}
