// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::exit_error::ExitError;
use std::path::Path;

#[derive(clap::Args)]
pub struct Args {
    pub suite: String,
}

/// Writes `status: pausing` to the suite's `state.json`. Does not touch
/// the running process directly — the engine notices at its next
/// scenario boundary and transitions to `paused` itself.
pub fn run(args: Args, config_path: &Path) -> Result<(), ExitError> {
    let runner = super::build_runner(config_path)?;
    runner.request_pause(&args.suite)?;
    println!("pause requested for suite {:?}", args.suite);
    Ok(())
}
