// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::exit_error::ExitError;
use std::path::Path;

#[derive(clap::Args)]
pub struct Args {
    pub suite: String,
}

/// Cancels a running suite immediately, distinct from `pause`: sends
/// `SIGTERM` to the recorded `RunState.pid` so the in-process `start`
/// command's signal handler requests cancellation (checked before every
/// step, never waiting for a scenario boundary). Shelling out to `kill`
/// keeps process signaling behind the same small subprocess seam the
/// lab orchestrator and `ssh`/`docker exec` calls already go through.
pub fn run(args: Args, config_path: &Path) -> Result<(), ExitError> {
    let runner = super::build_runner(config_path)?;
    let state = runner.status(&args.suite)?;
    if !state.status.is_live() {
        return Err(ExitError::generic(format!("suite {:?} is not running (status: {})", args.suite, state.status)));
    }

    let output = std::process::Command::new("kill")
        .arg("-TERM")
        .arg(state.pid.to_string())
        .output()
        .map_err(|e| ExitError::infra(format!("spawn kill: {e}")))?;
    if !output.status.success() {
        return Err(ExitError::infra(format!(
            "kill -TERM {}: {}",
            state.pid,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    println!("stop requested for suite {:?} (pid {})", args.suite, state.pid);
    Ok(())
}
