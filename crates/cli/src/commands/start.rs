// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::exit_error::ExitError;
use ntn_runner::RunControl;
use std::path::Path;

#[derive(clap::Args)]
pub struct Args {
    /// Suite name (a directory under `suites_base`).
    pub suite: String,
}

/// Runs `suite` to completion, pause, or abort. A `SIGTERM`/`SIGINT`
/// during the run requests cancellation rather than killing the process
/// outright, so the engine releases locks and persists state on the way
/// out instead of leaving a `LockToken` to expire on TTL alone.
pub async fn run(args: Args, config_path: &Path) -> Result<(), ExitError> {
    let runner = super::build_runner(config_path)?;
    let control = RunControl::new();

    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .map_err(|e| ExitError::infra(format!("install SIGTERM handler: {e}")))?;

    let run_fut = runner.start(&args.suite, &control);
    tokio::pin!(run_fut);
    let status = loop {
        tokio::select! {
            result = &mut run_fut => break result?,
            _ = tokio::signal::ctrl_c() => control.request_cancel(),
            _ = sigterm.recv() => control.request_cancel(),
        }
    };

    println!("suite {:?} finished: {status}", args.suite);
    match status {
        ntn_core::SuiteStatus::Complete | ntn_core::SuiteStatus::Paused => Ok(()),
        ntn_core::SuiteStatus::Aborted => Err(ExitError::generic(format!("suite {:?} aborted", args.suite))),
        ntn_core::SuiteStatus::Failed => Err(ExitError::generic(format!("suite {:?} failed", args.suite))),
        ntn_core::SuiteStatus::Running | ntn_core::SuiteStatus::Pausing => {
            Err(ExitError::generic("suite left in a non-terminal status"))
        }
    }
}
