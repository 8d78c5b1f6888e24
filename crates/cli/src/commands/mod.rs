// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations: `start`, `pause`, `stop`, `status`,
//! `list`, `actions`.

mod actions;
mod list;
mod pause;
mod start;
mod status;
mod stop;

use crate::exit_error::ExitError;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum Command {
    /// Start (or resume) a suite run.
    Start(start::Args),
    /// Request a running suite transition to `pausing` at the next scenario boundary.
    Pause(pause::Args),
    /// Cancel a running suite immediately (before the next step).
    Stop(stop::Args),
    /// Show the persisted run state for a suite.
    Status(status::Args),
    /// List suites under `suites_base`.
    List,
    /// List the closed action catalogue.
    Actions(actions::Args),
}

pub async fn dispatch(command: Command, config_path: &Path) -> Result<(), ExitError> {
    match command {
        Command::Start(args) => start::run(args, config_path).await,
        Command::Pause(args) => pause::run(args, config_path),
        Command::Stop(args) => stop::run(args, config_path),
        Command::Status(args) => status::run(args, config_path),
        Command::List => list::run(config_path),
        Command::Actions(args) => actions::run(args),
    }
}

/// Every suite-scoped subcommand builds a `Runner` from the same config
/// + topology pair; factored out once rather than repeated per command.
pub(crate) fn build_runner(config_path: &Path) -> Result<ntn_runner::Runner, ExitError> {
    let config = ntn_runner::RunnerConfig::load(config_path).map_err(ExitError::from)?;
    let topology = ntn_runner::Topology::load(&config.lab_topology).map_err(ExitError::from)?;
    Ok(ntn_runner::Runner::new(config, topology))
}
