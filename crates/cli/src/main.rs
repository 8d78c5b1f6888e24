// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ntn`: the fabric scenario runner CLI.
//!
//! Thin over `ntn-runner`: every subcommand loads a `RunnerConfig` and a
//! `Topology`, builds a `Runner`, and delegates. Exit codes map from
//! `ExitError` so deferred cleanup (the PID lock's `Drop`, device
//! disconnects) always runs before `std::process::exit`.

mod color;
mod commands;
mod exit_error;

use clap::Parser;

#[derive(Parser)]
#[command(name = "ntn", version, about = "SONiC fabric scenario runner", styles = color::styles())]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Path to `newtron.toml` (defaults to `./newtron.toml`).
    #[arg(long, global = true, default_value = "newtron.toml")]
    config: std::path::PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match commands::dispatch(cli.command, &cli.config).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.code);
        }
    }
}
