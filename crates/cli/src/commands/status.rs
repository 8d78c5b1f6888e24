// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::exit_error::ExitError;
use ntn_runner::RunState;
use std::path::Path;
use std::time::Duration;

#[derive(clap::Args)]
pub struct Args {
    pub suite: String,

    /// Emit machine-readable JSON instead of the one-line-per-scenario report.
    #[arg(long)]
    pub json: bool,

    /// Print the full per-step history alongside each scenario.
    #[arg(long)]
    pub detail: bool,

    /// Poll and redraw every second until the suite reaches a terminal status.
    #[arg(long)]
    pub monitor: bool,
}

pub fn run(args: Args, config_path: &Path) -> Result<(), ExitError> {
    let runner = super::build_runner(config_path)?;

    if !args.monitor {
        let state = runner.status(&args.suite)?;
        print_state(&state, args.json, args.detail);
        return Ok(());
    }

    loop {
        // `RunState::load` inside `Runner::status` tolerates the
        // transiently-empty file a concurrent write-replace can leave
        // mid-rename; a genuinely missing suite still surfaces as an
        // error on the very first poll.
        match runner.status(&args.suite) {
            Ok(state) => {
                print!("\x1b[2J\x1b[H");
                print_state(&state, args.json, args.detail);
                if !state.status.is_live() {
                    return Ok(());
                }
            }
            Err(e) if matches!(e, ntn_runner::RunnerError::NoActiveRun(_)) => return Err(e.into()),
            Err(_) => {}
        }
        std::thread::sleep(Duration::from_secs(1));
    }
}

fn print_state(state: &RunState, json: bool, detail: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(state).expect("RunState serializes"));
        return;
    }

    println!("{} {} (pid {})", crate::color::header(&state.suite), state.status, state.pid);
    for scenario in &state.scenarios {
        println!("  {} {}", crate::color::scenario_badge(scenario.status), scenario.name);
        if let Some(reason) = &scenario.skip_reason {
            println!("      {reason}");
        }
        if detail {
            for step in &scenario.steps {
                let message = step.message.as_deref().unwrap_or("");
                println!("      {} {} ({}ms) {}", crate::color::step_badge(step.status), step.name, step.duration_ms, message);
            }
        }
    }
}
