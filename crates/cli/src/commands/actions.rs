// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ntn actions`: lists the closed action catalogue straight from
//! `ntn_scenario::schema::ACTIONS` — no separate doc-generation step,
//! the registry is the documentation.

use crate::exit_error::ExitError;
use ntn_scenario::schema::{ActionSpec, ACTIONS};
use serde::Serialize;

#[derive(clap::Args)]
pub struct Args {
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ActionSummary {
    name: &'static str,
    cardinality: &'static str,
    required: Vec<&'static str>,
    optional: Vec<&'static str>,
    default_timeout_secs: u64,
}

pub fn run(args: Args) -> Result<(), ExitError> {
    let mut names: Vec<&&'static str> = ACTIONS.keys().collect();
    names.sort();

    if args.json {
        let summaries: Vec<ActionSummary> = names.into_iter().map(|n| summarize(&ACTIONS[*n])).collect();
        println!("{}", serde_json::to_string_pretty(&summaries).expect("ActionSummary serializes"));
        return Ok(());
    }

    for name in names {
        let spec = &ACTIONS[*name];
        let summary = summarize(spec);
        println!(
            "{:<24} {:<8} required=[{}] optional=[{}] timeout={}s",
            summary.name,
            summary.cardinality,
            summary.required.join(","),
            summary.optional.join(","),
            summary.default_timeout_secs,
        );
    }
    Ok(())
}

fn summarize(spec: &ActionSpec) -> ActionSummary {
    ActionSummary {
        name: spec.name,
        cardinality: cardinality_label(spec.cardinality),
        required: spec.required.iter().map(|p| p.name).collect(),
        optional: spec.optional.iter().map(|p| p.name).collect(),
        default_timeout_secs: spec.default_timeout.as_secs(),
    }
}

fn cardinality_label(c: ntn_scenario::schema::Cardinality) -> &'static str {
    use ntn_scenario::schema::Cardinality::*;
    match c {
        None => "none",
        Single => "single",
        Multi => "multi",
        All => "all",
    }
}
