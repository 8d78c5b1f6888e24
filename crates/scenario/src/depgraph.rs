// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency resolution: scenarios declare `requires`; the engine
//! topologically sorts them and rejects cycles at parse time, before any
//! device is touched.

use crate::error::ScenarioError;
use crate::scenario::Scenario;
use indexmap::IndexMap;

/// Topologically sort `scenarios` by `requires`, returning them in an
/// order where every scenario appears after everything it requires.
/// Ties (independent scenarios) keep their original relative order —
/// depth-first postorder over the input sequence, not an unstable
/// Kahn's-algorithm queue, so a suite's scenario list reads top-to-bottom
/// whenever dependencies allow it.
pub fn topological_order(scenarios: &[Scenario]) -> Result<Vec<usize>, ScenarioError> {
    let index_by_name: IndexMap<&str, usize> =
        scenarios.iter().enumerate().map(|(i, s)| (s.name.as_str(), i)).collect();

    for scenario in scenarios {
        for dep in &scenario.requires {
            if !index_by_name.contains_key(dep.as_str()) {
                return Err(ScenarioError::MissingDependency {
                    scenario: scenario.name.clone(),
                    requires: dep.clone(),
                });
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; scenarios.len()];
    let mut order = Vec::with_capacity(scenarios.len());

    fn visit(
        i: usize,
        scenarios: &[Scenario],
        index_by_name: &IndexMap<&str, usize>,
        marks: &mut [Mark],
        order: &mut Vec<usize>,
        stack: &mut Vec<String>,
    ) -> Result<(), ScenarioError> {
        match marks[i] {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                stack.push(scenarios[i].name.clone());
                return Err(ScenarioError::Cycle(stack.join(" -> ")));
            }
            Mark::Unvisited => {}
        }
        marks[i] = Mark::InProgress;
        stack.push(scenarios[i].name.clone());
        for dep in &scenarios[i].requires {
            let j = index_by_name[dep.as_str()];
            visit(j, scenarios, index_by_name, marks, order, stack)?;
        }
        stack.pop();
        marks[i] = Mark::Done;
        order.push(i);
        Ok(())
    }

    for i in 0..scenarios.len() {
        if marks[i] == Mark::Unvisited {
            let mut stack = Vec::new();
            visit(i, scenarios, &index_by_name, &mut marks, &mut order, &mut stack)?;
        }
    }

    Ok(order)
}

#[cfg(test)]
#[path = "depgraph_tests.rs"]
mod tests;
