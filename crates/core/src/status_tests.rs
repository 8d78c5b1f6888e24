// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn severity_ordering_matches_spec() {
    assert!(StepStatus::Passed < StepStatus::Skipped);
    assert!(StepStatus::Skipped < StepStatus::Failed);
    assert!(StepStatus::Failed < StepStatus::Error);
}

#[test]
fn rollup_picks_most_severe() {
    let statuses = [StepStatus::Passed, StepStatus::Failed, StepStatus::Skipped];
    assert_eq!(StepStatus::rollup(statuses), StepStatus::Failed);
}

#[test]
fn rollup_of_empty_is_passed() {
    assert_eq!(StepStatus::rollup(std::iter::empty()), StepStatus::Passed);
}

#[test]
fn rollup_is_order_independent() {
    let a = [StepStatus::Error, StepStatus::Passed, StepStatus::Failed];
    let b = [StepStatus::Passed, StepStatus::Failed, StepStatus::Error];
    assert_eq!(StepStatus::rollup(a), StepStatus::rollup(b));
}

#[test]
fn suite_finalize_is_failed_if_any_scenario_failed() {
    let statuses = [ScenarioStatus::Passed, ScenarioStatus::Skipped, ScenarioStatus::Failed];
    assert_eq!(SuiteStatus::finalize(statuses), SuiteStatus::Failed);
}

#[test]
fn suite_finalize_is_complete_if_no_failures() {
    let statuses = [ScenarioStatus::Passed, ScenarioStatus::Skipped];
    assert_eq!(SuiteStatus::finalize(statuses), SuiteStatus::Complete);
}

#[test]
fn scenario_status_passed_gates_dependents() {
    assert!(ScenarioStatus::Passed.is_passed());
    assert!(!ScenarioStatus::Skipped.is_passed());
    assert!(!ScenarioStatus::Failed.is_passed());
}
