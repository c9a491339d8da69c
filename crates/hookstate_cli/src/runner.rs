//! Scenario runner that replays host events against a page.

use crate::assert::{evaluate_counter, evaluate_field, evaluate_missing, evaluate_text, AssertionResult};
use crate::page::Page;
use crate::report::Report;
use crate::scenario::{Scenario, ScenarioStep};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: Report },
    Failed { report: Report },
}

impl RunOutcome {
    pub fn report(&self) -> &Report {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Replay every step in order, stopping at the first failure
///
/// An event nobody listens to counts as a failure (`dispatch` /
/// `unhandled_event`), which catches misspelled target ids.
pub fn run_scenario(page: &mut Page, scenario: &Scenario) -> RunOutcome {
    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("step {}: {:?}", step_index, step);

        let (assertion, result) = match step {
            ScenarioStep::Change { .. } | ScenarioStep::Click { .. } | ScenarioStep::Submit { .. } => {
                let Some(mut event) = step.to_event() else {
                    continue;
                };
                if page.dispatch(&mut event) > 0 {
                    continue;
                }
                (
                    "dispatch",
                    AssertionResult::Failed {
                        code: "unhandled_event".to_string(),
                        message: format!("{}: no handler for {:?}", event.target, step),
                    },
                )
            }
            ScenarioStep::Mount { id } => {
                if !page.mount(id) {
                    tracing::debug!("step {}: `{}` already mounted", step_index, id);
                }
                continue;
            }
            ScenarioStep::Unmount { id } => {
                if !page.unmount(id) {
                    tracing::debug!("step {}: `{}` was not mounted", step_index, id);
                }
                continue;
            }
            ScenarioStep::AssertText { id, value } => (
                "assert_text",
                evaluate_text(id, value, page.display_text(id).as_deref()),
            ),
            ScenarioStep::AssertMissing { id } => (
                "assert_missing",
                evaluate_missing(id, page.display_text(id).as_deref()),
            ),
            ScenarioStep::AssertField { name, value } => (
                "assert_field",
                evaluate_field(name, value, &page.form_snapshot()),
            ),
            ScenarioStep::AssertCounter { value } => (
                "assert_counter",
                evaluate_counter(*value, page.counter_value()),
            ),
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::warn!("step {} failed: {}", step_index, message);
            let report = Report::failed(
                assertion,
                step_index,
                code,
                message,
                page.counter_value(),
                form_json(page),
            );
            return RunOutcome::Failed { report };
        }
    }

    RunOutcome::Passed {
        report: Report::passed(scenario.steps.len(), page.counter_value(), form_json(page)),
    }
}

fn form_json(page: &Page) -> serde_json::Value {
    serde_json::to_value(&*page.form_snapshot()).unwrap_or(serde_json::Value::Null)
}
