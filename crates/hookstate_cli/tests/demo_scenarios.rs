//! The bundled demo scenarios replay as documented.

use hookstate_cli::{run_scenario, Page, PageConfig, ReportStatus, Scenario};
use pretty_assertions::assert_eq;

const CONFIG: &str = include_str!("../../../demos/hookstate.toml");
const STRICT_CONFIG: &str = include_str!("../../../demos/strict.toml");

fn replay(config: &str, scenario: &str) -> hookstate_cli::RunOutcome {
    let config = PageConfig::from_toml_str(config).unwrap();
    let scenario = Scenario::from_json(scenario).unwrap();
    let mut page = Page::build(config);
    run_scenario(&mut page, &scenario)
}

#[test]
fn login_demo_passes() {
    let outcome = replay(CONFIG, include_str!("../../../demos/login.json"));
    let report = outcome.report();

    assert_eq!(report.status, ReportStatus::Passed, "{:?}", report);
    assert_eq!(report.form, serde_json::json!({"id": "", "password": ""}));
}

#[test]
fn counter_demo_passes() {
    let outcome = replay(CONFIG, include_str!("../../../demos/counter.json"));
    let report = outcome.report();

    assert_eq!(report.status, ReportStatus::Passed, "{:?}", report);
    assert_eq!(report.counter, 1);
}

#[test]
fn strict_demo_rejects_unknown_field() {
    let outcome = replay(STRICT_CONFIG, include_str!("../../../demos/strict.json"));
    let report = outcome.report();

    assert_eq!(report.status, ReportStatus::Failed);
    assert_eq!(report.failed_step_index, Some(1));
    assert_eq!(report.code.as_deref(), Some("missing_field"));
}

#[test]
fn permissive_form_accepts_unknown_field() {
    let outcome = replay(CONFIG, include_str!("../../../demos/strict.json"));
    assert_eq!(outcome.report().status, ReportStatus::Passed);
}
