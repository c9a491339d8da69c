//! Headless host for hookstate components
//!
//! Builds a demo page (login form, single text input, counter) from a TOML
//! config, replays a JSON scenario of host events against it, and reports
//! the outcome as JSON.

pub mod assert;
pub mod config;
pub mod page;
pub mod report;
pub mod runner;
pub mod scenario;

pub use config::PageConfig;
pub use page::Page;
pub use report::{Report, ReportStatus};
pub use runner::{run_scenario, RunOutcome};
pub use scenario::{Scenario, ScenarioStep};
