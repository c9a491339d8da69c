//! Scenario definition for headless replays.

use anyhow::{Context, Result};
use hookstate_core::Event;
use serde::Deserialize;
use std::path::Path;

/// Ordered host events and assertions.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse scenario {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// A control inside `target` changed; `name` is the control's name
    Change {
        target: String,
        #[serde(default)]
        name: String,
        value: String,
    },
    Click {
        target: String,
    },
    Submit {
        target: String,
    },
    Mount {
        id: String,
    },
    Unmount {
        id: String,
    },
    AssertText {
        id: String,
        value: String,
    },
    AssertMissing {
        id: String,
    },
    AssertField {
        name: String,
        value: String,
    },
    AssertCounter {
        value: i64,
    },
}

impl ScenarioStep {
    /// Host event for event steps; `None` for mounts and assertions
    pub fn to_event(&self) -> Option<Event> {
        match self {
            ScenarioStep::Change {
                target,
                name,
                value,
            } => Some(Event::change(target.as_str(), name.as_str(), value.as_str())),
            ScenarioStep::Click { target } => Some(Event::click(target.as_str())),
            ScenarioStep::Submit { target } => Some(Event::submit(target.as_str())),
            _ => None,
        }
    }
}
