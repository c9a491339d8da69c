//! Page configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level page configuration (hookstate.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageConfig {
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub counter: CounterConfig,
}

/// Controlled multi-field form
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormConfig {
    /// Element id that change and submit events target
    #[serde(default = "default_form_id")]
    pub id: String,
    /// Reject changes to fields not listed in `fields`
    #[serde(default)]
    pub strict: bool,
    #[serde(default = "default_form_reset")]
    pub reset_button: String,
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub default: String,
}

fn default_form_id() -> String {
    "login".to_string()
}

fn default_fields() -> Vec<FieldConfig> {
    ["id", "password"]
        .into_iter()
        .map(|name| FieldConfig {
            name: name.to_string(),
            default: String::new(),
        })
        .collect()
}

fn default_form_reset() -> String {
    "loginReset".to_string()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            id: default_form_id(),
            strict: false,
            reset_button: default_form_reset(),
            fields: default_fields(),
        }
    }
}

impl FormConfig {
    /// Display element echoing the value of `field`
    pub fn field_display_id(&self, field: &str) -> String {
        format!("{}.{}", self.id, field)
    }
}

/// Single controlled text input
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    #[serde(default = "default_input_id")]
    pub id: String,
    /// Display element echoing the input value
    #[serde(default = "default_input_display")]
    pub display: String,
    #[serde(default = "default_input_reset")]
    pub reset_button: String,
}

fn default_input_id() -> String {
    "textInput".to_string()
}

fn default_input_display() -> String {
    "inputValue".to_string()
}

fn default_input_reset() -> String {
    "inputReset".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            id: default_input_id(),
            display: default_input_display(),
            reset_button: default_input_reset(),
        }
    }
}

/// Counter and its buttons
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CounterConfig {
    #[serde(default = "default_counter_display")]
    pub display: String,
    #[serde(default = "default_increment")]
    pub increment: String,
    #[serde(default = "default_decrement")]
    pub decrement: String,
    /// Mount the display element when the page is built
    #[serde(default = "default_true")]
    pub mount_display: bool,
}

fn default_counter_display() -> String {
    "countValue".to_string()
}

fn default_increment() -> String {
    "incrementBtn".to_string()
}

fn default_decrement() -> String {
    "decrementBtn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            display: default_counter_display(),
            increment: default_increment(),
            decrement: default_decrement(),
            mount_display: true,
        }
    }
}

impl PageConfig {
    /// Load configuration from a file, or from `hookstate.toml` in a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("hookstate.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No config found at {}. Run `hookstate init-config` to create one.",
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
