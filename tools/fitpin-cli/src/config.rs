//! CLI configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use fitpin_client::{ApiConfig, SessionContext};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["fitpin.toml", ".fitpin.toml", "fitpin.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend endpoints.
    #[serde(default)]
    pub api: ApiConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Signed-in user.
    #[serde(default)]
    pub session: SessionContext,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Set a value by dot-separated key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "data_url"] => self.api.data_url = value.to_string(),
            ["api", "ar_url"] => self.api.ar_url = optional(value),
            ["api", "timeout_ms"] => self.api.timeout_ms = optional(value).map(|v| v.parse()).transpose()?,
            ["api", "max_retries"] => self.api.max_retries = optional(value).map(|v| v.parse()).transpose()?,
            ["logging", "level"] => self.logging.level = value.to_string(),
            ["logging", "format"] => self.logging.format = value.parse()?,
            _ => bail!("Unknown or read-only config key: {}", key),
        }

        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Empty string or `none` clears an optional key.
fn optional(value: &str) -> Option<String> {
    match value.trim() {
        "" | "none" | "null" => None,
        v => Some(v.to_string()),
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn or error.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => bail!("Unknown log format: {} (expected compact, pretty or json)", other),
        }
    }
}

/// Generate a default fitpin.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# FitPin client configuration

[api]
data_url = "{data_url}"
# ar_url = "http://localhost:5000"
# timeout_ms = 10000
# max_retries = 2

[logging]
level = "warn"
format = "compact"

[session]
# email = "me@example.com"
# name = "FitPin"
# height = 172.0
"#,
        data_url = fitpin_client::DEFAULT_DATA_URL
    )
}
