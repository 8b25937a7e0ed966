//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use fitpin_client::FitpinApi;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the config came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Build the backend client from the config.
    pub fn api(&self) -> Result<FitpinApi> {
        FitpinApi::connect(self.config.api.clone()).context("Failed to create HTTP client")
    }

    /// Path writes go to: the loaded file, else `fitpin.toml` in the cwd.
    pub fn write_path(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| self.cwd.join(CONFIG_NAMES[0]))
    }

    /// Persist a changed config.
    pub fn save(&self, config: &CliConfig) -> Result<PathBuf> {
        let path = self.write_path();
        config.save(&path)?;
        Ok(path)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in `start` or its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}
