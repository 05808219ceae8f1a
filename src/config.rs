//! Configuration handling for vault-search.
//!
//! Settings come from an optional TOML file; anything missing falls back to
//! the defaults below. CLI flags are applied on top by the binary.

use crate::error::{Result, VaultSearchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Search engine configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// How the external search engine is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search program, looked up on PATH
    #[serde(default = "default_program")]
    pub program: String,

    /// Extra arguments placed before the pattern
    #[serde(default)]
    pub args: Vec<String>,

    /// Note file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Per-call time limit in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_program() -> String {
    "rg".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            extension: default_extension(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Result display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Maximum results shown
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. A missing default file just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    VaultSearchError::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&text)
            }
            None => match default_config_path() {
                Some(path) if path.is_file() => {
                    let text = std::fs::read_to_string(&path)?;
                    Self::from_toml(&text)
                }
                _ => Ok(Self::default()),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.search.program.trim().is_empty() {
            return Err(VaultSearchError::Config(
                "search.program must not be empty".to_string(),
            ));
        }
        if self.search.timeout_secs == 0 {
            return Err(VaultSearchError::Config(
                "search.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.search.extension.is_empty() || self.search.extension.starts_with('.') {
            return Err(VaultSearchError::Config(
                "search.extension must be a bare extension like \"md\"".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default config path: `<config dir>/vault-search/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vault-search").join("config.toml"))
}
