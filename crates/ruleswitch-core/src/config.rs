//! Configuration types for ruleswitch.
//!
//! The same TOML file may also carry the `[[rules]]` list; that key is read by
//! [`crate::ruleset`] and ignored here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::Severity;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Lint settings.
    #[serde(default)]
    pub lint: LintConfig,

    /// Target catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Per-check overrides, keyed by check name (e.g. "unreachable").
    #[serde(default)]
    pub checks: HashMap<String, CheckConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a check is enabled.
    #[must_use]
    pub fn is_check_enabled(&self, name: &str) -> bool {
        self.checks
            .get(name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a check.
    #[must_use]
    pub fn check_severity(&self, name: &str) -> Option<Severity> {
        self.checks.get(name).and_then(|c| c.severity)
    }

    /// Severity at or above which a lint run fails (default: error).
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.lint.fail_on.unwrap_or(Severity::Error)
    }
}

/// Lint-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    /// Extra language identifiers, unioned with the built-in set.
    #[serde(default)]
    pub known_languages: Vec<String>,

    /// Exit-code threshold.
    #[serde(default)]
    pub fail_on: Option<Severity>,
}

/// Target catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file listing valid targets as `[{ "id": ..., "label": ... }]`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Cache lifetime in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl CatalogConfig {
    /// Cache lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    300
}

/// Per-check configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Whether this check runs.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this check.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
