//! Locates `ruleswitch.toml`.
//!
//! Priority order:
//!
//! 1. `--config` flag
//! 2. `./ruleswitch.toml`, then `./.ruleswitch.toml`
//! 3. `$RULESWITCH_CONFIG_DIR/config.toml`, else `~/.ruleswitch/config.toml`
//! 4. Nothing found: built-in defaults, and no default rule file

use anyhow::{Context, Result};
use ruleswitch_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Directory that relative paths inside the config are resolved against.
    #[must_use]
    pub fn base_dir(&self) -> PathBuf {
        self.path()
            .and_then(Path::parent)
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    /// Reads and parses the config, or returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a resolved file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["ruleswitch.toml", ".ruleswitch.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// `$RULESWITCH_CONFIG_DIR`, else `~/.ruleswitch/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("RULESWITCH_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".ruleswitch"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_without_existence_check() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("ruleswitch.toml"), "").unwrap();
        let result = resolve_inner(project.path(), Some(Path::new("/missing.toml")), None);
        assert_eq!(result, ConfigSource::Explicit(PathBuf::from("/missing.toml")));
    }

    #[test]
    fn plain_name_preferred_over_dotfile() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".ruleswitch.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Project(project.path().join(".ruleswitch.toml"))
        );
        fs::write(project.path().join("ruleswitch.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Project(project.path().join("ruleswitch.toml"))
        );
    }

    #[test]
    fn global_is_the_fallback() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let global_dir = Some(global.path().to_path_buf());
        assert_eq!(
            resolve_inner(project.path(), None, global_dir.clone()),
            ConfigSource::Default
        );

        fs::write(global.path().join("config.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(project.path(), None, global_dir.clone()),
            ConfigSource::Global(global.path().join("config.toml"))
        );

        fs::write(project.path().join("ruleswitch.toml"), "").unwrap();
        assert!(matches!(
            resolve_inner(project.path(), None, global_dir),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn default_source_loads_defaults() {
        let config = ConfigSource::Default.load().unwrap();
        assert!(config.checks.is_empty());
        assert_eq!(ConfigSource::Default.base_dir(), PathBuf::from("."));
    }

    #[test]
    fn base_dir_is_config_parent() {
        let source = ConfigSource::Project(PathBuf::from("/work/app/ruleswitch.toml"));
        assert_eq!(source.base_dir(), PathBuf::from("/work/app"));
    }

    #[test]
    fn broken_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ruleswitch.toml");
        fs::write(&path, "[lint\n").unwrap();
        assert!(ConfigSource::Explicit(path).load().is_err());
    }
}
