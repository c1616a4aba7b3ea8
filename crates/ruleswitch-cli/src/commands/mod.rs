//! Subcommand implementations.

pub mod eval;
pub mod fix;
pub mod init;
pub mod lint;
pub mod list_checks;
pub mod output;

use anyhow::{bail, Context, Result};
use ruleswitch_core::checks::check_by_name;
use ruleswitch_core::{CatalogCache, CatalogEntry, CheckBox, Config, Linter, Rule};
use std::path::{Path, PathBuf};

use crate::catalog_file::FileCatalog;
use crate::config_resolver::ConfigSource;
use crate::rules_file;

/// Rule file from the command line, else the resolved config file.
pub fn rules_path(file: Option<&Path>, source: &ConfigSource) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file.to_path_buf());
    }
    match source.path() {
        Some(path) => Ok(path.to_path_buf()),
        None => bail!("No rule file given and no ruleswitch.toml found. Run: ruleswitch init"),
    }
}

/// Loads config and rules together.
pub fn load_inputs(
    file: Option<&Path>,
    source: &ConfigSource,
) -> Result<(Config, PathBuf, Vec<Rule>)> {
    let config = source.load()?;
    let path = rules_path(file, source)?;
    let rules = rules_file::load(&path)?;
    Ok((config, path, rules))
}

/// Catalog file from `--targets`, else `[catalog] path` relative to the config.
pub fn catalog_path(
    override_path: Option<&Path>,
    config: &Config,
    source: &ConfigSource,
) -> Option<PathBuf> {
    if let Some(p) = override_path {
        return Some(p.to_path_buf());
    }
    let configured = config.catalog.path.as_ref()?;
    if configured.is_absolute() {
        Some(configured.clone())
    } else {
        Some(source.base_dir().join(configured))
    }
}

/// Fetches valid targets through `cache`; `None` when no catalog is configured.
pub fn fetch_targets(
    cache: &mut CatalogCache,
    path: Option<&Path>,
) -> Result<Option<Vec<CatalogEntry>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let catalog = FileCatalog::new(path);
    let entries = cache
        .entries(&catalog, false)
        .context("Failed to load target catalog")?;
    Ok(Some(entries.to_vec()))
}

/// Resolves a comma-separated list of check names or codes.
pub fn filter_checks(filter: &str) -> Vec<CheckBox> {
    let mut selected = Vec::new();
    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match check_by_name(name) {
            Some(check) => selected.push(check),
            None => tracing::warn!("Unknown check: {}", name),
        }
    }
    selected
}

/// Builds a linter from config plus command-line overrides.
pub fn build_linter(
    config: Config,
    checks: Option<&str>,
    known_languages: Vec<String>,
    targets: Option<Vec<CatalogEntry>>,
) -> Result<Linter> {
    let mut builder = Linter::builder()
        .config(config)
        .known_languages(known_languages);
    if let Some(filter) = checks {
        let selected = filter_checks(filter);
        if selected.is_empty() {
            bail!("No known checks in --checks {filter:?}. Run: ruleswitch list-checks");
        }
        builder = builder.checks(selected);
    }
    if let Some(entries) = targets {
        builder = builder.targets(entries);
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_beats_config() {
        let source = ConfigSource::Project(PathBuf::from("/p/ruleswitch.toml"));
        assert_eq!(
            rules_path(Some(Path::new("rules.json")), &source).unwrap(),
            PathBuf::from("rules.json")
        );
        assert_eq!(
            rules_path(None, &source).unwrap(),
            PathBuf::from("/p/ruleswitch.toml")
        );
        assert!(rules_path(None, &ConfigSource::Default).is_err());
    }

    #[test]
    fn catalog_path_is_relative_to_config() {
        let source = ConfigSource::Project(PathBuf::from("/p/ruleswitch.toml"));
        let config = Config::parse("[catalog]\npath = \"targets.json\"\n").unwrap();
        assert_eq!(
            catalog_path(None, &config, &source),
            Some(PathBuf::from("/p/targets.json"))
        );
        assert_eq!(
            catalog_path(Some(Path::new("/x.json")), &config, &source),
            Some(PathBuf::from("/x.json"))
        );
        assert_eq!(catalog_path(None, &Config::default(), &source), None);
    }

    #[test]
    fn filter_accepts_names_and_codes() {
        let checks = filter_checks("duplicate, rs002,bogus");
        let codes: Vec<_> = checks.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec!["RS001", "RS002"]);
    }

    #[test]
    fn empty_filter_is_rejected() {
        assert!(build_linter(Config::default(), Some("bogus"), Vec::new(), None).is_err());
        let linter = build_linter(Config::default(), None, Vec::new(), None).unwrap();
        assert_eq!(linter.check_count(), 7);
    }
}
