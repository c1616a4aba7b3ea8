//! Lint command implementation.

use anyhow::Result;
use ruleswitch_core::CatalogCache;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments for `ruleswitch lint`.
pub struct LintArgs<'a> {
    pub file: Option<&'a Path>,
    pub source: &'a ConfigSource,
    pub format: OutputFormat,
    pub known_languages: Vec<String>,
    pub targets: Option<&'a Path>,
    pub checks: Option<String>,
}

/// Runs the lint command.
pub fn run(args: &LintArgs<'_>) -> Result<()> {
    let (config, path, rules) = super::load_inputs(args.file, args.source)?;
    let fail_on = config.fail_on();

    let mut cache = CatalogCache::new(config.catalog.ttl());
    let catalog = super::catalog_path(args.targets, &config, args.source);
    let targets = super::fetch_targets(&mut cache, catalog.as_deref())?;

    let linter = super::build_linter(
        config,
        args.checks.as_deref(),
        args.known_languages.clone(),
        targets,
    )?;

    tracing::info!(
        "Linting {} rule(s) from {} with {} check(s)",
        rules.len(),
        path.display(),
        linter.check_count()
    );

    let report = linter.lint(&rules);
    super::output::print(&report, &rules, &path, args.format)?;

    if report.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}
