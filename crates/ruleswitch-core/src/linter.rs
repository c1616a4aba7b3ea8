//! Lint aggregation: runs checks over a rule list and collects a report.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::catalog::CatalogEntry;
use crate::check::{Check, CheckBox, LintContext};
use crate::checks;
use crate::config::Config;
use crate::model::Rule;
use crate::types::{LintIssue, LintReport};

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    checks: Vec<CheckBox>,
    config: Option<Config>,
    known_languages: HashSet<String>,
    targets: Option<Vec<CatalogEntry>>,
}

impl LinterBuilder {
    /// Creates a new builder with no checks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check.
    #[must_use]
    pub fn check<C: Check + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Adds a boxed check.
    #[must_use]
    pub fn check_box(mut self, check: CheckBox) -> Self {
        self.checks.push(check);
        self
    }

    /// Adds several boxed checks.
    #[must_use]
    pub fn checks(mut self, checks: impl IntoIterator<Item = CheckBox>) -> Self {
        self.checks.extend(checks);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Adds a host-supplied language identifier.
    #[must_use]
    pub fn known_language(mut self, id: impl Into<String>) -> Self {
        self.known_languages.insert(id.into());
        self
    }

    /// Adds several host-supplied language identifiers.
    #[must_use]
    pub fn known_languages<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_languages.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Supplies the target catalog; without one the missing-target check is
    /// silent.
    #[must_use]
    pub fn targets(mut self, entries: Vec<CatalogEntry>) -> Self {
        self.targets = Some(entries);
        self
    }

    /// Builds the linter. With no explicit checks, all built-in checks run.
    #[must_use]
    pub fn build(self) -> Linter {
        let config = self.config.unwrap_or_default();
        let mut known_languages = self.known_languages;
        known_languages.extend(config.lint.known_languages.iter().cloned());
        let checks = if self.checks.is_empty() {
            checks::all_checks()
        } else {
            self.checks
        };
        Linter {
            checks,
            config,
            known_languages,
            targets: self.targets,
        }
    }
}

/// Runs a fixed set of checks over rule lists.
///
/// Use [`Linter::builder()`] to construct an instance.
pub struct Linter {
    checks: Vec<CheckBox>,
    config: Config,
    known_languages: HashSet<String>,
    targets: Option<Vec<CatalogEntry>>,
}

impl Linter {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lints a rule list. Never mutates it.
    #[must_use]
    pub fn lint(&self, rules: &[Rule]) -> LintReport {
        info!(rules = rules.len(), checks = self.checks.len(), "linting rule list");
        let ctx = LintContext::new(rules, &self.known_languages, self.targets.as_deref());
        debug!(
            overlaps = ctx.graph().edge_count(),
            duplicates = ctx.duplicates().len(),
            shadowed = ctx.shadowings().len(),
            "shared analysis complete"
        );

        let mut issues = Vec::new();
        for check in &self.checks {
            if !self.config.is_check_enabled(check.name()) {
                debug!(check = check.name(), "skipping disabled check");
                continue;
            }
            let found = check.check(&ctx);
            debug!(check = check.name(), issues = found.len(), "check complete");
            issues.extend(self.apply_severity_override(check.name(), found));
        }

        let report = LintReport::new(issues, rules.len());
        info!(
            errors = report.stats.errors,
            warnings = report.stats.warnings,
            infos = report.stats.infos,
            "lint complete"
        );
        report
    }

    fn apply_severity_override(&self, name: &str, mut issues: Vec<LintIssue>) -> Vec<LintIssue> {
        if let Some(severity) = self.config.check_severity(name) {
            for issue in &mut issues {
                issue.severity = severity;
            }
        }
        issues
    }
}

/// Lints a rule list with every built-in check and default configuration.
#[must_use]
pub fn lint(rules: &[Rule]) -> LintReport {
    Linter::builder().build().lint(rules)
}
