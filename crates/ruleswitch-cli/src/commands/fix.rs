//! Fix command implementation.
//!
//! Lints, applies the first suggested fix through a [`RuleStore`], and
//! repeats against the new revision until nothing fixable is left.

use anyhow::{Context, Result};
use ruleswitch_core::{CatalogCache, IssueKind, LintIssue, Linter, SuggestedFix};
use ruleswitch_store::{NoPersist, RuleStore};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::persist::FilePersist;

/// Runs the fix command.
pub fn run(
    file: Option<&Path>,
    source: &ConfigSource,
    dry_run: bool,
    reorder: bool,
) -> Result<()> {
    let (config, path, rules) = super::load_inputs(file, source)?;

    let mut cache = CatalogCache::new(config.catalog.ttl());
    let catalog = super::catalog_path(None, &config, source);
    let targets = super::fetch_targets(&mut cache, catalog.as_deref())?;
    let linter = super::build_linter(config, None, Vec::new(), targets)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    let applied = runtime.block_on(async {
        let store = if dry_run {
            RuleStore::spawn(rules, NoPersist)
        } else {
            RuleStore::spawn(rules, FilePersist::new(&path))
        };
        apply_fixes(&store, &linter, reorder).await
    })?;

    let verb = if dry_run { "Would apply" } else { "Applied" };
    println!(
        "{verb} {} fix(es) to {} ({} rule(s) remain)",
        applied.fixes,
        path.display(),
        applied.remaining
    );
    Ok(())
}

struct Outcome {
    fixes: usize,
    remaining: usize,
}

fn fixable(issue: &LintIssue, reorder: bool) -> Option<&SuggestedFix> {
    if issue.kind == IssueKind::ReorderSuggestion && !reorder {
        return None;
    }
    issue.suggested_fix.as_ref()
}

async fn apply_fixes(store: &RuleStore, linter: &Linter, reorder: bool) -> Result<Outcome> {
    let mut snapshot = store.snapshot().await?;
    let max_rounds = snapshot.rules.len() * 4 + 10;
    let mut fixes = 0;

    for _ in 0..max_rounds {
        let report = linter.lint(&snapshot.rules);
        let Some((issue, fix)) = report
            .issues
            .iter()
            .find_map(|issue| fixable(issue, reorder).map(|fix| (issue, fix.clone())))
        else {
            return Ok(Outcome {
                fixes,
                remaining: snapshot.rules.len(),
            });
        };

        println!(
            "{} {}: {} ({})",
            issue.code,
            issue.kind,
            fix,
            snapshot
                .rules
                .get(issue.subject_index)
                .map_or("?", |r| r.name())
        );
        snapshot = store
            .apply_fix(fix, Some(snapshot.revision))
            .await
            .with_context(|| {
                format!(
                    "Failed to apply fix for {} at rule #{}",
                    issue.code, issue.subject_index
                )
            })?;
        fixes += 1;
    }

    tracing::warn!("Stopped after {max_rounds} round(s); fixes may be cycling");
    Ok(Outcome {
        fixes,
        remaining: snapshot.rules.len(),
    })
}
