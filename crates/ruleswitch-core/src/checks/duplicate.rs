//! Check for rules that repeat an earlier rule verbatim.

use crate::check::{Check, LintContext};
use crate::types::{IssueKind, LintIssue, Severity, SuggestedFix};

/// Check code for duplicate rules.
pub const CODE: &str = "RS001";

/// Reports rules whose predicate and target repeat an earlier rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateRule;

impl DuplicateRule {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for DuplicateRule {
    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Rules with the same predicate and target as an earlier rule"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Duplicate
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &LintContext<'_>) -> Vec<LintIssue> {
        ctx.duplicates()
            .iter()
            .map(|d| {
                self.issue(
                    d.index,
                    format!(
                        "{} duplicates {}",
                        ctx.label(d.index),
                        ctx.label(d.original)
                    ),
                )
                .with_related([d.original])
                .with_fix(SuggestedFix::Delete {
                    indices: vec![d.index],
                })
            })
            .collect()
    }
}
