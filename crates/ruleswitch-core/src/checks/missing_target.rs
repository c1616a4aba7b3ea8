//! Check for targets absent from the host catalog.

use std::collections::HashSet;

use crate::check::{Check, LintContext};
use crate::types::{IssueKind, LintIssue, Severity};

/// Check code for missing targets.
pub const CODE: &str = "RS005";

/// Reports rules selecting a target the catalog does not list.
///
/// Silent when no catalog was supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingTarget;

impl MissingTarget {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for MissingTarget {
    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Targets not present in the target catalog"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::MissingTarget
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &LintContext<'_>) -> Vec<LintIssue> {
        let Some(entries) = ctx.targets() else {
            return Vec::new();
        };
        let valid: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        ctx.rules()
            .iter()
            .enumerate()
            .filter(|(_, rule)| !valid.contains(rule.target()))
            .map(|(index, rule)| {
                self.issue(
                    index,
                    format!(
                        "{} selects `{}`, which is not in the target catalog",
                        ctx.label(index),
                        rule.target()
                    ),
                )
            })
            .collect()
    }
}
