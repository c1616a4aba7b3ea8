//! Check for rules with no predicate at all.

use crate::check::{Check, LintContext};
use crate::types::{IssueKind, LintIssue, Severity};

/// Check code for degenerate rules.
pub const CODE: &str = "RS007";

/// Reports rules that match every ordinary pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysMatches;

impl AlwaysMatches {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for AlwaysMatches {
    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Rules without any predicate"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::AlwaysMatches
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &LintContext<'_>) -> Vec<LintIssue> {
        let rules = ctx.rules();
        rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.predicate().is_empty())
            .map(|(index, _)| {
                let mut message = format!(
                    "{} declares no predicate and matches every ordinary pass",
                    ctx.label(index)
                );
                if index + 1 < rules.len() {
                    message.push_str("; rules after it can only win on timer passes");
                }
                self.issue(index, message)
            })
            .collect()
    }
}
