//! Advisory for narrow rules sitting behind broader overlapping ones.
//!
//! Rules already reported as duplicate or unreachable are skipped; their
//! issue carries its own fix.

use crate::check::{Check, LintContext};
use crate::specificity;
use crate::types::{IssueKind, LintIssue, Severity, SuggestedFix};

/// Check code for reorder suggestions.
pub const CODE: &str = "RS006";

/// Suggests moving a more specific rule ahead of the first broader rule it
/// overlaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReorderSuggestion;

impl ReorderSuggestion {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for ReorderSuggestion {
    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "More specific rules placed after broader overlapping rules"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::ReorderSuggestion
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, ctx: &LintContext<'_>) -> Vec<LintIssue> {
        let rules = ctx.rules();
        let redundant = ctx.redundant_indices();
        let mut issues = Vec::new();

        for later in 0..rules.len() {
            if redundant.contains(&later) {
                continue;
            }
            let later_score = specificity::score(&rules[later]);
            let Some(earlier) = ctx
                .graph()
                .neighbors(later)
                .take_while(|&i| i < later)
                .find(|&i| later_score > specificity::score(&rules[i]))
            else {
                continue;
            };

            let issue = self
                .issue(
                    later,
                    format!(
                        "{} is more specific than {} but comes after it; \
                         it only wins where the earlier rule does not match",
                        ctx.label(later),
                        ctx.label(earlier)
                    ),
                )
                .with_related([earlier])
                .with_fix(SuggestedFix::ReorderBefore {
                    from: later,
                    to: earlier,
                });
            issues.push(if ctx.analyzer().relies_on_sampling(earlier, later) {
                issue.heuristic()
            } else {
                issue
            });
        }
        issues
    }
}
