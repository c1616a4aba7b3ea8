//! Check for rules an earlier rule always beats.
//!
//! # Suggested fixes
//!
//! - The victim is strictly more specific: move it before its shadower.
//! - Otherwise, different targets: merge the two (conflicting intent).
//! - Otherwise: delete the victim.

use crate::check::{Check, LintContext};
use crate::shadow::Shadowing;
use crate::specificity;
use crate::types::{IssueKind, LintIssue, Severity, SuggestedFix};

/// Check code for unreachable rules.
pub const CODE: &str = "RS002";

/// Reports rules that can never win because an earlier rule covers them.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableRule;

impl UnreachableRule {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for UnreachableRule {
    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Rules shadowed by an earlier, broader rule"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Unreachable
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &LintContext<'_>) -> Vec<LintIssue> {
        ctx.shadowings()
            .iter()
            .map(|s| {
                let issue = self
                    .issue(
                        s.victim,
                        format!(
                            "{} can never match: {} matches every context it does",
                            ctx.label(s.victim),
                            ctx.label(s.shadowed_by)
                        ),
                    )
                    .with_related([s.shadowed_by])
                    .with_fix(suggest_fix(ctx, s));
                if s.heuristic {
                    issue.heuristic()
                } else {
                    issue
                }
            })
            .collect()
    }
}

fn suggest_fix(ctx: &LintContext<'_>, s: &Shadowing) -> SuggestedFix {
    let rules = ctx.rules();
    let (earlier, later) = (&rules[s.shadowed_by], &rules[s.victim]);
    if specificity::score(later) > specificity::score(earlier) {
        SuggestedFix::ReorderBefore {
            from: s.victim,
            to: s.shadowed_by,
        }
    } else if later.target() != earlier.target() {
        SuggestedFix::Merge {
            indices: vec![s.shadowed_by, s.victim],
        }
    } else {
        SuggestedFix::Delete {
            indices: vec![s.victim],
        }
    }
}
