//! Check for malformed path patterns.
//!
//! Purely syntactic: unbalanced `[`/`{`, stray closers and dangling escapes
//! are caught before the glob engine sees the text. A pattern the glob engine
//! rejects for any other reason is reported the same way.

use crate::check::{Check, LintContext};
use crate::types::{IssueKind, LintIssue, Severity};

/// Check code for invalid patterns.
pub const CODE: &str = "RS003";

/// Reports path patterns that cannot be compiled.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvalidPattern;

impl InvalidPattern {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for InvalidPattern {
    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Path patterns that are malformed and never match"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::InvalidPattern
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &LintContext<'_>) -> Vec<LintIssue> {
        let mut issues = Vec::new();
        for (index, rule) in ctx.rules().iter().enumerate() {
            let Some(pattern) = &rule.predicate().file.path_pattern else {
                continue;
            };
            if let Some(err) = pattern.error() {
                issues.push(self.issue(
                    index,
                    format!(
                        "{} has a malformed path pattern `{}`: {err}",
                        ctx.label(index),
                        pattern.as_str()
                    ),
                ));
            }
        }
        issues
    }
}
