//! Advisory for language identifiers outside the known set.

use crate::check::{Check, LintContext};
use crate::types::{IssueKind, LintIssue, Severity};

/// Check code for unknown languages.
pub const CODE: &str = "RS004";

/// Reports language identifiers that are neither built in nor host-supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownLanguage;

impl UnknownLanguage {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for UnknownLanguage {
    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Language identifiers not in the built-in or configured set"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::InvalidLanguage
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, ctx: &LintContext<'_>) -> Vec<LintIssue> {
        ctx.rules()
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                let language = rule.predicate().file.language.as_deref()?;
                (!ctx.is_known_language(language)).then(|| {
                    self.issue(
                        index,
                        format!("{} uses unknown language `{language}`", ctx.label(index)),
                    )
                })
            })
            .collect()
    }
}
