//! Check trait and the shared lint context.

use std::collections::{BTreeSet, HashSet};

use crate::catalog::CatalogEntry;
use crate::duplicate::{self, Duplicate};
use crate::languages;
use crate::model::Rule;
use crate::overlap::{OverlapAnalyzer, OverlapGraph};
use crate::shadow::{self, Shadowing};
use crate::types::{IssueKind, LintIssue, Severity};

/// A single lint check over a whole rule list.
///
/// Checks never mutate the rule list; they describe fixes through
/// [`crate::SuggestedFix`].
///
/// # Example
///
/// ```ignore
/// use ruleswitch_core::{Check, IssueKind, LintContext, LintIssue, Severity};
///
/// pub struct NoDefaultTarget;
///
/// impl Check for NoDefaultTarget {
///     fn code(&self) -> &'static str { "RS100" }
///     fn kind(&self) -> IssueKind { IssueKind::MissingTarget }
///     fn default_severity(&self) -> Severity { Severity::Warning }
///
///     fn check(&self, ctx: &LintContext<'_>) -> Vec<LintIssue> {
///         ctx.rules()
///             .iter()
///             .enumerate()
///             .filter(|(_, r)| r.target() == "default")
///             .map(|(i, _)| self.issue(i, "rule selects the default target"))
///             .collect()
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Returns the kebab-case name used in configuration.
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Returns the check code (e.g. "RS002").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this check reports.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the issue kind this check emits.
    fn kind(&self) -> IssueKind;

    /// Returns the default severity for issues from this check.
    fn default_severity(&self) -> Severity;

    /// Inspects the rule list and returns any issues found.
    fn check(&self, ctx: &LintContext<'_>) -> Vec<LintIssue>;

    /// Starts an issue with this check's code, kind and default severity.
    fn issue(&self, subject_index: usize, message: String) -> LintIssue {
        LintIssue::new(
            self.code(),
            self.kind(),
            self.default_severity(),
            subject_index,
            message,
        )
    }
}

/// Type alias for boxed Check trait objects.
pub type CheckBox = Box<dyn Check>;

/// Everything a check may look at, computed once per lint pass.
#[derive(Debug)]
pub struct LintContext<'r> {
    rules: &'r [Rule],
    analyzer: OverlapAnalyzer<'r>,
    graph: OverlapGraph,
    extra_languages: &'r HashSet<String>,
    targets: Option<&'r [CatalogEntry]>,
    duplicates: Vec<Duplicate>,
    shadowings: Vec<Shadowing>,
}

impl<'r> LintContext<'r> {
    /// Runs the shared analyses for `rules`.
    #[must_use]
    pub fn new(
        rules: &'r [Rule],
        extra_languages: &'r HashSet<String>,
        targets: Option<&'r [CatalogEntry]>,
    ) -> Self {
        let analyzer = OverlapAnalyzer::new(rules);
        let graph = OverlapGraph::build(&analyzer);
        let duplicates = duplicate::find_duplicates(rules);
        let skip: BTreeSet<usize> = duplicates.iter().map(|d| d.index).collect();
        let shadowings = shadow::find_shadowed(&analyzer, &graph, &skip);
        Self {
            rules,
            analyzer,
            graph,
            extra_languages,
            targets,
            duplicates,
            shadowings,
        }
    }

    /// The rule list under inspection.
    #[must_use]
    pub fn rules(&self) -> &'r [Rule] {
        self.rules
    }

    /// Pairwise overlap queries.
    #[must_use]
    pub fn analyzer(&self) -> &OverlapAnalyzer<'r> {
        &self.analyzer
    }

    /// The overlap relation.
    #[must_use]
    pub fn graph(&self) -> &OverlapGraph {
        &self.graph
    }

    /// Exact duplicates, by redundant index.
    #[must_use]
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }

    /// Shadowed rules, by victim index.
    #[must_use]
    pub fn shadowings(&self) -> &[Shadowing] {
        &self.shadowings
    }

    /// Valid targets, when the host supplied a catalog.
    #[must_use]
    pub fn targets(&self) -> Option<&'r [CatalogEntry]> {
        self.targets
    }

    /// Returns true if `id` is a built-in or host-supplied language.
    #[must_use]
    pub fn is_known_language(&self, id: &str) -> bool {
        languages::is_builtin(id) || self.extra_languages.contains(id)
    }

    /// Short human reference to a rule, e.g. ``rule #2 `ts tests` ``.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        match self.rules.get(index) {
            Some(rule) => format!("rule #{index} `{}`", rule.name()),
            None => format!("rule #{index}"),
        }
    }

    /// Indices already reported as duplicate or unreachable.
    #[must_use]
    pub fn redundant_indices(&self) -> BTreeSet<usize> {
        self.duplicates
            .iter()
            .map(|d| d.index)
            .chain(self.shadowings.iter().map(|s| s.victim))
            .collect()
    }
}
