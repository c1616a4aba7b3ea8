//! Lint issue and report types.

use std::fmt;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// Caveat appended to messages derived from the sampling oracle.
pub const HEURISTIC_CAVEAT: &str = "(heuristic: based on sampled paths)";

/// Severity level for lint issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational advice, never fails a lint run.
    Info,
    /// Should be addressed.
    Warning,
    /// Must be fixed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown severity `{other}`: expected info, warning or error"
            )),
        }
    }
}

/// The defect category of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// Same predicate and target as an earlier rule.
    Duplicate,
    /// An earlier rule always wins first.
    Unreachable,
    /// The path pattern is malformed.
    InvalidPattern,
    /// The language identifier is not known.
    InvalidLanguage,
    /// The target is not in the catalog.
    MissingTarget,
    /// A narrower rule sits behind a broader overlapping one.
    ReorderSuggestion,
    /// The rule declares no predicate at all.
    AlwaysMatches,
}

impl IssueKind {
    /// Returns the kebab-case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::Unreachable => "unreachable",
            Self::InvalidPattern => "invalid-pattern",
            Self::InvalidLanguage => "invalid-language",
            Self::MissingTarget => "missing-target",
            Self::ReorderSuggestion => "reorder-suggestion",
            Self::AlwaysMatches => "always-matches",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mutation that would resolve an issue.
///
/// Indices refer to the rule list the report was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SuggestedFix {
    /// Remove these rules.
    Delete {
        /// Rule indices to remove.
        indices: Vec<usize>,
    },
    /// Move rule `from` so that it sits immediately before rule `to`.
    ReorderBefore {
        /// Rule to move.
        from: usize,
        /// Rule it should precede.
        to: usize,
    },
    /// Fold these rules into one; the host decides the merged target.
    Merge {
        /// Rule indices to merge, ascending.
        indices: Vec<usize>,
    },
}

impl fmt::Display for SuggestedFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete { indices } => write!(f, "delete rule(s) {}", join(indices)),
            Self::ReorderBefore { from, to } => write!(f, "move rule #{from} before rule #{to}"),
            Self::Merge { indices } => write!(f, "merge rules {}", join(indices)),
        }
    }
}

fn join(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| format!("#{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// How much to trust an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Decided by exact comparison.
    #[default]
    Exact,
    /// Decided with the sampled path corpus.
    Heuristic,
}

/// A defect found in a rule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintIssue {
    /// Check code (e.g. "RS002").
    pub code: String,
    /// Defect category.
    pub kind: IssueKind,
    /// Severity after configuration overrides.
    pub severity: Severity,
    /// The rule the issue is about.
    pub subject_index: usize,
    /// Other rules involved (e.g. the shadowing rule).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_indices: Vec<usize>,
    /// Human-readable message.
    pub message: String,
    /// Optional mutation that resolves the issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<SuggestedFix>,
    /// Exact or heuristic.
    #[serde(default)]
    pub confidence: Confidence,
}

impl LintIssue {
    /// Creates a new exact issue.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        kind: IssueKind,
        severity: Severity,
        subject_index: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            kind,
            severity,
            subject_index,
            related_indices: Vec::new(),
            message: message.into(),
            suggested_fix: None,
            confidence: Confidence::Exact,
        }
    }

    /// Adds related rule indices.
    #[must_use]
    pub fn with_related(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.related_indices.extend(indices);
        self
    }

    /// Attaches a suggested fix.
    #[must_use]
    pub fn with_fix(mut self, fix: SuggestedFix) -> Self {
        self.suggested_fix = Some(fix);
        self
    }

    /// Marks the issue as derived from sampling and appends the caveat.
    #[must_use]
    pub fn heuristic(mut self) -> Self {
        if self.confidence != Confidence::Heuristic {
            self.confidence = Confidence::Heuristic;
            self.message.push(' ');
            self.message.push_str(HEURISTIC_CAVEAT);
        }
        self
    }

    /// Formats the issue for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {} at rule #{}\n", self.code, self.kind, self.subject_index);
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if !self.related_indices.is_empty() {
            let _ = writeln!(output, "  = related: {}", join(&self.related_indices));
        }
        if let Some(fix) = &self.suggested_fix {
            let _ = writeln!(output, "  = help: {fix}");
        }
        output
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule #{}: {} [{}] {}",
            self.subject_index, self.severity, self.code, self.message
        )
    }
}

/// A lint issue rendered as a miette diagnostic.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct IssueDiagnostic {
    message: String,
    code: String,
    severity: Severity,
    help: Option<String>,
}

impl From<&LintIssue> for IssueDiagnostic {
    fn from(issue: &LintIssue) -> Self {
        Self {
            message: format!("rule #{}: {}", issue.subject_index, issue.message),
            code: format!("{}::{}", issue.code, issue.kind),
            severity: issue.severity,
            help: issue.suggested_fix.as_ref().map(ToString::to_string),
        }
    }
}

impl Diagnostic for IssueDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Info => miette::Severity::Advice,
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }
}

/// Issue counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintStats {
    /// Error-level issues.
    pub errors: usize,
    /// Warning-level issues.
    pub warnings: usize,
    /// Info-level issues.
    pub infos: usize,
    /// All issues.
    pub total: usize,
}

impl LintStats {
    /// Tallies a slice of issues.
    #[must_use]
    pub fn tally(issues: &[LintIssue]) -> Self {
        let count = |s: Severity| issues.iter().filter(|i| i.severity == s).count();
        Self {
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            infos: count(Severity::Info),
            total: issues.len(),
        }
    }
}

/// Result of linting one rule list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    /// Issues in check order.
    pub issues: Vec<LintIssue>,
    /// Counts by severity.
    pub stats: LintStats,
    /// Number of rules inspected.
    pub rules_checked: usize,
}

impl LintReport {
    /// Builds a report and its stats.
    #[must_use]
    pub fn new(issues: Vec<LintIssue>, rules_checked: usize) -> Self {
        let stats = LintStats::tally(&issues);
        Self {
            issues,
            stats,
            rules_checked,
        }
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.stats.errors > 0
    }

    /// Checks if any issue meets or exceeds the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.issues.iter().any(|i| i.severity >= severity)
    }

    /// Returns issues of one kind.
    #[must_use]
    pub fn by_kind(&self, kind: IssueKind) -> Vec<&LintIssue> {
        self.issues.iter().filter(|i| i.kind == kind).collect()
    }

    /// Counts issues by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        (self.stats.errors, self.stats.warnings, self.stats.infos)
    }

    /// Formats issues at or above `min` as a multi-line report.
    #[must_use]
    pub fn format_report(&self, min: Severity) -> String {
        use std::fmt::Write;

        let shown: Vec<&LintIssue> = self.issues.iter().filter(|i| i.severity >= min).collect();

        let mut report = String::new();
        let _ = writeln!(report, "=== ruleswitch: {} issue(s) ===\n", shown.len());
        for issue in &shown {
            let _ = writeln!(report, "{}", issue.format());
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {} error(s), {} warning(s), {} info(s) in {} rule(s)",
            errors, warnings, infos, self.rules_checked
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity) -> LintIssue {
        LintIssue::new("RS002", IssueKind::Unreachable, severity, 1, "rule #0 always wins first")
    }

    #[test]
    fn fix_serializes_with_kind_tag() {
        let json = serde_json::to_string(&SuggestedFix::ReorderBefore { from: 3, to: 1 }).unwrap();
        assert_eq!(json, r#"{"kind":"reorderBefore","from":3,"to":1}"#);
        let json = serde_json::to_string(&SuggestedFix::Delete { indices: vec![2] }).unwrap();
        assert_eq!(json, r#"{"kind":"delete","indices":[2]}"#);
    }

    #[test]
    fn issue_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&IssueKind::ReorderSuggestion).unwrap();
        assert_eq!(json, r#""reorder-suggestion""#);
        assert_eq!(IssueKind::InvalidLanguage.as_str(), "invalid-language");
    }

    #[test]
    fn heuristic_appends_caveat_once() {
        let i = issue(Severity::Warning).heuristic().heuristic();
        assert_eq!(i.confidence, Confidence::Heuristic);
        assert_eq!(i.message.matches(HEURISTIC_CAVEAT).count(), 1);
    }

    #[test]
    fn format_includes_help_and_related() {
        let i = issue(Severity::Warning)
            .with_related([0])
            .with_fix(SuggestedFix::Delete { indices: vec![1] });
        let text = i.format();
        assert!(text.contains("= related: #0"));
        assert!(text.contains("= help: delete rule(s) #1"));
    }

    #[test]
    fn report_stats_and_threshold() {
        let report = LintReport::new(
            vec![issue(Severity::Warning), issue(Severity::Info)],
            4,
        );
        assert_eq!(report.stats.total, 2);
        assert_eq!(report.count_by_severity(), (0, 1, 1));
        assert!(!report.has_errors());
        assert!(report.has_violations_at(Severity::Warning));
        assert!(!report.has_violations_at(Severity::Error));
        let text = report.format_report(Severity::Warning);
        assert!(text.contains("1 issue(s)"));
        assert!(text.contains("in 4 rule(s)"));
    }

    #[test]
    fn diagnostic_maps_severity_and_help() {
        let i = issue(Severity::Info).with_fix(SuggestedFix::ReorderBefore { from: 1, to: 0 });
        let d = IssueDiagnostic::from(&i);
        assert_eq!(d.severity(), Some(miette::Severity::Advice));
        assert_eq!(d.help().map(|h| h.to_string()).as_deref(), Some("move rule #1 before rule #0"));
        assert_eq!(d.code().map(|c| c.to_string()).as_deref(), Some("RS002::unreachable"));
    }

    #[test]
    fn severity_parses_aliases() {
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert!("fatal".parse::<Severity>().is_err());
    }
}
