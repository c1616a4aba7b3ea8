//! Pure domain model for switch rules.
//!
//! This module contains no serde and no I/O. Every predicate axis is an
//! explicit `Option`: `None` is a wildcard on that axis.

use globset::{GlobBuilder, GlobMatcher};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::syntax::{self, SyntaxError};

// ────────────────────────────────────────────
// Context-axis enums
// ────────────────────────────────────────────

/// Whether a debug session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum DebugSessionState {
    /// A debug session is running.
    Active,
    /// No debug session.
    #[default]
    Inactive,
}

impl DebugSessionState {
    /// Returns the lowercase identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Outcome of the most recent test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TestState {
    /// Tests are running right now.
    Running,
    /// The last run had failures.
    Failed,
    /// The last run passed.
    Passed,
    /// No test run has happened (`none`).
    #[default]
    Idle,
}

impl TestState {
    /// Returns the lowercase identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Failed => "failed",
            Self::Passed => "passed",
            Self::Idle => "none",
        }
    }
}

/// Editor view mode of the active file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ViewMode {
    /// Side-by-side diff.
    Diff,
    /// Three-way merge editor.
    Merge,
    /// Plain editor.
    #[default]
    Normal,
}

impl ViewMode {
    /// Returns the lowercase identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Diff => "diff",
            Self::Merge => "merge",
            Self::Normal => "normal",
        }
    }
}

macro_rules! impl_axis_text {
    ($ty:ty, $axis:literal, [$($text:literal => $variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($variant),)+
                    other => Err(ModelError::UnknownValue {
                        axis: $axis,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_axis_text!(DebugSessionState, "debugSession", [
    "active" => DebugSessionState::Active,
    "inactive" => DebugSessionState::Inactive,
]);

impl_axis_text!(TestState, "testState", [
    "running" => TestState::Running,
    "failed" => TestState::Failed,
    "passed" => TestState::Passed,
    "none" => TestState::Idle,
]);

impl_axis_text!(ViewMode, "viewMode", [
    "diff" => ViewMode::Diff,
    "merge" => ViewMode::Merge,
    "normal" => ViewMode::Normal,
]);

// ────────────────────────────────────────────
// Path patterns
// ────────────────────────────────────────────

/// Why a path pattern cannot be used for matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The text failed the syntactic balance check.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The glob engine rejected the text.
    #[error("glob compilation failed: {0}")]
    Compile(String),
}

/// A glob pattern over forward-slash file paths.
///
/// `**` crosses directories, `*` stays within one segment and `{a,b}` is
/// alternation. Construction never fails: a malformed pattern keeps its raw
/// text and its error, and never matches anything.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    matcher: Option<GlobMatcher>,
    error: Option<PatternError>,
}

impl PathPattern {
    /// Creates a pattern, compiling it when the text is well formed.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let compiled = syntax::validate(pattern)
            .map_err(PatternError::from)
            .and_then(|()| {
                GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .map(|glob| glob.compile_matcher())
                    .map_err(|e| PatternError::Compile(e.kind().to_string()))
            });

        match compiled {
            Ok(matcher) => Self {
                raw: pattern.to_string(),
                matcher: Some(matcher),
                error: None,
            },
            Err(error) => Self {
                raw: pattern.to_string(),
                matcher: None,
                error: Some(error),
            },
        }
    }

    /// Returns the raw pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if the pattern compiled.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.matcher.is_some()
    }

    /// Returns the reason the pattern is unusable, if any.
    #[must_use]
    pub fn error(&self) -> Option<&PatternError> {
        self.error.as_ref()
    }

    /// Tests a normalized path. Invalid patterns never match.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.is_match(path))
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathPattern {}

impl Hash for PathPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Converts a host path into the form patterns are matched against.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let forward = path.replace('\\', "/");
    let mut trimmed = forward.as_str();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.to_string()
}

// ────────────────────────────────────────────
// Predicates
// ────────────────────────────────────────────

/// Conditions on which files a rule covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilePredicates {
    /// Language identifier of the active file.
    pub language: Option<String>,
    /// Glob over the workspace-relative file path.
    pub path_pattern: Option<PathPattern>,
    /// Name of the workspace folder.
    pub workspace_name: Option<String>,
}

impl FilePredicates {
    /// Number of declared file predicates.
    #[must_use]
    pub fn count(&self) -> usize {
        usize::from(self.language.is_some())
            + usize::from(self.path_pattern.is_some())
            + usize::from(self.workspace_name.is_some())
    }
}

/// Conditions on when a rule is armed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContextPredicates {
    /// Debug session state.
    pub debug_session: Option<DebugSessionState>,
    /// Debug adapter type (e.g. `node`).
    pub debug_type: Option<String>,
    /// Test run state.
    pub test_state: Option<TestState>,
    /// Editor view mode.
    pub view_mode: Option<ViewMode>,
    /// Periodic timer; only satisfiable during a timer pass.
    pub timer_interval_minutes: Option<NonZeroU32>,
}

impl ContextPredicates {
    /// Number of declared context predicates.
    #[must_use]
    pub fn count(&self) -> usize {
        usize::from(self.debug_session.is_some())
            + usize::from(self.debug_type.is_some())
            + usize::from(self.test_state.is_some())
            + usize::from(self.view_mode.is_some())
            + usize::from(self.timer_interval_minutes.is_some())
    }
}

/// The full condition set of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Predicate {
    /// File group.
    pub file: FilePredicates,
    /// Context group.
    pub context: ContextPredicates,
}

impl Predicate {
    /// Creates an empty predicate that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the language predicate.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.file.language = Some(language.into());
        self
    }

    /// Sets the path pattern predicate.
    #[must_use]
    pub fn path_pattern(mut self, pattern: &str) -> Self {
        self.file.path_pattern = Some(PathPattern::new(pattern));
        self
    }

    /// Sets the workspace name predicate.
    #[must_use]
    pub fn workspace(mut self, name: impl Into<String>) -> Self {
        self.file.workspace_name = Some(name.into());
        self
    }

    /// Sets the debug session predicate.
    #[must_use]
    pub fn debug_session(mut self, state: DebugSessionState) -> Self {
        self.context.debug_session = Some(state);
        self
    }

    /// Sets the debug type predicate.
    #[must_use]
    pub fn debug_type(mut self, debug_type: impl Into<String>) -> Self {
        self.context.debug_type = Some(debug_type.into());
        self
    }

    /// Sets the test state predicate.
    #[must_use]
    pub fn test_state(mut self, state: TestState) -> Self {
        self.context.test_state = Some(state);
        self
    }

    /// Sets the view mode predicate.
    #[must_use]
    pub fn view_mode(mut self, mode: ViewMode) -> Self {
        self.context.view_mode = Some(mode);
        self
    }

    /// Sets the timer interval predicate.
    #[must_use]
    pub fn timer_interval(mut self, minutes: NonZeroU32) -> Self {
        self.context.timer_interval_minutes = Some(minutes);
        self
    }

    /// Total number of declared predicates across both groups.
    #[must_use]
    pub fn count(&self) -> usize {
        self.file.count() + self.context.count()
    }

    /// Returns true if nothing is declared; such a rule always matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns true if the rule lives on the timer track.
    #[must_use]
    pub fn is_timer(&self) -> bool {
        self.context.timer_interval_minutes.is_some()
    }
}

// ────────────────────────────────────────────
// Rule
// ────────────────────────────────────────────

/// A named predicate that selects a target when it matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    name: String,
    predicate: Predicate,
    target: String,
}

impl Rule {
    /// Creates a new rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or target is empty.
    pub fn new(
        name: impl Into<String>,
        predicate: Predicate,
        target: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        let target = target.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyRuleName);
        }
        if target.trim().is_empty() {
            return Err(ModelError::EmptyTarget { rule: name });
        }
        Ok(Self {
            name,
            predicate,
            target,
        })
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the predicate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Returns the target selected when this rule wins.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

// ────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────

/// Errors in domain model construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Rule name is empty.
    #[error("rule name must not be empty")]
    EmptyRuleName,

    /// Rule target is empty.
    #[error("rule `{rule}` has an empty target")]
    EmptyTarget {
        /// Name of the offending rule.
        rule: String,
    },

    /// Timer interval is zero or negative.
    #[error("timer interval must be a positive number of minutes, got {value}")]
    InvalidTimerInterval {
        /// The rejected value.
        value: i64,
    },

    /// An enum-valued axis got an unrecognised value.
    #[error("unknown {axis} value `{value}`")]
    UnknownValue {
        /// The axis name.
        axis: &'static str,
        /// The rejected value.
        value: String,
    },
}
