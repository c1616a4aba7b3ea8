//! # ruleswitch-core
//!
//! First-match-wins rule resolution and rule-list conflict analysis.
//!
//! A rule list is an ordered set of `{name, predicate, target}` entries. This
//! crate provides:
//!
//! - [`evaluate`] to pick the first rule a [`ContextSnapshot`] satisfies
//! - [`Linter`] to audit a rule list for duplicates, unreachable rules,
//!   malformed patterns, unknown languages, missing targets and ordering
//! - [`ruleset`] to load and write rule lists as TOML or JSON
//!
//! Both entry points are pure and synchronous over borrowed slices.
//!
//! ## Example
//!
//! ```ignore
//! use ruleswitch_core::{evaluate, lint, ruleset, ContextSnapshot, Severity};
//!
//! let rules = ruleset::load_rules_from_toml(&text)?;
//! let ctx = ContextSnapshot::new()
//!     .with_language("typescript")
//!     .with_file_path("src/app.test.ts");
//! let outcome = evaluate(&rules, &ctx);
//!
//! let report = lint(&rules);
//! print!("{}", report.format_report(Severity::Info));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod check;
mod config;
mod context;
mod evaluator;
mod linter;
mod types;

pub mod checks;
pub mod duplicate;
pub mod languages;
pub mod model;
pub mod overlap;
pub mod ruleset;
pub mod sampling;
pub mod shadow;
pub mod specificity;
pub mod syntax;

pub use catalog::{CatalogCache, CatalogEntry, CatalogError, TargetCatalog};
pub use check::{Check, CheckBox, LintContext};
pub use config::{CatalogConfig, CheckConfig, Config, ConfigError, LintConfig};
pub use context::{ContextSnapshot, PassKind};
pub use evaluator::{evaluate, rule_matches, Evaluation};
pub use linter::{lint, Linter, LinterBuilder};
pub use model::{
    DebugSessionState, ModelError, PathPattern, Predicate, Rule, TestState, ViewMode,
};
pub use overlap::can_both_match;
pub use types::{
    Confidence, IssueDiagnostic, IssueKind, LintIssue, LintReport, LintStats, Severity,
    SuggestedFix, HEURISTIC_CAVEAT,
};
