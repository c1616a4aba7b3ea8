//! Built-in lint checks.
//!
//! | Code | Name | Default severity |
//! |------|------|------------------|
//! | RS001 | `duplicate` | warning |
//! | RS002 | `unreachable` | warning |
//! | RS003 | `invalid-pattern` | error |
//! | RS004 | `invalid-language` | info |
//! | RS005 | `missing-target` | error |
//! | RS006 | `reorder-suggestion` | info |
//! | RS007 | `always-matches` | warning |
//!
//! [`all_checks`] returns them in the order the linter runs them.

mod always_matches;
mod duplicate;
mod invalid_pattern;
mod missing_target;
mod reorder;
mod unknown_language;
mod unreachable;

pub use always_matches::AlwaysMatches;
pub use duplicate::DuplicateRule;
pub use invalid_pattern::InvalidPattern;
pub use missing_target::MissingTarget;
pub use reorder::ReorderSuggestion;
pub use unknown_language::UnknownLanguage;
pub use unreachable::UnreachableRule;

use crate::check::CheckBox;

/// Returns every built-in check in run order.
#[must_use]
pub fn all_checks() -> Vec<CheckBox> {
    vec![
        Box::new(DuplicateRule::new()),
        Box::new(UnreachableRule::new()),
        Box::new(InvalidPattern::new()),
        Box::new(UnknownLanguage::new()),
        Box::new(MissingTarget::new()),
        Box::new(ReorderSuggestion::new()),
        Box::new(AlwaysMatches::new()),
    ]
}

/// Looks up a built-in check by name or code.
#[must_use]
pub fn check_by_name(name: &str) -> Option<CheckBox> {
    all_checks()
        .into_iter()
        .find(|c| c.name() == name || c.code().eq_ignore_ascii_case(name))
}
