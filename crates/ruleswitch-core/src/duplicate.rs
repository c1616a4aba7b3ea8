//! Exact-duplicate detection.

use std::collections::HashMap;

use crate::model::{Predicate, Rule};

const SEPARATOR: char = '\u{1f}';

/// A rule that repeats an earlier rule's predicate and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duplicate {
    /// The redundant (later) rule.
    pub index: usize,
    /// The first rule with the same signature and target.
    pub original: usize,
}

/// Builds the canonical signature of a predicate.
///
/// Every axis appears in a fixed order; absent axes contribute only their
/// name, so `language` unset and `language = ""` stay distinct.
#[must_use]
pub fn predicate_signature(predicate: &Predicate) -> String {
    let file = &predicate.file;
    let context = &predicate.context;
    let axes: [(&str, Option<String>); 8] = [
        ("language", file.language.clone()),
        ("pattern", file.path_pattern.as_ref().map(|p| p.as_str().to_string())),
        ("workspace", file.workspace_name.clone()),
        ("debugSession", context.debug_session.map(|s| s.to_string())),
        ("debugType", context.debug_type.clone()),
        ("testState", context.test_state.map(|s| s.to_string())),
        ("viewMode", context.view_mode.map(|m| m.to_string())),
        (
            "timerInterval",
            context.timer_interval_minutes.map(|m| m.to_string()),
        ),
    ];

    let mut key = String::new();
    for (i, (axis, value)) in axes.iter().enumerate() {
        if i > 0 {
            key.push(SEPARATOR);
        }
        key.push_str(axis);
        if let Some(value) = value {
            key.push('=');
            key.push_str(value);
        }
    }
    key
}

/// Finds rules whose signature and target repeat an earlier rule.
///
/// Results are ordered by the redundant rule's index.
#[must_use]
pub fn find_duplicates(rules: &[Rule]) -> Vec<Duplicate> {
    let mut first_seen: HashMap<(String, &str), usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for (index, rule) in rules.iter().enumerate() {
        let key = (predicate_signature(rule.predicate()), rule.target());
        match first_seen.get(&key) {
            Some(&original) => duplicates.push(Duplicate { index, original }),
            None => {
                first_seen.insert(key, index);
            }
        }
    }
    duplicates
}
