//! Specificity scoring for reorder advice.
//!
//! The score is a narrowness proxy. It never influences evaluation order.

use crate::model::{PathPattern, Predicate, Rule};

const WORKSPACE: u32 = 100;
const LANGUAGE_AND_PATTERN: u32 = 80;
const LANGUAGE_ONLY: u32 = 40;
const PATTERN_ONLY: u32 = 20;
const CONTEXT_EACH: u32 = 5;

const SEGMENT_EACH: u32 = 5;
const SEGMENT_CAP: usize = 6;
const PINNED_EXTENSION: u32 = 10;
const TEST_INTENT: u32 = 10;

/// Scores a rule; higher means narrower.
#[must_use]
pub fn score(rule: &Rule) -> u32 {
    score_predicate(rule.predicate())
}

/// Scores a predicate; higher means narrower.
///
/// Adding any predicate never lowers the score.
#[must_use]
pub fn score_predicate(predicate: &Predicate) -> u32 {
    let file = &predicate.file;
    let mut total = match (&file.language, &file.path_pattern) {
        (Some(_), Some(pattern)) => LANGUAGE_AND_PATTERN + pattern_detail(pattern),
        (Some(_), None) => LANGUAGE_ONLY,
        (None, Some(pattern)) => PATTERN_ONLY + pattern_detail(pattern),
        (None, None) => 0,
    };
    if file.workspace_name.is_some() {
        total += WORKSPACE;
    }
    let context = u32::try_from(predicate.context.count()).unwrap_or(u32::MAX);
    total.saturating_add(context.saturating_mul(CONTEXT_EACH))
}

/// Bonus for how much a pattern pins down.
fn pattern_detail(pattern: &PathPattern) -> u32 {
    let raw = pattern.as_str();
    let segments = raw
        .split('/')
        .filter(|s| !s.is_empty() && *s != "**" && *s != "*")
        .count()
        .min(SEGMENT_CAP);
    // SEGMENT_CAP is small, the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation)]
    let mut detail = segments as u32 * SEGMENT_EACH;

    if has_pinned_extension(raw) {
        detail += PINNED_EXTENSION;
    }
    let lower = raw.to_ascii_lowercase();
    if lower.contains("test") || lower.contains("spec") {
        detail += TEST_INTENT;
    }
    detail
}

/// True when the last segment ends in a literal `.ext`.
fn has_pinned_extension(raw: &str) -> bool {
    let last = raw.rsplit('/').next().unwrap_or(raw);
    match last.rsplit_once('.') {
        Some((_, ext)) => {
            !ext.is_empty() && !ext.contains(['*', '?', '[', ']', '{', '}'])
        }
        None => false,
    }
}
