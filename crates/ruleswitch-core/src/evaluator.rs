//! First-match-wins rule resolution.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::context::ContextSnapshot;
use crate::model::{ContextPredicates, FilePredicates, Rule};

/// Result of resolving a rule list against a context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Whether any rule matched.
    pub matched: bool,
    /// Index of the winning rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_index: Option<usize>,
    /// Target of the winning rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Evaluation {
    /// No rule matched; the caller applies its fallback.
    #[must_use]
    pub fn unmatched() -> Self {
        Self::default()
    }

    fn hit(index: usize, rule: &Rule) -> Self {
        Self {
            matched: true,
            rule_index: Some(index),
            target: Some(rule.target().to_string()),
        }
    }
}

/// Returns the first rule whose predicate is fully satisfied by `ctx`.
///
/// Never fails: rules with malformed patterns simply do not match.
#[must_use]
pub fn evaluate(rules: &[Rule], ctx: &ContextSnapshot) -> Evaluation {
    for (index, rule) in rules.iter().enumerate() {
        if rule_matches(index, rule, ctx) {
            debug!(index, rule = rule.name(), target = rule.target(), "rule matched");
            return Evaluation::hit(index, rule);
        }
    }
    debug!(rules = rules.len(), "no rule matched");
    Evaluation::unmatched()
}

/// Tests a single rule at position `index` against `ctx`.
#[must_use]
pub fn rule_matches(index: usize, rule: &Rule, ctx: &ContextSnapshot) -> bool {
    let predicate = rule.predicate();
    let armed = if predicate.is_timer() {
        ctx.is_timer_pass() && ctx.timer_fired.contains(&index)
    } else {
        !ctx.is_timer_pass()
    };
    if !armed {
        trace!(index, "rule not armed for this pass");
        return false;
    }
    file_matches(&predicate.file, ctx) && context_matches(&predicate.context, ctx)
}

fn file_matches(file: &FilePredicates, ctx: &ContextSnapshot) -> bool {
    if !equals(file.language.as_deref(), ctx.language_id.as_deref()) {
        return false;
    }
    if !equals(file.workspace_name.as_deref(), ctx.workspace_name.as_deref()) {
        return false;
    }
    match (&file.path_pattern, ctx.file_path.as_deref()) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(pattern), Some(path)) => {
            if !pattern.is_valid() {
                trace!(pattern = pattern.as_str(), "malformed pattern never matches");
            }
            pattern.matches(path)
        }
    }
}

fn context_matches(context: &ContextPredicates, ctx: &ContextSnapshot) -> bool {
    context.debug_session.map_or(true, |s| s == ctx.debug_session)
        && equals(context.debug_type.as_deref(), ctx.debug_type.as_deref())
        && context.test_state.map_or(true, |s| s == ctx.test_state)
        && context.view_mode.map_or(true, |m| m == ctx.view_mode)
}

/// A declared value must equal the observed one; an absent predicate is a
/// wildcard, an absent observation fails a declared predicate.
fn equals(declared: Option<&str>, observed: Option<&str>) -> bool {
    match declared {
        None => true,
        Some(value) => observed == Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DebugSessionState, Predicate, TestState, ViewMode};
    use std::num::NonZeroU32;

    fn rule(name: &str, predicate: Predicate, target: &str) -> Rule {
        Rule::new(name, predicate, target).unwrap()
    }

    fn five() -> NonZeroU32 {
        NonZeroU32::new(5).unwrap()
    }

    #[test]
    fn first_match_wins() {
        let rules = vec![
            rule("ts", Predicate::new().language("typescript"), "Dark"),
            rule(
                "ts tests",
                Predicate::new()
                    .language("typescript")
                    .path_pattern("**/*.test.ts"),
                "Light",
            ),
        ];
        let ctx = ContextSnapshot::new()
            .with_language("typescript")
            .with_file_path("src/x.test.ts");
        let result = evaluate(&rules, &ctx);
        assert_eq!(result.rule_index, Some(0));
        assert_eq!(result.target.as_deref(), Some("Dark"));
        assert_eq!(evaluate(&rules, &ctx), result);
    }

    #[test]
    fn no_match_returns_unmatched() {
        let rules = vec![rule("py", Predicate::new().language("python"), "Dark")];
        let ctx = ContextSnapshot::new().with_language("rust");
        assert_eq!(evaluate(&rules, &ctx), Evaluation::unmatched());
    }

    #[test]
    fn declared_axis_requires_observation() {
        let rules = vec![rule("src", Predicate::new().path_pattern("src/**"), "A")];
        assert!(!evaluate(&rules, &ContextSnapshot::new()).matched);
    }

    #[test]
    fn empty_predicate_always_matches_ordinary_pass() {
        let rules = vec![rule("any", Predicate::new(), "Default")];
        assert!(evaluate(&rules, &ContextSnapshot::new()).matched);
        assert!(!evaluate(&rules, &ContextSnapshot::new().timer_pass([0])).matched);
    }

    #[test]
    fn timer_rule_only_matches_when_fired() {
        let rules = vec![rule("tick", Predicate::new().timer_interval(five()), "A")];
        assert!(!evaluate(&rules, &ContextSnapshot::new()).matched);
        assert!(!evaluate(&rules, &ContextSnapshot::new().timer_pass([1])).matched);
        let fired = evaluate(&rules, &ContextSnapshot::new().timer_pass([0]));
        assert_eq!(fired.target.as_deref(), Some("A"));
    }

    #[test]
    fn malformed_pattern_is_skipped_not_fatal() {
        let rules = vec![
            rule("bad", Predicate::new().path_pattern("src/[oops"), "Broken"),
            rule("good", Predicate::new().path_pattern("src/**"), "Fine"),
        ];
        let ctx = ContextSnapshot::new().with_file_path("src/[oops");
        assert_eq!(evaluate(&rules, &ctx).rule_index, Some(1));
    }

    #[test]
    fn context_axes_are_exact() {
        let rules = vec![rule(
            "debugging node tests in diff",
            Predicate::new()
                .debug_session(DebugSessionState::Active)
                .debug_type("node")
                .test_state(TestState::Failed)
                .view_mode(ViewMode::Diff),
            "Red",
        )];
        let ctx = ContextSnapshot::new()
            .with_debug(DebugSessionState::Active, Some("node".into()))
            .with_test_state(TestState::Failed)
            .with_view_mode(ViewMode::Diff);
        assert!(evaluate(&rules, &ctx).matched);
        let other_type = ctx.clone().with_debug(DebugSessionState::Active, Some("python".into()));
        assert!(!evaluate(&rules, &other_type).matched);
        let passed = ctx.with_test_state(TestState::Passed);
        assert!(!evaluate(&rules, &passed).matched);
    }

    #[test]
    fn removing_a_predicate_only_widens() {
        let narrow = Predicate::new()
            .language("rust")
            .path_pattern("src/**")
            .workspace("core");
        let wide = Predicate::new().language("rust").path_pattern("src/**");
        let contexts = [
            ContextSnapshot::new()
                .with_language("rust")
                .with_file_path("src/lib.rs")
                .with_workspace("core"),
            ContextSnapshot::new()
                .with_language("rust")
                .with_file_path("src/lib.rs"),
            ContextSnapshot::new().with_language("rust").with_file_path("tests/a.rs"),
        ];
        let narrow = [rule("n", narrow, "X")];
        let wide = [rule("w", wide, "X")];
        for ctx in &contexts {
            if evaluate(&narrow, ctx).matched {
                assert!(evaluate(&wide, ctx).matched);
            }
        }
    }
}
