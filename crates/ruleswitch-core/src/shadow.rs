//! Shadow (unreachability) detection.
//!
//! File predicates and context predicates get different subset treatment: a
//! later rule may narrow which files an earlier rule covers and still be
//! swallowed by it, but any difference in when the rules are armed leaves
//! the later rule a chance to fire.

use std::collections::BTreeSet;

use tracing::debug;

use crate::overlap::{OverlapAnalyzer, OverlapGraph};

/// A rule that an earlier rule always beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadowing {
    /// The unreachable rule.
    pub victim: usize,
    /// The nearest earlier rule that shadows it.
    pub shadowed_by: usize,
    /// True if the verdict relied on the sampled corpus.
    pub heuristic: bool,
}

/// Returns true if rule `earlier` matches whenever rule `later` does.
#[must_use]
pub fn is_shadowed_by(
    analyzer: &OverlapAnalyzer<'_>,
    graph: &OverlapGraph,
    earlier: usize,
    later: usize,
) -> bool {
    let (Some(a), Some(b)) = (analyzer.predicate(earlier), analyzer.predicate(later)) else {
        return false;
    };
    if a.is_timer() != b.is_timer() || !graph.overlaps(earlier, later) {
        return false;
    }
    if a.count() > b.count() {
        return false;
    }
    if a.context != b.context {
        return false;
    }

    let (fa, fb) = (&a.file, &b.file);
    if fa.language.is_some() && fa.language != fb.language {
        return false;
    }
    if fa.workspace_name.is_some() && fa.workspace_name != fb.workspace_name {
        return false;
    }
    match (&fa.path_pattern, &fb.path_pattern) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(pa), Some(pb)) => pa == pb || analyzer.pattern_subset(later, earlier),
    }
}

/// Finds the nearest shadowing rule for every victim not in `skip`.
///
/// Results are ordered by victim index.
#[must_use]
pub fn find_shadowed(
    analyzer: &OverlapAnalyzer<'_>,
    graph: &OverlapGraph,
    skip: &BTreeSet<usize>,
) -> Vec<Shadowing> {
    let mut found = Vec::new();
    for later in 0..analyzer.len() {
        if skip.contains(&later) {
            continue;
        }
        let Some(earlier) = graph
            .neighbors(later)
            .take_while(|&i| i < later)
            .find(|&i| is_shadowed_by(analyzer, graph, i, later))
        else {
            continue;
        };
        let heuristic = uses_sampling(analyzer, earlier, later);
        debug!(victim = later, shadowed_by = earlier, heuristic, "shadowed rule");
        found.push(Shadowing {
            victim: later,
            shadowed_by: earlier,
            heuristic,
        });
    }
    found
}

fn uses_sampling(analyzer: &OverlapAnalyzer<'_>, earlier: usize, later: usize) -> bool {
    let subset_by_samples = matches!(
        (
            analyzer.predicate(earlier).and_then(|a| a.file.path_pattern.as_ref()),
            analyzer.predicate(later).and_then(|b| b.file.path_pattern.as_ref()),
        ),
        (Some(pa), Some(pb)) if pa != pb
    );
    subset_by_samples || analyzer.relies_on_sampling(earlier, later)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DebugSessionState, Predicate, Rule};
    use std::num::NonZeroU32;

    fn rules(preds: Vec<(Predicate, &str)>) -> Vec<Rule> {
        preds
            .into_iter()
            .enumerate()
            .map(|(i, (p, t))| Rule::new(format!("r{i}"), p, t).unwrap())
            .collect()
    }

    fn shadowed(rules: &[Rule]) -> Vec<Shadowing> {
        let analyzer = OverlapAnalyzer::new(rules);
        let graph = OverlapGraph::build(&analyzer);
        find_shadowed(&analyzer, &graph, &BTreeSet::new())
    }

    #[test]
    fn broader_language_rule_shadows_narrower() {
        let rs = rules(vec![
            (Predicate::new().language("typescript"), "Dark"),
            (
                Predicate::new()
                    .language("typescript")
                    .path_pattern("**/*.test.ts"),
                "Light",
            ),
        ]);
        assert_eq!(
            shadowed(&rs),
            vec![Shadowing {
                victim: 1,
                shadowed_by: 0,
                heuristic: false
            }]
        );
    }

    #[test]
    fn extra_context_predicate_escapes_shadow() {
        let rs = rules(vec![
            (Predicate::new().language("typescript"), "Dark"),
            (
                Predicate::new()
                    .language("typescript")
                    .debug_session(DebugSessionState::Active),
                "Red",
            ),
        ]);
        assert!(shadowed(&rs).is_empty());
    }

    #[test]
    fn pattern_subset_is_heuristic() {
        let rs = rules(vec![
            (Predicate::new().path_pattern("src/**"), "A"),
            (Predicate::new().path_pattern("src/components/**/*.tsx"), "B"),
        ]);
        let found = shadowed(&rs);
        assert_eq!(found.len(), 1);
        assert!(found[0].heuristic);
    }

    #[test]
    fn narrower_earlier_rule_does_not_shadow() {
        let rs = rules(vec![
            (Predicate::new().path_pattern("src/components/**/*.tsx"), "B"),
            (Predicate::new().path_pattern("src/**"), "A"),
        ]);
        assert!(shadowed(&rs).is_empty());
    }

    #[test]
    fn nearest_shadower_is_reported() {
        let rs = rules(vec![
            (Predicate::new(), "Fallback"),
            (Predicate::new().language("rust"), "A"),
            (Predicate::new().language("rust").workspace("core"), "B"),
        ]);
        let found = shadowed(&rs);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].victim, 2);
        assert_eq!(found[1].shadowed_by, 0);
    }

    #[test]
    fn timer_rules_only_shadow_their_own_track() {
        let five = NonZeroU32::new(5).unwrap();
        let rs = rules(vec![
            (Predicate::new(), "Any"),
            (Predicate::new().timer_interval(five), "Tick"),
            (Predicate::new().timer_interval(five).language("go"), "GoTick"),
        ]);
        let found = shadowed(&rs);
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].victim, found[0].shadowed_by), (2, 1));
    }
}
