//! Overlap analysis: can two rules match the same context?

use std::collections::BTreeSet;

use tracing::trace;

use crate::languages;
use crate::model::{ContextPredicates, PathPattern, Predicate, Rule};
use crate::sampling::{self, PatternSamples, SampleCorpus};

/// Returns true if some realizable context satisfies both predicates.
///
/// Symmetric in its arguments.
#[must_use]
pub fn can_both_match(a: &Predicate, b: &Predicate) -> bool {
    OverlapAnalyzer::from_predicates(vec![a, b]).can_both_match(0, 1)
}

/// Pairwise overlap and containment queries over one rule list.
///
/// Pattern samples are computed once per rule so a full lint pass costs one
/// corpus scan per pattern plus cheap per-pair intersections.
#[derive(Debug)]
pub struct OverlapAnalyzer<'r> {
    predicates: Vec<&'r Predicate>,
    samples: Vec<Option<PatternSamples<'r>>>,
    corpus: &'static SampleCorpus,
}

impl<'r> OverlapAnalyzer<'r> {
    /// Prepares an analyzer for a rule list.
    #[must_use]
    pub fn new(rules: &'r [Rule]) -> Self {
        Self::from_predicates(rules.iter().map(Rule::predicate).collect())
    }

    /// Prepares an analyzer for bare predicates.
    #[must_use]
    pub fn from_predicates(predicates: Vec<&'r Predicate>) -> Self {
        let corpus = SampleCorpus::standard();
        let samples = predicates
            .iter()
            .map(|p| {
                p.file
                    .path_pattern
                    .as_ref()
                    .map(|pattern| PatternSamples::new(pattern, corpus))
            })
            .collect();
        Self {
            predicates,
            samples,
            corpus,
        }
    }

    /// Number of predicates under analysis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns true if there is nothing to analyze.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the predicate at `index`, or `None` if out of range.
    #[must_use]
    pub fn predicate(&self, index: usize) -> Option<&'r Predicate> {
        self.predicates.get(index).copied()
    }

    fn samples(&self, index: usize) -> Option<&PatternSamples<'r>> {
        self.samples.get(index).and_then(Option::as_ref)
    }

    /// Returns true if rules `i` and `j` can both match some context.
    ///
    /// Out-of-range indices never match.
    #[must_use]
    pub fn can_both_match(&self, i: usize, j: usize) -> bool {
        let (Some(a), Some(b)) = (self.predicate(i), self.predicate(j)) else {
            return false;
        };
        if !contexts_compatible(&a.context, &b.context) {
            return false;
        }
        if !compatible(a.file.language.as_ref(), b.file.language.as_ref())
            || !compatible(
                a.file.workspace_name.as_ref(),
                b.file.workspace_name.as_ref(),
            )
        {
            return false;
        }
        let result = self.paths_compatible(i, j);
        trace!(i, j, result, "overlap");
        result
    }

    /// Returns true if every sampled path matched by rule `inner`'s pattern is
    /// also matched by rule `outer`'s pattern.
    ///
    /// False unless both rules exist and declare a valid pattern.
    #[must_use]
    pub fn pattern_subset(&self, inner: usize, outer: usize) -> bool {
        match (self.samples(inner), self.samples(outer)) {
            (Some(si), Some(so)) => {
                if !si.pattern().is_valid() || !so.pattern().is_valid() {
                    return false;
                }
                si.pattern() == so.pattern() || sampling::is_subset(si, so, self.corpus)
            }
            _ => false,
        }
    }

    /// Returns true if the verdict for `i`/`j` relied on the sampled corpus
    /// rather than exact comparison.
    #[must_use]
    pub fn relies_on_sampling(&self, i: usize, j: usize) -> bool {
        match (self.samples(i), self.samples(j)) {
            (Some(a), Some(b)) => {
                a.pattern() != b.pattern() || self.language_constraint(i, j).is_some()
            }
            (Some(_), None) | (None, Some(_)) => self.language_constraint(i, j).is_some(),
            (None, None) => false,
        }
    }

    fn paths_compatible(&self, i: usize, j: usize) -> bool {
        let language = self.language_constraint(i, j);
        let accept =
            |path: &str| language.map_or(true, |lang| languages::is_language_file(path, lang));
        let reaches_language = |s: &PatternSamples<'_>, lang: &str| {
            s.any_matched(self.corpus, accept)
                || !sampling::language_witnesses(s.pattern(), lang).is_empty()
        };

        match (self.samples(i), self.samples(j)) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                if !a.pattern().is_valid() || !b.pattern().is_valid() {
                    return false;
                }
                if a.pattern() == b.pattern() {
                    return language.map_or(true, |lang| reaches_language(a, lang));
                }
                sampling::overlap(a, b, self.corpus, accept)
                    || language.is_some_and(|lang| {
                        typed_overlap(a.pattern(), b.pattern(), lang)
                            || typed_overlap(b.pattern(), a.pattern(), lang)
                    })
            }
            (Some(s), None) | (None, Some(s)) => {
                if !s.pattern().is_valid() {
                    return false;
                }
                language.map_or(true, |lang| reaches_language(s, lang))
            }
        }
    }

    /// When exactly one side declares a built-in language and the other side
    /// declares a pattern without a language, the pattern must reach a file
    /// of that language.
    fn language_constraint(&self, i: usize, j: usize) -> Option<&'r str> {
        let (a, b) = (self.predicate(i)?, self.predicate(j)?);
        let language = match (&a.file.language, &b.file.language) {
            (Some(lang), None) if b.file.path_pattern.is_some() => lang,
            (None, Some(lang)) if a.file.path_pattern.is_some() => lang,
            _ => return None,
        };
        languages::is_builtin(language).then_some(language.as_str())
    }
}

/// True if some file of `language` synthesised from `from` is also matched
/// by `other`.
fn typed_overlap(from: &PathPattern, other: &PathPattern, language: &str) -> bool {
    sampling::language_witnesses(from, language)
        .iter()
        .any(|w| other.matches(w))
}

fn compatible<T: PartialEq>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x == y,
        _ => true,
    }
}

fn contexts_compatible(a: &ContextPredicates, b: &ContextPredicates) -> bool {
    // Timer and non-timer rules run on disjoint tracks.
    let timers = match (a.timer_interval_minutes, b.timer_interval_minutes) {
        (None, None) => true,
        (Some(x), Some(y)) => x == y,
        _ => false,
    };
    timers
        && compatible(a.debug_session.as_ref(), b.debug_session.as_ref())
        && compatible(a.debug_type.as_ref(), b.debug_type.as_ref())
        && compatible(a.test_state.as_ref(), b.test_state.as_ref())
        && compatible(a.view_mode.as_ref(), b.view_mode.as_ref())
}

/// Symmetric overlap relation over rule indices, built once per lint pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapGraph {
    adjacency: Vec<BTreeSet<usize>>,
}

impl OverlapGraph {
    /// Computes every pairwise overlap.
    #[must_use]
    pub fn build(analyzer: &OverlapAnalyzer<'_>) -> Self {
        let n = analyzer.len();
        let mut adjacency = vec![BTreeSet::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                if analyzer.can_both_match(i, j) {
                    adjacency[i].insert(j);
                    adjacency[j].insert(i);
                }
            }
        }
        Self { adjacency }
    }

    /// Returns true if rules `i` and `j` overlap.
    #[must_use]
    pub fn overlaps(&self, i: usize, j: usize) -> bool {
        self.adjacency.get(i).is_some_and(|n| n.contains(&j))
    }

    /// Returns the rules overlapping rule `i`, ascending.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(i).into_iter().flatten().copied()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }
}
