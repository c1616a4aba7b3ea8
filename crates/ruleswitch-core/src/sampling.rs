//! Sampled-path oracle for comparing glob patterns.
//!
//! Pattern overlap and containment are answered by testing a fixed,
//! deterministic corpus of representative paths, plus a handful of witness
//! paths synthesised from the patterns under comparison. This is a heuristic:
//! a "no overlap" or "not a subset" answer can be wrong for patterns whose
//! matches the corpus never reaches (character ranges, negated classes).
//! A positive overlap answer is always backed by a concrete path.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::languages;
use crate::model::PathPattern;

/// Directory/stem layouts instantiated once per known extension.
const LAYOUTS: &[(&str, &str)] = &[
    ("", "file"),
    ("src/", "file"),
    ("src/nested/deep/", "file"),
    ("test/", "file.test"),
    ("tests/", "file_test"),
    ("docs/", "file"),
    ("lib/", "file.spec"),
];

/// Fixed samples that do not follow the per-extension layouts.
const FIXED_SAMPLES: &[&str] = &[
    "README.md",
    "LICENSE",
    "Makefile",
    "Dockerfile",
    "package.json",
    "Cargo.toml",
    ".gitignore",
    ".env",
    ".editorconfig",
    ".vscode/settings.json",
    ".github/workflows/ci.yml",
    "src/.eslintrc.json",
    "src/index.ts",
    "src/main.rs",
    "src/components/Button/index.tsx",
    "src/__tests__/app.test.tsx",
    "test/unit/helpers/util.js",
    "tests/fixtures/data.json",
    "tests/integration/api_test.go",
    "docs/guide/intro.md",
    "docs/api/index.html",
    "packages/app/src/main.ts",
    "scripts/build.sh",
    "node_modules/pkg/index.js",
];

/// Upper bound on brace-expansion alternatives per pattern.
const MAX_ALTERNATIVES: usize = 16;

/// The deterministic set of sample paths.
#[derive(Debug, Clone)]
pub struct SampleCorpus {
    paths: Vec<String>,
}

impl SampleCorpus {
    /// Returns the shared standard corpus.
    pub fn standard() -> &'static Self {
        static CORPUS: OnceLock<SampleCorpus> = OnceLock::new();
        CORPUS.get_or_init(Self::build)
    }

    fn build() -> Self {
        let mut seen = HashSet::new();
        let mut paths = Vec::new();
        let mut push = |path: String| {
            if seen.insert(path.clone()) {
                paths.push(path);
            }
        };

        for sample in FIXED_SAMPLES {
            push((*sample).to_string());
        }
        for ext in languages::all_extensions() {
            for (dir, stem) in LAYOUTS {
                push(format!("{dir}{stem}.{ext}"));
            }
        }

        Self { paths }
    }

    /// Returns the sample paths in their fixed order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if the corpus has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// A pattern together with the samples it matches.
///
/// Built once per pattern per analysis pass so that pairwise comparisons only
/// need to intersect hit lists.
#[derive(Debug, Clone)]
pub struct PatternSamples<'p> {
    pattern: &'p PathPattern,
    hits: Vec<bool>,
    witnesses: Vec<String>,
}

impl<'p> PatternSamples<'p> {
    /// Tests `pattern` against the corpus and synthesises its witnesses.
    #[must_use]
    pub fn new(pattern: &'p PathPattern, corpus: &SampleCorpus) -> Self {
        let hits = corpus.paths().iter().map(|p| pattern.matches(p)).collect();
        let witnesses = if pattern.is_valid() {
            witnesses(pattern)
        } else {
            Vec::new()
        };
        Self {
            pattern,
            hits,
            witnesses,
        }
    }

    /// Returns the underlying pattern.
    #[must_use]
    pub fn pattern(&self) -> &'p PathPattern {
        self.pattern
    }

    /// Returns the witness paths synthesised from the pattern.
    #[must_use]
    pub fn witnesses(&self) -> &[String] {
        &self.witnesses
    }

    /// Iterates over every sample this pattern matches.
    pub fn matched<'a>(&'a self, corpus: &'a SampleCorpus) -> impl Iterator<Item = &'a str> + 'a {
        corpus
            .paths()
            .iter()
            .zip(&self.hits)
            .filter(|(_, hit)| **hit)
            .map(|(p, _)| p.as_str())
            .chain(self.witnesses.iter().map(String::as_str))
    }

    /// Returns true if some matched sample satisfies `accept`.
    pub fn any_matched(&self, corpus: &SampleCorpus, accept: impl Fn(&str) -> bool) -> bool {
        self.matched(corpus).any(accept)
    }
}

/// Returns true if some sample is matched by both patterns and accepted.
pub fn overlap(
    a: &PatternSamples<'_>,
    b: &PatternSamples<'_>,
    corpus: &SampleCorpus,
    accept: impl Fn(&str) -> bool,
) -> bool {
    let in_corpus = corpus
        .paths()
        .iter()
        .zip(a.hits.iter().zip(&b.hits))
        .any(|(p, (ha, hb))| *ha && *hb && accept(p.as_str()));

    in_corpus
        || a
            .witnesses
            .iter()
            .any(|w| b.pattern.matches(w) && accept(w.as_str()))
        || b
            .witnesses
            .iter()
            .any(|w| a.pattern.matches(w) && accept(w.as_str()))
        || cross_witnesses(&a.witnesses, &b.witnesses)
            .chain(cross_witnesses(&b.witnesses, &a.witnesses))
            .any(|w| a.pattern.matches(&w) && b.pattern.matches(&w) && accept(w.as_str()))
}

/// Grafts the file name of each `tail` witness under each `head` witness, so
/// that a directory pattern and an extension pattern can meet.
fn cross_witnesses<'a>(head: &'a [String], tail: &'a [String]) -> impl Iterator<Item = String> + 'a {
    head.iter().flat_map(move |h| {
        tail.iter().flat_map(move |t| {
            let file = t.rsplit('/').next().unwrap_or(t);
            let nested = format!("{h}/{file}");
            let sibling = h.rsplit_once('/').map(|(dir, _)| format!("{dir}/{file}"));
            std::iter::once(nested).chain(sibling)
        })
    })
}

/// Returns true if every sample matched by `inner` is matched by `outer`.
///
/// An `inner` pattern that matches no sample at all is never reported as a
/// subset: there is no evidence either way.
#[must_use]
pub fn is_subset(inner: &PatternSamples<'_>, outer: &PatternSamples<'_>, corpus: &SampleCorpus) -> bool {
    let mut any = false;
    for (hit_inner, hit_outer) in inner.hits.iter().zip(&outer.hits) {
        if *hit_inner {
            if !*hit_outer {
                return false;
            }
            any = true;
        }
    }
    for w in &inner.witnesses {
        if !outer.pattern.matches(w) {
            return false;
        }
        any = true;
    }
    debug_assert_eq!(inner.hits.len(), corpus.len());
    any
}

// ────────────────────────────────────────────
// Witness synthesis
// ────────────────────────────────────────────

/// Synthesises concrete paths from a pattern, keeping those it matches.
#[must_use]
pub fn witnesses(pattern: &PathPattern) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for alternative in expand_braces(pattern.as_str()) {
        for deep in [false, true] {
            let candidate = concretize(&alternative, deep);
            if pattern.matches(&candidate) && !out.contains(&candidate) {
                out.push(candidate);
            }
        }
    }
    out
}

/// Synthesises paths matched by `pattern` that are files of `language`.
///
/// Each concretized alternative is extended with the language's extensions
/// and well-known file names, as a suffix, as a child, and as a sibling, so
/// that `app/**` yields `app/sample.ts` for TypeScript.
#[must_use]
pub fn language_witnesses(pattern: &PathPattern, language: &str) -> Vec<String> {
    if !pattern.is_valid() {
        return Vec::new();
    }
    let extensions = languages::extensions(language).unwrap_or_default();
    let file_names = languages::file_names(language);

    let mut out: Vec<String> = Vec::new();
    for alternative in expand_braces(pattern.as_str()) {
        for deep in [false, true] {
            let base = concretize(&alternative, deep);
            let dir = base.rsplit_once('/').map_or("", |(dir, _)| dir);
            let files = extensions
                .iter()
                .map(|ext| format!("sample.{ext}"))
                .chain(file_names.iter().map(|name| (*name).to_string()));
            let mut candidates = vec![base.clone()];
            candidates.extend(extensions.iter().map(|ext| format!("{base}.{ext}")));
            for file in files {
                candidates.push(format!("{base}/{file}"));
                candidates.push(if dir.is_empty() {
                    file
                } else {
                    format!("{dir}/{file}")
                });
            }
            for candidate in candidates {
                if languages::is_language_file(&candidate, language)
                    && pattern.matches(&candidate)
                    && !out.contains(&candidate)
                {
                    out.push(candidate);
                }
            }
        }
    }
    out
}

/// Expands `{a,b}` alternation, up to [`MAX_ALTERNATIVES`] results.
fn expand_braces(pattern: &str) -> Vec<String> {
    let mut out = Vec::new();
    expand_into(pattern, &mut out);
    out
}

fn expand_into(pattern: &str, out: &mut Vec<String>) {
    if out.len() >= MAX_ALTERNATIVES {
        return;
    }
    let Some((open, close)) = first_brace_group(pattern) else {
        out.push(pattern.to_string());
        return;
    };
    let head = &pattern[..open];
    let body = &pattern[open + 1..close];
    let tail = &pattern[close + 1..];
    for alternative in split_alternatives(body) {
        expand_into(&format!("{head}{alternative}{tail}"), out);
        if out.len() >= MAX_ALTERNATIVES {
            return;
        }
    }
}

/// Finds the first top-level `{` and its matching `}` (byte offsets).
fn first_brace_group(pattern: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut open = None;
    let mut escaped = false;
    for (i, c) in pattern.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => {
                if depth == 0 {
                    open = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return open.map(|o| (o, i));
                }
            }
            _ => {}
        }
    }
    None
}

fn split_alternatives(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// Replaces wildcards with concrete text. `deep` makes `**` span two
/// directories instead of none.
fn concretize(pattern: &str, deep: bool) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                if let Some(&c) = chars.get(i + 1) {
                    out.push(c);
                }
                i += 2;
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                let then_slash = chars.get(i + 2) == Some(&'/');
                match (deep, then_slash) {
                    (true, true) => out.push_str("a/b/"),
                    (true, false) => out.push_str("a/b"),
                    (false, true) => {}
                    (false, false) => out.push_str("sample"),
                }
                i += if then_slash { 3 } else { 2 };
            }
            '*' => {
                out.push_str("sample");
                i += 1;
            }
            '?' => {
                out.push('x');
                i += 1;
            }
            '[' => match class_pick(&chars, i) {
                Some((pick, next)) => {
                    out.push(pick);
                    i = next;
                }
                None => {
                    out.push('[');
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Picks a member of the character class starting at `open`. Returns the
/// character and the index just past the closing `]`.
fn class_pick(chars: &[char], open: usize) -> Option<(char, usize)> {
    let mut i = open + 1;
    let negated = matches!(chars.get(i), Some('!' | '^'));
    if negated {
        i += 1;
    }
    let first = i;
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while i < chars.len() && chars[i] != ']' {
        i += 1;
    }
    if i >= chars.len() {
        return None;
    }
    let pick = if negated {
        // Any character outside a typical class; verified by matching later.
        '~'
    } else {
        chars.get(first).copied().unwrap_or('x')
    };
    Some((pick, i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_is_deterministic_and_covers_layouts() {
        let a = SampleCorpus::build();
        let b = SampleCorpus::build();
        assert_eq!(a.paths(), b.paths());
        for expected in ["file.ts", "src/file.rs", "test/file.test.ts", ".env", "docs/file.md"] {
            assert!(
                a.paths().iter().any(|p| p == expected),
                "missing sample {expected}"
            );
        }
    }

    #[test]
    fn corpus_has_no_duplicates() {
        let corpus = SampleCorpus::standard();
        let unique: HashSet<&String> = corpus.paths().iter().collect();
        assert_eq!(unique.len(), corpus.len());
    }

    #[test]
    fn brace_expansion() {
        assert_eq!(expand_braces("*.{ts,tsx}"), vec!["*.ts", "*.tsx"]);
        assert_eq!(
            expand_braces("{src,lib}/{a,b}"),
            vec!["src/a", "src/b", "lib/a", "lib/b"]
        );
        assert_eq!(expand_braces("plain"), vec!["plain"]);
    }

    #[test]
    fn witnesses_are_matched_by_their_pattern() {
        let pat = PathPattern::new("src/components/**/*.{tsx,jsx}");
        let ws = witnesses(&pat);
        assert!(ws.contains(&"src/components/sample.tsx".to_string()));
        assert!(ws.contains(&"src/components/a/b/sample.jsx".to_string()));
        assert!(ws.iter().all(|w| pat.matches(w)));
    }

    #[test]
    fn witnesses_from_class() {
        let pat = PathPattern::new("logs/[abc]?.txt");
        assert_eq!(witnesses(&pat), vec!["logs/ax.txt".to_string()]);
    }

    #[test]
    fn overlap_of_disjoint_directories_is_false() {
        let corpus = SampleCorpus::standard();
        let a = PathPattern::new("test/**/*.ts");
        let b = PathPattern::new("src/**/*.ts");
        let sa = PatternSamples::new(&a, corpus);
        let sb = PatternSamples::new(&b, corpus);
        assert!(!overlap(&sa, &sb, corpus, |_| true));
    }

    #[test]
    fn overlap_found_through_witnesses() {
        let corpus = SampleCorpus::standard();
        let a = PathPattern::new("**/*.tsx");
        let b = PathPattern::new("app/widgets/*.tsx");
        let sa = PatternSamples::new(&a, corpus);
        let sb = PatternSamples::new(&b, corpus);
        assert!(overlap(&sa, &sb, corpus, |_| true));
        assert!(overlap(&sb, &sa, corpus, |_| true));
    }

    #[test]
    fn overlap_of_directory_and_extension_patterns() {
        let corpus = SampleCorpus::standard();
        let a = PathPattern::new("**/*.vue");
        let b = PathPattern::new("frontend/widgets/**");
        let sa = PatternSamples::new(&a, corpus);
        let sb = PatternSamples::new(&b, corpus);
        assert!(overlap(&sa, &sb, corpus, |_| true));
        assert!(overlap(&sb, &sa, corpus, |_| true));
    }

    #[test]
    fn language_witnesses_reach_directories_outside_the_corpus() {
        let pat = PathPattern::new("app/**");
        let ws = language_witnesses(&pat, "typescript");
        assert!(ws.contains(&"app/sample.ts".to_string()));
        assert!(ws.contains(&"app/a/b/sample.ts".to_string()));
        assert!(ws
            .iter()
            .all(|w| pat.matches(w) && languages::is_language_file(w, "typescript")));
    }

    #[test]
    fn language_witnesses_respect_the_pattern() {
        assert!(language_witnesses(&PathPattern::new("app/**/*.py"), "typescript").is_empty());
        assert_eq!(
            language_witnesses(&PathPattern::new("deploy/*"), "dockerfile"),
            vec![
                "deploy/sample.dockerfile".to_string(),
                "deploy/Dockerfile".to_string(),
                "deploy/Containerfile".to_string(),
            ]
        );
        assert!(language_witnesses(&PathPattern::new("src/{a,b"), "typescript").is_empty());
    }

    #[test]
    fn subset_detection() {
        let corpus = SampleCorpus::standard();
        let outer = PathPattern::new("**/*.ts");
        let inner = PathPattern::new("**/*.test.ts");
        let so = PatternSamples::new(&outer, corpus);
        let si = PatternSamples::new(&inner, corpus);
        assert!(is_subset(&si, &so, corpus));
        assert!(!is_subset(&so, &si, corpus));
    }

    #[test]
    fn invalid_pattern_has_no_samples() {
        let corpus = SampleCorpus::standard();
        let bad = PathPattern::new("src/[oops");
        let samples = PatternSamples::new(&bad, corpus);
        assert_eq!(samples.matched(corpus).count(), 0);
    }
}
