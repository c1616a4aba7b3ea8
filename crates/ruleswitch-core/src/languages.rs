//! Built-in language identifiers and their file extensions.
//!
//! The first extension listed for a language is its canonical one. The table
//! drives three things: the unknown-language advisory, the sample corpus, and
//! the language/pattern compatibility test in overlap analysis.

/// Language identifiers with their extensions (without the leading dot).
const LANGUAGES: &[(&str, &[&str])] = &[
    ("bat", &["bat", "cmd"]),
    ("c", &["c", "h"]),
    ("clojure", &["clj", "cljs", "edn"]),
    ("coffeescript", &["coffee"]),
    ("cpp", &["cpp", "cc", "cxx", "hpp"]),
    ("csharp", &["cs"]),
    ("css", &["css"]),
    ("dart", &["dart"]),
    ("dockerfile", &["dockerfile"]),
    ("elixir", &["ex", "exs"]),
    ("erlang", &["erl", "hrl"]),
    ("fsharp", &["fs", "fsx"]),
    ("go", &["go"]),
    ("graphql", &["graphql", "gql"]),
    ("groovy", &["groovy", "gradle"]),
    ("handlebars", &["hbs", "handlebars"]),
    ("haskell", &["hs"]),
    ("html", &["html", "htm"]),
    ("ini", &["ini"]),
    ("java", &["java"]),
    ("javascript", &["js", "mjs", "cjs"]),
    ("javascriptreact", &["jsx"]),
    ("json", &["json"]),
    ("jsonc", &["jsonc"]),
    ("julia", &["jl"]),
    ("kotlin", &["kt", "kts"]),
    ("latex", &["tex"]),
    ("less", &["less"]),
    ("lua", &["lua"]),
    ("makefile", &["mk"]),
    ("markdown", &["md", "markdown"]),
    ("objective-c", &["m"]),
    ("ocaml", &["ml", "mli"]),
    ("perl", &["pl", "pm"]),
    ("php", &["php"]),
    ("plaintext", &["txt"]),
    ("powershell", &["ps1", "psm1"]),
    ("python", &["py", "pyi"]),
    ("r", &["r"]),
    ("razor", &["cshtml"]),
    ("ruby", &["rb"]),
    ("rust", &["rs"]),
    ("scala", &["scala", "sc"]),
    ("scss", &["scss"]),
    ("shellscript", &["sh", "bash", "zsh"]),
    ("sql", &["sql"]),
    ("svelte", &["svelte"]),
    ("swift", &["swift"]),
    ("toml", &["toml"]),
    ("typescript", &["ts", "mts", "cts"]),
    ("typescriptreact", &["tsx"]),
    ("vb", &["vb"]),
    ("vue", &["vue"]),
    ("xml", &["xml", "svg"]),
    ("yaml", &["yaml", "yml"]),
    ("zig", &["zig"]),
];

/// Whole file names for languages whose files usually have no extension.
const FILE_NAMES: &[(&str, &[&str])] = &[
    ("dockerfile", &["Dockerfile", "Containerfile"]),
    ("makefile", &["Makefile", "GNUmakefile", "makefile"]),
];

/// Returns true if `id` is a built-in language identifier.
#[must_use]
pub fn is_builtin(id: &str) -> bool {
    LANGUAGES.iter().any(|(lang, _)| *lang == id)
}

/// Returns the built-in language identifiers.
pub fn builtin_ids() -> impl Iterator<Item = &'static str> {
    LANGUAGES.iter().map(|(lang, _)| *lang)
}

/// Returns the extensions of a language, canonical first.
#[must_use]
pub fn extensions(id: &str) -> Option<&'static [&'static str]> {
    LANGUAGES
        .iter()
        .find(|(lang, _)| *lang == id)
        .map(|(_, exts)| *exts)
}

/// Returns the extension-less file names of a language.
#[must_use]
pub fn file_names(id: &str) -> &'static [&'static str] {
    FILE_NAMES
        .iter()
        .find(|(lang, _)| *lang == id)
        .map(|(_, names)| *names)
        .unwrap_or_default()
}

/// Returns every known extension, grouped by language, in table order.
pub fn all_extensions() -> impl Iterator<Item = &'static str> {
    LANGUAGES.iter().flat_map(|(_, exts)| exts.iter().copied())
}

/// Guesses the language of a file from its name or extension.
#[must_use]
pub fn language_for_path(path: &str) -> Option<&'static str> {
    let file_name = file_name_of(path);
    if let Some((lang, _)) = FILE_NAMES
        .iter()
        .find(|(_, names)| names.contains(&file_name))
    {
        return Some(*lang);
    }
    let ext = extension_of(path)?.to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(lang, _)| *lang)
}

/// Returns the extension of the last path segment.
///
/// Dotfiles such as `.env` have no extension.
#[must_use]
pub fn extension_of(path: &str) -> Option<&str> {
    let (stem, ext) = file_name_of(path).rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Returns true if `path` carries one of `extensions`.
#[must_use]
pub fn has_extension(path: &str, extensions: &[&str]) -> bool {
    extension_of(path).is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Returns true if `path` names a file of built-in language `id`, by
/// extension or by a well-known file name such as `Dockerfile`.
#[must_use]
pub fn is_language_file(path: &str, id: &str) -> bool {
    extensions(id).is_some_and(|exts| has_extension(path, exts))
        || file_names(id).contains(&file_name_of(path))
}
