//! Reading and writing rule files.
//!
//! `.json` files hold a bare array or `{ "rules": [...] }`. Anything else is
//! read as TOML, where the list lives under `[[rules]]` and may share the
//! file with `ruleswitch.toml` settings.

use anyhow::{Context, Result};
use ruleswitch_core::{ruleset, Rule};
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Loads the rule list stored at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a valid list.
pub fn load(path: &Path) -> Result<Vec<Rule>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file: {}", path.display()))?;
    let rules = if is_json(path) {
        ruleset::load_rules_from_json(&content)
    } else {
        ruleset::load_rules_from_toml(&content)
    }
    .with_context(|| format!("Invalid rule file: {}", path.display()))?;
    tracing::debug!("Loaded {} rule(s) from {}", rules.len(), path.display());
    Ok(rules)
}

/// Writes `rules` back to `path`.
///
/// For TOML only the `rules` key is replaced; other tables in the file are
/// kept. Comments are not.
///
/// # Errors
///
/// Returns an error if the existing file is not valid TOML or the write fails.
pub fn save(path: &Path, rules: &[Rule]) -> Result<()> {
    let content = if is_json(path) {
        let mut json = ruleset::rules_to_json(rules)?;
        json.push('\n');
        json
    } else {
        let mut table = if path.exists() {
            let existing = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read rule file: {}", path.display()))?;
            existing
                .parse::<toml::Table>()
                .with_context(|| format!("Invalid TOML in {}", path.display()))?
        } else {
            toml::Table::new()
        };
        table.insert("rules".to_string(), ruleset::rules_to_toml_value(rules)?);
        toml::to_string_pretty(&table)?
    };
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write rule file: {}", path.display()))?;
    tracing::debug!("Wrote {} rule(s) to {}", rules.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleswitch_core::Predicate;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG_WITH_RULES: &str = r#"
[lint]
known_languages = ["svelte"]

[[rules]]
name = "ts tests"
target = "Light"
when = { language = "typescript", pattern = "**/*.test.ts" }

[[rules]]
name = "ts"
target = "Dark"
when = { language = "typescript" }
"#;

    #[test]
    fn loads_rules_next_to_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ruleswitch.toml");
        fs::write(&path, CONFIG_WITH_RULES).unwrap();

        let rules = load(&path).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].name(), "ts tests");
        assert_eq!(rules[1].target(), "Dark");
    }

    #[test]
    fn save_keeps_other_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ruleswitch.toml");
        fs::write(&path, CONFIG_WITH_RULES).unwrap();

        let mut rules = load(&path).unwrap();
        rules.remove(0);
        save(&path, &rules).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("svelte"));
        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded, rules);
    }

    #[test]
    fn json_by_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        let rules = vec![Rule::new("md", Predicate::new().language("markdown"), "Paper").unwrap()];

        save(&path, &rules).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("\"rules\""));
        assert_eq!(load(&path).unwrap(), rules);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load(Path::new("/nonexistent/rules.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/rules.toml"));
    }
}
