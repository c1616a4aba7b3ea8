//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# ruleswitch configuration
#
# Rules are tried top to bottom; the first whose `when` clause fully
# matches wins. Keep specific rules above general ones.

[lint]
# Language ids beyond the built-in set
# known_languages = ["svelte", "astro"]

# Exit non-zero from `ruleswitch lint` at this severity or above
# fail_on = "warning"

[catalog]
# JSON list of valid targets: [{ "id": "Dark", "label": "Dark+" }]
# path = "targets.json"
ttl_secs = 300

# Per-check overrides, by name or code (see `ruleswitch list-checks`)
[checks.reorder-suggestion]
enabled = true
# severity = "warning"

[[rules]]
name = "test files"
target = "Light"
when = { language = "typescript", pattern = "**/*.test.ts" }

[[rules]]
name = "debugging"
target = "High Contrast"
when = { debugSession = "active" }

[[rules]]
name = "typescript"
target = "Dark"
when = { language = "typescript" }
"#;

/// Runs the init command.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join("ruleswitch.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit the [[rules]] list in ruleswitch.toml");
    println!("  2. Run: ruleswitch lint");
    println!("  3. Try: ruleswitch eval --path src/app.test.ts");

    Ok(())
}
