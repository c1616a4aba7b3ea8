//! List checks command implementation.

use ruleswitch_core::checks::all_checks;

/// Runs the list-checks command.
pub fn run() {
    println!("Available checks:\n");
    println!("{:<8} {:<20} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for check in all_checks() {
        println!(
            "{:<8} {:<20} {:<9} {}",
            check.code(),
            check.name(),
            check.default_severity().to_string(),
            check.description()
        );
    }

    println!("\nUse --checks to run a subset, e.g.:");
    println!("  ruleswitch lint --checks duplicate,unreachable");
    println!("  ruleswitch lint --checks RS001,RS002");
    println!("\nOverride per check in ruleswitch.toml:");
    println!("  [checks.reorder-suggestion]");
    println!("  enabled = false");
}
