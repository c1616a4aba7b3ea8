//! Shared output formatting for lint results.

use anyhow::Result;
use miette::GraphicalReportHandler;
use ruleswitch_core::{IssueDiagnostic, LintReport, Rule, Severity};
use std::path::Path;

use crate::OutputFormat;

/// Print a lint report in the specified format.
pub fn print(
    report: &LintReport,
    rules: &[Rule],
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report, rules, file),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report, file),
        OutputFormat::Pretty => return print_pretty(report),
    }
    Ok(())
}

fn rule_name(rules: &[Rule], index: usize) -> &str {
    rules.get(index).map_or("?", Rule::name)
}

fn print_text(report: &LintReport, rules: &[Rule], file: &Path) {
    let (errors, warnings, infos) = report.count_by_severity();

    for issue in &report.issues {
        let severity_indicator = match issue.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}: rule #{} `{}`",
            issue.code,
            issue.kind,
            file.display(),
            issue.subject_index,
            rule_name(rules, issue.subject_index),
        );
        println!("  {}: {}", severity_indicator, issue.message);
        for &related in &issue.related_indices {
            println!("  = related: rule #{} `{}`", related, rule_name(rules, related));
        }
        if let Some(fix) = &issue.suggested_fix {
            println!("  = help: {fix}");
        }
        println!();
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} rule(s)\x1b[0m",
        summary_color, errors, warnings, infos, report.rules_checked
    );
}

fn print_json(report: &LintReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &LintReport, file: &Path) {
    for issue in &report.issues {
        println!("{}:{issue}", file.display());
    }
}

fn print_pretty(report: &LintReport) -> Result<()> {
    let handler = GraphicalReportHandler::new();
    for issue in &report.issues {
        let mut rendered = String::new();
        handler.render_report(&mut rendered, &IssueDiagnostic::from(issue))?;
        println!("{rendered}");
    }
    let (errors, warnings, infos) = report.count_by_severity();
    println!(
        "{errors} error(s), {warnings} warning(s), {infos} info(s) in {} rule(s)",
        report.rules_checked
    );
    Ok(())
}
