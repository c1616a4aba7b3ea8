//! ruleswitch CLI tool.
//!
//! Usage:
//! ```bash
//! ruleswitch lint [OPTIONS] [FILE]
//! ruleswitch eval [OPTIONS] [FILE]
//! ruleswitch fix [--dry-run] [FILE]
//! ruleswitch list-checks
//! ruleswitch init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use ruleswitch_core::{DebugSessionState, TestState, ViewMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod catalog_file;
mod commands;
mod config_resolver;
mod persist;
mod rules_file;

/// Pick a target with first-match rules, and audit the rules themselves
#[derive(Parser)]
#[command(name = "ruleswitch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a rule list
    Lint {
        /// Rule file, TOML or JSON (default: the resolved config file)
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Extra known language identifier (repeatable)
        #[arg(long = "known-language")]
        known_languages: Vec<String>,

        /// Target catalog JSON file (overrides `[catalog] path`)
        #[arg(long)]
        targets: Option<PathBuf>,

        /// Only run specific checks (comma-separated names or codes)
        #[arg(long)]
        checks: Option<String>,
    },

    /// Resolve which rule wins for a context
    Eval {
        /// Rule file, TOML or JSON (default: the resolved config file)
        file: Option<PathBuf>,

        /// Active file language (inferred from --path when omitted)
        #[arg(long)]
        language: Option<String>,

        /// Active file path, workspace-relative
        #[arg(long)]
        path: Option<String>,

        /// Workspace folder name
        #[arg(long)]
        workspace: Option<String>,

        /// Debug session state (active, inactive)
        #[arg(long)]
        debug: Option<DebugSessionState>,

        /// Debug adapter type
        #[arg(long)]
        debug_type: Option<String>,

        /// Test state (running, failed, passed, none)
        #[arg(long)]
        test: Option<TestState>,

        /// View mode (diff, merge, normal)
        #[arg(long)]
        view: Option<ViewMode>,

        /// Run a timer pass with these rule indices fired (comma-separated)
        #[arg(long, value_delimiter = ',')]
        timer_fired: Vec<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Apply suggested fixes until the rule list is clean
    Fix {
        /// Rule file, TOML or JSON (default: the resolved config file)
        file: Option<PathBuf>,

        /// Show the fixes without writing the file
        #[arg(long)]
        dry_run: bool,

        /// Also apply reorder suggestions
        #[arg(long)]
        reorder: bool,
    },

    /// List available checks
    ListChecks,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint and eval results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-issue compact format.
    Compact,
    /// Rich diagnostics.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir()?;
    let source = config_resolver::resolve(&cwd, cli.config.as_deref());

    match cli.command {
        Commands::Lint {
            file,
            format,
            known_languages,
            targets,
            checks,
        } => commands::lint::run(&commands::lint::LintArgs {
            file: file.as_deref(),
            source: &source,
            format,
            known_languages,
            targets: targets.as_deref(),
            checks,
        }),
        Commands::Eval {
            file,
            language,
            path,
            workspace,
            debug,
            debug_type,
            test,
            view,
            timer_fired,
            format,
        } => commands::eval::run(
            file.as_deref(),
            &source,
            &commands::eval::ContextArgs {
                language,
                path,
                workspace,
                debug,
                debug_type,
                test,
                view,
                timer_fired,
            },
            format,
        ),
        Commands::Fix {
            file,
            dry_run,
            reorder,
        } => commands::fix::run(file.as_deref(), &source, dry_run, reorder),
        Commands::ListChecks => {
            commands::list_checks::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(&cwd, force),
    }
}
