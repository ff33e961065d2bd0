use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use narrowing_patcher::catalog::{CONFIRMATION, DEFAULT_TARGET};
use narrowing_patcher::{PatchReport, Patcher, RuleOutcome};
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "narrowing-patcher")]
#[command(
    about = "Add discriminant guards and narrowed casts to CBTExercises.tsx",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// File to rewrite in place
    #[arg(default_value = DEFAULT_TARGET)]
    file: PathBuf,

    /// Dry run - show what would be changed without modifying the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let patcher = Patcher::new()?;

    if cli.dry_run {
        let report = patcher.preview(&cli.file)?;
        println!("{}", "[DRY RUN - showing what would be applied]".cyan());
        print_outcomes(&report);
        if cli.diff {
            display_diff(&report.file, &report.original, &report.patched);
        }
        return Ok(());
    }

    let report = patcher.run(&cli.file)?;
    if cli.diff && report.changed() {
        display_diff(&report.file, &report.original, &report.patched);
    }

    println!("{CONFIRMATION}");
    Ok(())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_outcomes(report: &PatchReport) {
    for outcome in &report.outcomes {
        let line = match outcome {
            RuleOutcome::Applied { .. } => format!("{} {}", "✓".green(), outcome),
            RuleOutcome::AlreadyApplied { .. } => format!("{} {}", "⊙".yellow(), outcome),
            RuleOutcome::NoMatch { .. } => format!("{} {}", "∅".dimmed(), outcome),
        };
        println!("  {line}");
    }
    println!("{report}");
}

/// Print changed hunks only, with two lines of context.
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!("{}", format!("--- {} (original)", file.display()).dimmed());
    println!("{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);
    for hunk in diff.unified_diff().context_radius(2).iter_hunks() {
        println!("{}", hunk.header().to_string().cyan());
        for change in hunk.iter_changes() {
            let line = match change.tag() {
                ChangeTag::Delete => format!("-{change}").red(),
                ChangeTag::Insert => format!("+{change}").green(),
                ChangeTag::Equal => format!(" {change}").normal(),
            };
            print!("{line}");
            if change.missing_newline() {
                println!();
            }
        }
    }
}
