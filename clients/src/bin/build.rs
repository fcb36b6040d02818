//! `slr-ontology-build` — Builds the pattern ontology from a literature-review
//! dataset and writes the artifacts to the output directory.
//!
//! **Outputs:**
//! - `<out>/classes.ttl` — one class per canonical pattern
//! - `<out>/canonicals.ttl` — one individual per canonical pattern
//! - `<out>/examples.ttl` — one individual per paper-reported pattern
//!
//! **Usage:**
//! ```text
//! slr-ontology-build [--dataset <path>] [--templates <dir>] [--out <dir>]
//!                    [--owner <name>] [--strict] [-v...]
//! ```
//!
//! Exits non-zero if the dataset or a template cannot be loaded, if output
//! cannot be written, or (with `--strict`) if any record has an error.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use slr_ontology::{build, BuildOptions, GenerationReport, DEFAULT_OWNER};
use tracing::Level;

/// Build the SLR pattern ontology artifacts.
#[derive(Parser)]
#[command(
    name = "slr-ontology-build",
    about = "Build ontology artifacts from a literature-review pattern dataset"
)]
struct Args {
    /// Dataset JSON file.
    #[arg(long, default_value = "patterns_data.json")]
    dataset: PathBuf,

    /// Directory holding class.txt, canonical.txt, paper.txt and relation.txt
    /// (default: built-in templates).
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Output directory for generated artifacts.
    #[arg(long, default_value = "results")]
    out: PathBuf,

    /// Owner segment of the ontology IRI.
    #[arg(long, default_value = DEFAULT_OWNER)]
    owner: String,

    /// Write nothing if any record has an error-severity issue.
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let options = BuildOptions {
        dataset: args.dataset,
        templates: args.templates,
        out_dir: args.out,
        owner: args.owner,
        strict: args.strict,
    };

    let outcome = build(&options)
        .with_context(|| format!("Failed to build ontology from {}", options.dataset.display()))?;

    println!(
        "SLR pattern ontology: {} classes, {} canonical patterns, {} examples, {} relations",
        outcome.report.classes,
        outcome.report.canonicals,
        outcome.report.examples,
        outcome.report.relations
    );
    for path in &outcome.written {
        println!("  Written: {}", path.display());
    }

    print_issues(&outcome.report);

    if outcome.withheld {
        eprintln!(
            "Build FAILED (strict): {} record error(s); no artifacts written.",
            outcome.report.error_count()
        );
        process::exit(1);
    }

    println!("Build complete.");
    Ok(())
}

fn print_issues(report: &GenerationReport) {
    if report.is_clean() {
        return;
    }
    println!();
    println!("Issues");
    println!("======");
    for issue in &report.issues {
        println!("{issue}");
        for detail in &issue.details {
            println!("       {detail}");
        }
    }
    println!();
    println!(
        "Summary: {} warnings, {} errors",
        report.warning_count(),
        report.error_count()
    );
}
