//! actions-pin-update: refresh `XRPLF/actions/<path>@<sha>` pins in workflow files.
//!
//! Scans a directory for `.yml` files, asks the local actions repository's git
//! history for the latest commit touching each referenced path, and rewrites
//! stale hashes in place (or only reports them with `--dry-run`).

use actions_pin_update::cli::Args;
use actions_pin_update::{
    FileRewrite, GitHistory, Reference, RunReport, resolver, rewriter, scanner,
};
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dialoguer::Confirm;
use std::collections::BTreeSet;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let excludes = scanner::compile_excludes(&args.exclude)?;
    let quiet = args.json;

    let results = scanner::scan(&args.directory, &excludes, |file, references| {
        if !quiet {
            print_found(file, references);
        }
    })
    .with_context(|| format!("Failed to scan {}", args.directory.display()))?;
    tracing::info!(files = results.len(), "scan complete");

    let history = GitHistory::new(&args.repo);
    let mapping = resolver::resolve(&results, &history).with_context(|| {
        format!(
            "Failed to resolve latest commits in {}",
            history.repo().display()
        )
    })?;

    if !quiet {
        print_banner(if args.dry_run {
            "Updates to be applied:"
        } else {
            "Applying updates:"
        });
    }

    let report = rewriter::rewrite_all(&results, &mapping, args.dry_run, |rewrite| {
        if !quiet {
            print_updates(rewrite);
        }
        if !args.interactive || args.dry_run {
            return true;
        }
        let accepted = confirm_file(rewrite);
        if !accepted && !quiet {
            println!("{} {}", "skipped:".yellow().bold(), rewrite.path.display());
        }
        accepted
    })
    .context("Failed to apply updates")?;

    if quiet {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

/// `RUST_LOG` wins when set, otherwise `warn`. `--verbose` adds a global
/// `debug` directive on top.
fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn confirm_file(rewrite: &FileRewrite) -> bool {
    let prompt = format!(
        "Write {} update(s) to {}?",
        rewrite.updates.len(),
        rewrite.path.display()
    );
    match Confirm::new().with_prompt(prompt).default(false).interact() {
        Ok(accepted) => accepted,
        Err(err) => {
            tracing::warn!(
                file = %rewrite.path.display(),
                error = %err,
                "confirmation failed, skipping file"
            );
            false
        }
    }
}

fn print_found(file: &Path, references: &BTreeSet<Reference>) {
    println!(
        "{} Found {} reference(s) in {}",
        "info:".blue().bold(),
        references.len(),
        file.display()
    );
    for reference in references {
        println!(
            "  {}@{}",
            reference.action_path,
            reference.current_hash.dimmed()
        );
    }
}

fn print_banner(title: &str) {
    let rule = "=".repeat(80);
    println!("\n{rule}");
    println!("{}", title.bold());
    println!("{rule}");
}

fn print_updates(rewrite: &FileRewrite) {
    for update in &rewrite.updates {
        println!(
            "- {}: {} -> {}",
            update.file.display(),
            update.old.red(),
            update.new.green()
        );
    }
}

fn print_summary(report: &RunReport) {
    let rule = "=".repeat(80);
    println!("\n{rule}");
    if report.dry_run {
        println!(
            "Dry run complete: {} update(s) would be applied across {} file(s)",
            report.total_updates, report.files_modified
        );
        println!("{} Run without --dry-run to apply changes", "hint:".cyan().bold());
    } else {
        println!(
            "Updated {} reference(s) in {} file(s)",
            report.total_updates, report.files_modified
        );
        if report.files_declined > 0 {
            println!("Skipped {} file(s) at your request", report.files_declined);
        }
    }
    println!("{rule}");
}
