//! Command-line interface definitions.
//!
//! A single command: scan a directory of workflow files, resolve each
//! referenced action path against the local actions repository, and rewrite
//! stale pins.

use clap::Parser;
use std::path::PathBuf;

/// Update XRPLF/actions hash references in GitHub workflow/action YAML files.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Directory to scan recursively for `.yml` files.
    pub directory: PathBuf,

    /// Show what would be updated without making changes.
    #[arg(long)]
    pub dry_run: bool,

    /// Local checkout of the actions repository to read commit history from.
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Glob patterns for directories/files to exclude (e.g., "node_modules", "*.generated.yml").
    /// Matched against the path relative to `directory` and against the entry name.
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Interactively confirm each file's changes before writing it.
    #[arg(short, long)]
    pub interactive: bool,

    /// Emit the run report as JSON instead of human-readable output.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
