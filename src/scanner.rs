//! Workflow file scanner.
//!
//! Recursively walks a directory to collect `.yml` files and extracts
//! `XRPLF/actions/<path>@<sha>` references from their text. Hidden
//! directories are walked too, since workflows live under `.github/`.

use crate::error::{Error, Result};
use glob::Pattern;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Literal prefix shared by every reference into the actions repository.
pub const REFERENCE_PREFIX: &str = "XRPLF/actions/";

/// Matches `XRPLF/actions/<path>@<40 hex>`.
///
/// The path is either a `.github/workflows/...` file, which may contain any
/// non-whitespace character except `@`, or a directory restricted to
/// `[a-z0-9._/-]`.
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"XRPLF/actions/((?:\.github/workflows/[^@\s]+|[a-z0-9._/-]+))@([a-f0-9]{40})")
        .unwrap()
});

/// A pinned reference found in a workflow file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Reference {
    /// The whole matched text, e.g. `XRPLF/actions/get-nproc@<sha>`.
    pub full_match: String,
    /// Path inside the actions repository, e.g. `get-nproc` or
    /// `.github/workflows/pre-commit.yml`.
    pub action_path: String,
    /// The 40-character commit hash currently pinned.
    pub current_hash: String,
}

impl Reference {
    /// Renders this reference pinned to `hash` instead of its current one.
    pub fn pinned_to(&self, hash: &str) -> String {
        format!("{}{}@{}", REFERENCE_PREFIX, self.action_path, hash)
    }
}

/// Distinct references per file. Files without references are absent.
pub type ScanResults = BTreeMap<PathBuf, BTreeSet<Reference>>;

/// Extracts every distinct reference from `source`.
pub fn extract_references(source: &str) -> BTreeSet<Reference> {
    REFERENCE_RE
        .captures_iter(source)
        .map(|caps| Reference {
            full_match: caps[0].to_string(),
            action_path: caps[1].to_string(),
            current_hash: caps[2].to_string(),
        })
        .collect()
}

/// Reads `file` and extracts its references.
pub fn extract_file_references(file: &Path) -> Result<BTreeSet<Reference>> {
    let source = std::fs::read_to_string(file).map_err(|source| Error::Read {
        path: file.to_path_buf(),
        source,
    })?;
    Ok(extract_references(&source))
}

/// Compiles `--exclude` globs.
pub fn compile_excludes(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|source| Error::InvalidExclude {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

/// Collects all `.yml` files under `root` in file-name order, skipping
/// entries matched by `excludes`.
pub fn collect_yml_files(root: &Path, excludes: &[Pattern]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(root, e, excludes))
    {
        let entry = entry.map_err(|source| Error::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        // Symlinked workflows are read and written through their target.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file
            && entry.path().extension().is_some_and(|ext| ext == "yml")
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_excluded(root: &Path, entry: &walkdir::DirEntry, excludes: &[Pattern]) -> bool {
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    let name = entry.file_name().to_string_lossy();
    excludes
        .iter()
        .any(|p| p.matches_path(relative) || p.matches(&name))
}

/// Scans every `.yml` file under `root` for references.
///
/// `on_found` is called once per file that contains references, in scan
/// order, so callers can report progress while the walk continues.
pub fn scan(
    root: &Path,
    excludes: &[Pattern],
    mut on_found: impl FnMut(&Path, &BTreeSet<Reference>),
) -> Result<ScanResults> {
    if !root.is_dir() {
        return Err(Error::InvalidDirectory(root.to_path_buf()));
    }

    let files = collect_yml_files(root, excludes)?;
    tracing::debug!(root = %root.display(), files = files.len(), "collected workflow files");

    let mut results = ScanResults::new();
    for file in files {
        let references = extract_file_references(&file)?;
        if references.is_empty() {
            continue;
        }
        on_found(&file, &references);
        results.insert(file, references);
    }

    Ok(results)
}
