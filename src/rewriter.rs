//! File rewriting for refreshing pinned hashes.
//!
//! Replacement is substring-based: every occurrence of a stale reference's
//! exact matched text is swapped for the same path pinned to the resolved
//! hash. Bytes outside those substrings are left untouched, so rewriting
//! file content incrementally across several references stays safe.

use crate::error::{Error, Result};
use crate::resolver::HashMapping;
use crate::scanner::{Reference, ScanResults};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A single substitution applied (or to be applied) to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Update {
    pub file: PathBuf,
    pub old: String,
    pub new: String,
}

/// The in-memory result of updating one file.
#[derive(Debug)]
pub struct FileRewrite {
    pub path: PathBuf,
    pub original: String,
    pub content: String,
    pub updates: Vec<Update>,
}

impl FileRewrite {
    /// True when the final content differs from what is on disk.
    pub fn is_modified(&self) -> bool {
        self.content != self.original
    }
}

/// Outcome of a full rewrite pass.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub files_with_references: usize,
    pub paths_resolved: usize,
    pub total_updates: usize,
    pub files_modified: usize,
    pub files_declined: usize,
    pub updates: Vec<Update>,
}

/// Replaces stale references in `content`.
///
/// Returns the new content and the `(old, new)` pairs substituted, in
/// reference order. References whose hash already matches `mapping`, or whose
/// path is absent from it, are skipped.
pub fn rewrite_content(
    content: &str,
    references: &BTreeSet<Reference>,
    mapping: &HashMapping,
) -> (String, Vec<(String, String)>) {
    let mut result = content.to_string();
    let mut substitutions = Vec::new();

    for reference in references {
        let Some(latest) = mapping.get(&reference.action_path) else {
            continue;
        };
        if reference.current_hash == *latest {
            continue;
        }

        let new_ref = reference.pinned_to(latest);
        result = result.replace(&reference.full_match, &new_ref);
        substitutions.push((reference.full_match.clone(), new_ref));
    }

    (result, substitutions)
}

/// Reads `file` and computes its updated content without writing.
pub fn plan_file(
    file: &Path,
    references: &BTreeSet<Reference>,
    mapping: &HashMapping,
) -> Result<FileRewrite> {
    let original = std::fs::read_to_string(file).map_err(|source| Error::Read {
        path: file.to_path_buf(),
        source,
    })?;
    let (content, substitutions) = rewrite_content(&original, references, mapping);
    let updates = substitutions
        .into_iter()
        .map(|(old, new)| Update {
            file: file.to_path_buf(),
            old,
            new,
        })
        .collect();

    Ok(FileRewrite {
        path: file.to_path_buf(),
        original,
        content,
        updates,
    })
}

/// Overwrites the file with its rewritten content.
pub fn write_file(rewrite: &FileRewrite) -> Result<()> {
    std::fs::write(&rewrite.path, &rewrite.content).map_err(|source| Error::Write {
        path: rewrite.path.clone(),
        source,
    })?;
    tracing::debug!(file = %rewrite.path.display(), "wrote updated file");
    Ok(())
}

/// Applies `mapping` to every scanned file.
///
/// `on_file` is called for each file with at least one update, before
/// anything is written. Returning `false` leaves that file alone. In dry-run
/// mode nothing is written and the return value only affects counting.
///
/// Files are written one at a time; a failure part-way leaves earlier files
/// already rewritten.
pub fn rewrite_all(
    results: &ScanResults,
    mapping: &HashMapping,
    dry_run: bool,
    mut on_file: impl FnMut(&FileRewrite) -> bool,
) -> Result<RunReport> {
    let mut report = RunReport {
        dry_run,
        files_with_references: results.len(),
        paths_resolved: mapping.len(),
        ..RunReport::default()
    };

    for (file, references) in results {
        let rewrite = plan_file(file, references, mapping)?;
        if rewrite.updates.is_empty() {
            continue;
        }

        if !on_file(&rewrite) {
            report.files_declined += 1;
            continue;
        }

        report.total_updates += rewrite.updates.len();
        report.updates.extend(rewrite.updates.iter().cloned());

        if !rewrite.is_modified() {
            continue;
        }
        report.files_modified += 1;

        if !dry_run {
            write_file(&rewrite)?;
        }
    }

    Ok(report)
}
