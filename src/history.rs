//! Commit history lookups against the local actions repository.
//!
//! Shells out to `git log -n 1 --pretty=format:%H -- <path>` to find the most
//! recent commit that touched a path. The lookup sits behind a trait so the
//! resolver can be exercised without a real repository.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Answers "which commit last modified this path?".
pub trait CommitHistory {
    /// Returns the full hash of the most recent commit touching `path`.
    fn latest_commit(&self, path: &str) -> Result<String>;
}

/// History backed by the `git` CLI, run against a fixed repository root.
#[derive(Debug, Clone)]
pub struct GitHistory {
    repo: PathBuf,
}

impl GitHistory {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }
}

impl CommitHistory for GitHistory {
    fn latest_commit(&self, path: &str) -> Result<String> {
        tracing::debug!(repo = %self.repo.display(), path, "querying git history");

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(["log", "-n", "1", "--pretty=format:%H", "--", path])
            .output()
            .map_err(Error::Spawn)?;

        if !output.status.success() {
            return Err(Error::HistoryQuery {
                path: path.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let commit = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if commit.is_empty() {
            return Err(Error::NoHistory {
                path: path.to_string(),
            });
        }

        tracing::debug!(path, commit = %commit, "resolved latest commit");
        Ok(commit)
    }
}
