//! Error types shared by the scanning, resolving and rewriting stages.

use std::path::PathBuf;
use std::process::ExitStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} is not a directory", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Failed to walk {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExclude {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    /// `git log` exited non-zero.
    #[error("git log failed for '{path}' ({status}): {stderr}")]
    HistoryQuery {
        path: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The path is referenced but no commit in the repository touches it.
    #[error("No commit history for '{path}'")]
    NoHistory { path: String },
}
