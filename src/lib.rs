//! actions-pin-update library for refreshing commit-pinned action references.
//!
//! The workflow runs in three phases:
//!
//! 1. **Scanning**: Collect `.yml` files and extract `XRPLF/actions/<path>@<sha>` references
//! 2. **Resolving**: Ask git for the latest commit touching each referenced path, once per path
//! 3. **Rewriting**: Swap stale hashes for the resolved ones and write files back
//!
//! # Example
//!
//! ```no_run
//! use actions_pin_update::{history::GitHistory, resolver, rewriter, scanner};
//! use std::path::Path;
//!
//! let results = scanner::scan(Path::new("../rippled"), &[], |_, _| {}).unwrap();
//! let history = GitHistory::new(".");
//! let mapping = resolver::resolve(&results, &history).unwrap();
//!
//! // Preview only: nothing is written in dry-run mode.
//! let report = rewriter::rewrite_all(&results, &mapping, true, |_| true).unwrap();
//! println!("{} update(s) pending", report.total_updates);
//! ```

pub mod cli;
pub mod error;
pub mod history;
pub mod resolver;
pub mod rewriter;
pub mod scanner;

pub use error::{Error, Result};
pub use history::{CommitHistory, GitHistory};
pub use resolver::HashMapping;
pub use rewriter::{FileRewrite, RunReport, Update};
pub use scanner::{Reference, ScanResults};
