//! Latest-hash resolution for referenced action paths.
//!
//! Builds the run-wide mapping from action path to the commit that last
//! touched it. Each distinct path is queried once, no matter how many files
//! or stale hashes reference it.

use crate::error::Result;
use crate::history::CommitHistory;
use crate::scanner::ScanResults;
use std::collections::BTreeMap;

/// Action path to its latest commit hash.
pub type HashMapping = BTreeMap<String, String>;

/// Resolves every action path referenced in `results`.
///
/// The first failing lookup aborts resolution; no partial mapping is
/// returned.
pub fn resolve(results: &ScanResults, history: &impl CommitHistory) -> Result<HashMapping> {
    let mut mapping = HashMapping::new();

    for reference in results.values().flatten() {
        if mapping.contains_key(&reference.action_path) {
            continue;
        }
        let latest = history.latest_commit(&reference.action_path)?;
        mapping.insert(reference.action_path.clone(), latest);
    }

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scanner::extract_references;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    const SHA_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const SHA_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
    const SHA_C: &str = "cccccccccccccccccccccccccccccccccccccccc";

    /// In-memory history that records every query it answers.
    struct FakeHistory {
        commits: HashMap<String, String>,
        queries: RefCell<Vec<String>>,
    }

    impl FakeHistory {
        fn new(items: &[(&str, &str)]) -> Self {
            Self {
                commits: items
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommitHistory for FakeHistory {
        fn latest_commit(&self, path: &str) -> Result<String> {
            self.queries.borrow_mut().push(path.to_string());
            self.commits
                .get(path)
                .cloned()
                .ok_or_else(|| Error::NoHistory {
                    path: path.to_string(),
                })
        }
    }

    fn results(files: &[(&str, &str)]) -> ScanResults {
        files
            .iter()
            .map(|(name, source)| (PathBuf::from(name), extract_references(source)))
            .collect()
    }

    #[test]
    fn resolves_each_path_once_across_files_and_hashes() {
        let first = format!("XRPLF/actions/get-nproc@{SHA_A}\nXRPLF/actions/get-nproc@{SHA_C}\n");
        let second = format!("XRPLF/actions/get-nproc@{SHA_A}\n");
        let scanned = results(&[("a.yml", first.as_str()), ("b.yml", second.as_str())]);
        let history = FakeHistory::new(&[("get-nproc", SHA_B)]);

        let mapping = resolve(&scanned, &history).unwrap();

        assert_eq!(mapping.get("get-nproc").map(String::as_str), Some(SHA_B));
        assert_eq!(history.queries.borrow().as_slice(), ["get-nproc"]);
    }

    #[test]
    fn resolves_distinct_paths() {
        let source = format!(
            "XRPLF/actions/get-nproc@{SHA_A}\n\
             XRPLF/actions/.github/workflows/pre-commit.yml@{SHA_A}\n"
        );
        let scanned = results(&[("a.yml", source.as_str())]);
        let history = FakeHistory::new(&[
            ("get-nproc", SHA_B),
            (".github/workflows/pre-commit.yml", SHA_C),
        ]);

        let mapping = resolve(&scanned, &history).unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[".github/workflows/pre-commit.yml"], SHA_C);
        assert_eq!(history.queries.borrow().len(), 2);
    }

    #[test]
    fn empty_results_perform_no_queries() {
        let history = FakeHistory::new(&[]);
        let mapping = resolve(&ScanResults::new(), &history).unwrap();
        assert!(mapping.is_empty());
        assert!(history.queries.borrow().is_empty());
    }

    #[test]
    fn lookup_failure_aborts_resolution() {
        let source =
            format!("XRPLF/actions/get-nproc@{SHA_A}\nXRPLF/actions/missing@{SHA_A}\n");
        let scanned = results(&[("a.yml", source.as_str())]);
        let history = FakeHistory::new(&[("get-nproc", SHA_B)]);

        let err = resolve(&scanned, &history).unwrap_err();
        assert!(matches!(err, Error::NoHistory { path } if path == "missing"));
    }
}
