//! Report types
//!
//! Provides structures for tracking results at file and run levels.

use super::UpdateResult;
use crate::manifest::Rewrite;
use std::path::PathBuf;

/// Everything learned about a single manifest file
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestReport {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Per-requirement results, in file order
    pub results: Vec<UpdateResult>,
    /// Rewritten manifest, present only when there were updates
    pub rewrite: Option<Rewrite>,
}

impl ManifestReport {
    /// Creates an empty report
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            results: Vec::new(),
            rewrite: None,
        }
    }

    /// Adds a result
    pub fn add_result(&mut self, result: UpdateResult) {
        self.results.push(result);
    }

    /// Returns all updates
    pub fn updates(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| r.is_update())
    }

    /// Returns all skips
    pub fn skips(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| r.is_skip())
    }

    /// Returns the number of updates
    pub fn update_count(&self) -> usize {
        self.updates().count()
    }

    /// Returns true if any requirement is outdated
    pub fn has_updates(&self) -> bool {
        self.results.iter().any(|r| r.is_update())
    }

    /// Returns true if the rewritten contents were written back
    pub fn written(&self) -> bool {
        self.rewrite.as_ref().is_some_and(|r| r.written)
    }
}

/// Summary of a whole run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    /// Reports in the order the files were given
    pub manifests: Vec<ManifestReport>,
    /// Whether rewrites are written back to disk
    pub write: bool,
}

impl RunSummary {
    /// Creates a new RunSummary
    pub fn new(write: bool) -> Self {
        Self {
            manifests: Vec::new(),
            write,
        }
    }

    /// Adds a manifest report
    pub fn add_manifest(&mut self, manifest: ManifestReport) {
        self.manifests.push(manifest);
    }

    /// Returns the total number of outdated requirements
    pub fn total_updates(&self) -> usize {
        self.manifests.iter().map(|m| m.update_count()).sum()
    }

    /// Returns the number of lines that could not be rewritten
    pub fn total_annotated(&self) -> usize {
        self.manifests
            .iter()
            .filter_map(|m| m.rewrite.as_ref())
            .map(|r| r.failed)
            .sum()
    }

    /// Returns the number of files written back
    pub fn files_written(&self) -> usize {
        self.manifests.iter().filter(|m| m.written()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Operator, Requirement, SkipReason, Version};
    use std::str::FromStr;

    fn requirement(name: &str) -> Requirement {
        Requirement::new(
            name,
            Operator::Exact,
            Version::from_str("1.0").unwrap(),
            "1.0",
            0,
        )
    }

    #[test]
    fn test_manifest_report_counts() {
        let mut report = ManifestReport::new("requirements.txt");
        assert!(!report.has_updates());

        report.add_result(UpdateResult::update(
            requirement("requests"),
            Version::from_str("2.0").unwrap(),
        ));
        report.add_result(UpdateResult::skip(
            requirement("flask"),
            SkipReason::AlreadyLatest,
        ));

        assert!(report.has_updates());
        assert_eq!(report.update_count(), 1);
        assert_eq!(report.skips().count(), 1);
        assert!(!report.written());
    }

    #[test]
    fn test_run_summary_totals() {
        let mut summary = RunSummary::new(false);
        let mut report = ManifestReport::new("a.txt");
        report.add_result(UpdateResult::update(
            requirement("requests"),
            Version::from_str("2.0").unwrap(),
        ));
        summary.add_manifest(report);
        summary.add_manifest(ManifestReport::new("b.txt"));

        assert_eq!(summary.total_updates(), 1);
        assert_eq!(summary.total_annotated(), 0);
        assert_eq!(summary.files_written(), 0);
    }
}
