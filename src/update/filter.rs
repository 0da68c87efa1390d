//! Update filter configuration
//!
//! This module provides the UpdateFilter struct that encapsulates
//! all filter options for update judgment.

use crate::domain::normalize_name;

/// Filter configuration for update judgment
#[derive(Debug, Clone, Default)]
pub struct UpdateFilter {
    /// Packages to exclude from updates (normalized names)
    pub exclude: Vec<String>,
    /// If non-empty, only check these packages (normalized names)
    pub only: Vec<String>,
    /// Consider pre-release and development versions
    pub include_prereleases: bool,
}

impl UpdateFilter {
    /// Create a new UpdateFilter with default settings (check everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set packages to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude.iter().map(|n| normalize_name(n)).collect();
        self
    }

    /// Set packages to check (only list)
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only.iter().map(|n| normalize_name(n)).collect();
        self
    }

    /// Set whether pre-releases are update candidates
    pub fn with_prereleases(mut self, include: bool) -> Self {
        self.include_prereleases = include;
        self
    }

    /// Check if a package should be processed
    pub fn should_process_package(&self, name: &str) -> bool {
        let name = normalize_name(name);
        if !self.only.is_empty() {
            return self.only.contains(&name);
        }
        !self.exclude.contains(&name)
    }
}
