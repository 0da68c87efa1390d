//! Update judgment logic for requirements
//!
//! This module provides:
//! - Update filter configuration
//! - Update judgment engine that decides whether a requirement is outdated

mod filter;

pub use filter::UpdateFilter;

use crate::domain::{Requirement, SkipReason, UpdateResult, Version};

/// Returns true for pre-releases and development releases
pub fn is_prerelease(version: &Version) -> bool {
    version.is_pre() || version.is_dev()
}

/// Update judgment engine that decides whether a requirement is outdated
pub struct UpdateJudge {
    /// Filter configuration
    filter: UpdateFilter,
}

impl UpdateJudge {
    /// Create a new UpdateJudge with the given filter
    pub fn new(filter: UpdateFilter) -> Self {
        Self { filter }
    }

    /// Check if a requirement should be looked up at all
    /// Returns Some(SkipReason) if it should be skipped, None if it should be processed
    pub fn should_skip(&self, requirement: &Requirement) -> Option<SkipReason> {
        if self.filter.should_process_package(&requirement.name) {
            return None;
        }
        if !self.filter.only.is_empty() {
            Some(SkipReason::NotInOnlyList)
        } else {
            Some(SkipReason::Excluded)
        }
    }

    /// Latest version that counts as an update candidate
    ///
    /// Pre-releases only count when enabled or when the requirement itself
    /// pins a pre-release.
    pub fn latest_candidate<'a>(
        &self,
        requirement: &Requirement,
        available: &'a [Version],
    ) -> Option<&'a Version> {
        let allow_pre = self.filter.include_prereleases || is_prerelease(&requirement.version);
        available
            .iter()
            .filter(|v| allow_pre || !is_prerelease(v))
            .max()
    }

    /// Judge whether a requirement is behind the latest available version
    pub fn judge(&self, requirement: &Requirement, available: &[Version]) -> UpdateResult {
        if let Some(reason) = self.should_skip(requirement) {
            return UpdateResult::skip(requirement.clone(), reason);
        }

        let Some(latest) = self.latest_candidate(requirement, available) else {
            return UpdateResult::skip(requirement.clone(), SkipReason::NoVersionsAvailable);
        };

        if *latest > requirement.version {
            UpdateResult::update(requirement.clone(), latest.clone())
        } else {
            UpdateResult::skip(requirement.clone(), SkipReason::AlreadyLatest)
        }
    }
}
