//! Update decision result types

use super::{Requirement, Version};
use std::fmt;

/// Reason why a requirement is not reported as outdated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Latest known version is not newer than the pinned one
    AlreadyLatest,
    /// The index returned no candidate versions
    NoVersionsAvailable,
    /// Package was excluded via --exclude
    Excluded,
    /// Package not in --only list
    NotInOnlyList,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyLatest => write!(f, "already at latest"),
            SkipReason::NoVersionsAvailable => write!(f, "no versions available"),
            SkipReason::Excluded => write!(f, "excluded by --exclude"),
            SkipReason::NotInOnlyList => write!(f, "not in --only list"),
        }
    }
}

/// Result of an update decision for a single requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// A newer version exists
    Update {
        /// The outdated requirement
        requirement: Requirement,
        /// The latest candidate version
        new_version: Version,
    },
    /// Nothing to do for this requirement
    Skip {
        /// The requirement that was skipped
        requirement: Requirement,
        /// The reason for skipping
        reason: SkipReason,
    },
}

impl UpdateResult {
    /// Creates an Update result
    pub fn update(requirement: Requirement, new_version: Version) -> Self {
        UpdateResult::Update {
            requirement,
            new_version,
        }
    }

    /// Creates a Skip result
    pub fn skip(requirement: Requirement, reason: SkipReason) -> Self {
        UpdateResult::Skip {
            requirement,
            reason,
        }
    }

    /// Returns true if this is an update result
    pub fn is_update(&self) -> bool {
        matches!(self, UpdateResult::Update { .. })
    }

    /// Returns true if this is a skip result
    pub fn is_skip(&self) -> bool {
        matches!(self, UpdateResult::Skip { .. })
    }

    /// Returns the requirement
    pub fn requirement(&self) -> &Requirement {
        match self {
            UpdateResult::Update { requirement, .. } => requirement,
            UpdateResult::Skip { requirement, .. } => requirement,
        }
    }

    /// Returns the new version if this is an update
    pub fn new_version(&self) -> Option<&Version> {
        match self {
            UpdateResult::Update { new_version, .. } => Some(new_version),
            UpdateResult::Skip { .. } => None,
        }
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateResult::Update {
                requirement,
                new_version,
            } => write!(
                f,
                "{}: {} -> {}",
                requirement.name, requirement.version, new_version
            ),
            UpdateResult::Skip {
                requirement,
                reason,
            } => write!(f, "{}: skipped ({})", requirement.name, reason),
        }
    }
}
