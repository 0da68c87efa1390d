//! Per-run version cache

use crate::domain::{normalize_name, Version};
use crate::error::OracleError;
use crate::registry::VersionOracle;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Versions already looked up during this run, keyed by normalized name
///
/// Entries are never invalidated; a cache lives exactly as long as one run.
#[derive(Debug, Default)]
pub struct VersionCache {
    entries: HashMap<String, Vec<Version>>,
    lookups: usize,
}

impl VersionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached versions for `package`, querying `oracle` on first use
    pub async fn get_or_fetch(
        &mut self,
        oracle: &dyn VersionOracle,
        package: &str,
    ) -> Result<&[Version], OracleError> {
        let versions = match self.entries.entry(normalize_name(package)) {
            Entry::Occupied(entry) => {
                debug!(package, "version cache hit");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(package, oracle = oracle.name(), "looking up versions");
                let versions = oracle.lookup_versions(package).await?;
                self.lookups += 1;
                entry.insert(versions)
            }
        };
        Ok(versions.as_slice())
    }

    /// Number of distinct packages cached
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was looked up yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of oracle queries made
    pub fn lookups(&self) -> usize {
        self.lookups
    }
}
