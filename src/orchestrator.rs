//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: parse → look up → judge → rewrite
//! - One oracle query per distinct package for the whole run
//! - Preview and write-back modes

use crate::config::Settings;
use crate::domain::{ManifestReport, RunSummary, UpdateResult};
use crate::error::AppError;
use crate::manifest::{parse_requirements, LineUpdates, ManifestWriter};
use crate::progress::ProgressListener;
use crate::registry::{create_oracle, VersionCache, VersionOracle};
use crate::update::{UpdateFilter, UpdateJudge};
use std::path::Path;
use tracing::debug;

/// Orchestrator for coordinating the update workflow
///
/// Lookups are awaited one at a time; the cache lives as long as the
/// orchestrator, so a package shared by several files is queried once.
pub struct Orchestrator {
    /// Source of available versions
    oracle: Box<dyn VersionOracle>,
    /// Versions already looked up during this run
    cache: VersionCache,
    /// Decides whether a requirement is outdated
    judge: UpdateJudge,
    /// Produces (and optionally persists) the rewritten manifest
    writer: ManifestWriter,
}

impl Orchestrator {
    /// Create an orchestrator from resolved settings
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let oracle = create_oracle(&settings.oracle)?;
        Ok(Self::with_oracle(
            oracle,
            settings.update_filter(),
            settings.write,
        ))
    }

    /// Create an orchestrator with a custom oracle (for testing)
    pub fn with_oracle(oracle: Box<dyn VersionOracle>, filter: UpdateFilter, write: bool) -> Self {
        Self {
            oracle,
            cache: VersionCache::new(),
            judge: UpdateJudge::new(filter),
            writer: ManifestWriter::new(write),
        }
    }

    /// Number of oracle queries made so far
    pub fn lookups(&self) -> usize {
        self.cache.lookups()
    }

    /// Check one manifest and build its rewrite
    pub async fn run_file(
        &mut self,
        path: &Path,
        progress: &mut dyn ProgressListener,
    ) -> Result<ManifestReport, AppError> {
        let requirements = parse_requirements(path)?;
        debug!(path = %path.display(), count = requirements.len(), "parsed requirements");

        let mut report = ManifestReport::new(path);
        let mut line_updates = LineUpdates::new();

        for requirement in requirements {
            if let Some(reason) = self.judge.should_skip(&requirement) {
                report.add_result(UpdateResult::skip(requirement, reason));
                continue;
            }

            progress.lookup_started(&requirement.name);
            let available = match self
                .cache
                .get_or_fetch(self.oracle.as_ref(), &requirement.name)
                .await
            {
                Ok(versions) => versions,
                Err(e) => {
                    progress.lookup_finished(&requirement.name, false);
                    return Err(e.into());
                }
            };
            let result = self.judge.judge(&requirement, available);
            progress.lookup_finished(&requirement.name, result.is_update());

            if let UpdateResult::Update {
                requirement,
                new_version,
            } = &result
            {
                line_updates.insert_span(
                    requirement.first_line_index,
                    requirement.line_index,
                    requirement.raw_version.clone(),
                    new_version.to_string(),
                );
            }
            report.add_result(result);
        }

        if !line_updates.is_empty() {
            report.rewrite = Some(self.writer.apply(path, &line_updates)?);
        }

        Ok(report)
    }

    /// Check every manifest in order, stopping at the first error
    pub async fn run(
        &mut self,
        paths: &[impl AsRef<Path>],
        progress: &mut dyn ProgressListener,
    ) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::new(self.writer.writes());
        for path in paths {
            let report = self.run_file(path.as_ref(), progress).await?;
            summary.add_manifest(report);
        }
        Ok(summary)
    }
}
