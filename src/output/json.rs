//! JSON output formatter for machine processing
//!
//! Nothing is written per manifest; a single document covering the whole
//! run is emitted from `finish`.

use crate::domain::{ManifestReport, RunSummary, SkipReason, UpdateResult};
use crate::manifest::RewrittenLine;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput {
    /// Whether rewrites were written back
    write: bool,
    /// Summary statistics
    summary: JsonSummary,
    /// Per-manifest results
    manifests: Vec<JsonManifest>,
}

#[derive(Serialize)]
struct JsonSummary {
    updates: usize,
    annotated: usize,
    written: usize,
}

/// JSON representation of a manifest result
#[derive(Serialize)]
struct JsonManifest {
    /// Path to the manifest file
    path: String,
    /// Whether the rewritten file was saved
    written: bool,
    /// List of updates
    updates: Vec<JsonUpdate>,
    /// Lines that could not be rewritten
    #[serde(skip_serializing_if = "Vec::is_empty")]
    annotated: Vec<JsonAnnotation>,
    /// List of skips (only in verbose mode)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skips: Vec<JsonSkip>,
}

#[derive(Serialize)]
struct JsonUpdate {
    name: String,
    operator: String,
    from: String,
    to: String,
    /// 1-based line number
    line: usize,
}

#[derive(Serialize)]
struct JsonAnnotation {
    /// 1-based line number
    line: usize,
    to: String,
}

#[derive(Serialize)]
struct JsonSkip {
    name: String,
    version: String,
    reason: String,
}

impl JsonFormatter {
    /// Convert skip reason to string
    fn skip_reason_to_string(reason: &SkipReason) -> &'static str {
        match reason {
            SkipReason::AlreadyLatest => "already_latest",
            SkipReason::NoVersionsAvailable => "no_versions_available",
            SkipReason::Excluded => "excluded",
            SkipReason::NotInOnlyList => "not_in_only_list",
        }
    }

    /// Convert manifest report to JSON representation
    fn manifest_to_json(&self, manifest: &ManifestReport) -> JsonManifest {
        let updates = manifest
            .updates()
            .filter_map(|result| match result {
                UpdateResult::Update {
                    requirement,
                    new_version,
                } => Some(JsonUpdate {
                    name: requirement.name.clone(),
                    operator: requirement.operator.to_string(),
                    from: requirement.raw_version.clone(),
                    to: new_version.to_string(),
                    line: requirement.line_index + 1,
                }),
                UpdateResult::Skip { .. } => None,
            })
            .collect();

        let annotated = manifest
            .rewrite
            .iter()
            .flat_map(|rewrite| rewrite.lines.iter().enumerate())
            .filter_map(|(index, line)| match line {
                RewrittenLine::Annotated { new, .. } => Some(JsonAnnotation {
                    line: index + 1,
                    to: new.clone(),
                }),
                _ => None,
            })
            .collect();

        let skips = if self.verbosity == Verbosity::Verbose {
            manifest
                .skips()
                .filter_map(|result| match result {
                    UpdateResult::Skip {
                        requirement,
                        reason,
                    } => Some(JsonSkip {
                        name: requirement.name.clone(),
                        version: requirement.raw_version.clone(),
                        reason: Self::skip_reason_to_string(reason).to_string(),
                    }),
                    UpdateResult::Update { .. } => None,
                })
                .collect()
        } else {
            Vec::new()
        };

        JsonManifest {
            path: manifest.path.display().to_string(),
            written: manifest.written(),
            updates,
            annotated,
            skips,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_manifest(
        &self,
        _manifest: &ManifestReport,
        _writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Ok(())
    }

    fn finish(&self, summary: &RunSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            write: summary.write,
            summary: JsonSummary {
                updates: summary.total_updates(),
                annotated: summary.total_annotated(),
                written: summary.files_written(),
            },
            manifests: summary
                .manifests
                .iter()
                .map(|m| self.manifest_to_json(m))
                .collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
