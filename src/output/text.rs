//! Text output formatter for human-readable display
//!
//! Every line written is itself valid requirements-file syntax (comments or
//! requirement lines), so the output can be redirected into a new manifest.

use crate::domain::{ManifestReport, RunSummary, UpdateResult};
use crate::manifest::RewrittenLine;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn banner(&self, title: &str, path: &str, writer: &mut dyn Write) -> std::io::Result<()> {
        let line = format!("######### {} {} #########", title, path);
        if self.color {
            writeln!(writer, "{}", line.cyan().bold())
        } else {
            writeln!(writer, "{}", line)
        }
    }

    /// Write one `name op new\t# currently old` line
    fn format_update_line(
        &self,
        result: &UpdateResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let UpdateResult::Update {
            requirement,
            new_version,
        } = result
        else {
            return Ok(());
        };

        if self.color {
            writeln!(
                writer,
                "{} {} {}\t{}",
                requirement.name,
                requirement.operator,
                new_version.to_string().green().bold(),
                format!("# currently {}", requirement.raw_version).dimmed()
            )
        } else {
            writeln!(
                writer,
                "{} {} {}\t# currently {}",
                requirement.name, requirement.operator, new_version, requirement.raw_version
            )
        }
    }

    fn format_skip_line(
        &self,
        result: &UpdateResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let UpdateResult::Skip {
            requirement,
            reason,
        } = result
        else {
            return Ok(());
        };

        let line = format!(
            "# {} {} {}: {}",
            requirement.name, requirement.operator, requirement.raw_version, reason
        );
        if self.color {
            writeln!(writer, "{}", line.dimmed())
        } else {
            writeln!(writer, "{}", line)
        }
    }

    fn format_rewritten_line(
        &self,
        line: &RewrittenLine,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let text = line.text().trim_end_matches(['\r', '\n']);
        if !self.color {
            return writeln!(writer, "{}", text);
        }
        match line {
            RewrittenLine::Unchanged(_) => writeln!(writer, "{}", text),
            RewrittenLine::Updated { .. } => writeln!(writer, "{}", text.green()),
            RewrittenLine::Annotated { .. } => writeln!(writer, "{}", text.red()),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_manifest(
        &self,
        manifest: &ManifestReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let path = manifest.path.display().to_string();

        self.banner("Changes", &path, writer)?;
        for result in manifest.updates() {
            self.format_update_line(result, writer)?;
        }
        if self.verbosity == Verbosity::Verbose {
            for result in manifest.skips() {
                self.format_skip_line(result, writer)?;
            }
        }

        let Some(rewrite) = manifest.rewrite.as_ref().filter(|_| manifest.has_updates()) else {
            return writeln!(writer, "#👍 No updates found");
        };

        self.banner("File", &path, writer)?;
        for line in &rewrite.lines {
            self.format_rewritten_line(line, writer)?;
        }
        Ok(())
    }

    fn finish(&self, summary: &RunSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Verbose {
            return Ok(());
        }

        let written = if summary.write {
            format!(", {} file(s) written", summary.files_written())
        } else {
            String::new()
        };
        writeln!(
            writer,
            "# {} update(s) in {} file(s), {} line(s) annotated{}",
            summary.total_updates(),
            summary.manifests.len(),
            summary.total_annotated(),
            written
        )
    }
}
