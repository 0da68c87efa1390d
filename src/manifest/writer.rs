//! Manifest rewriting
//!
//! This module provides:
//! - The line-update map built while judging requirements
//! - Text substitution of old version strings with new ones
//! - Inline error annotations for lines that can't be substituted safely
//! - Optional write-back of the rewritten contents

use crate::error::ManifestError;
use crate::manifest::parser::code_part;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// A version substitution for one requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineUpdate {
    /// First physical line of the requirement
    pub first_line: usize,
    /// Version text as it appears in the manifest
    pub old: String,
    /// Version text to put in its place
    pub new: String,
}

/// Substitutions keyed by the 0-based index of the requirement's last line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineUpdates {
    entries: BTreeMap<usize, LineUpdate>,
}

impl LineUpdates {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a substitution for a single-line requirement
    pub fn insert(&mut self, line_index: usize, old: impl Into<String>, new: impl Into<String>) {
        self.insert_span(line_index, line_index, old, new);
    }

    /// Record a substitution for a requirement on lines `first_line..=line_index`
    pub fn insert_span(
        &mut self,
        first_line: usize,
        line_index: usize,
        old: impl Into<String>,
        new: impl Into<String>,
    ) {
        self.entries.insert(
            line_index,
            LineUpdate {
                first_line: first_line.min(line_index),
                old: old.into(),
                new: new.into(),
            },
        );
    }

    /// Substitution for a line, if any
    pub fn get(&self, line_index: usize) -> Option<&LineUpdate> {
        self.entries.get(&line_index)
    }

    /// Number of lines with a substitution
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there is nothing to substitute
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One physical line of the rewritten manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewrittenLine {
    /// Line copied as-is
    Unchanged(String),
    /// Version text substituted
    Updated {
        text: String,
        old: String,
        new: String,
    },
    /// Old version text was not found; the line carries an error marker
    Annotated { text: String, new: String },
}

impl RewrittenLine {
    /// Full text of the line including its line ending
    pub fn text(&self) -> &str {
        match self {
            RewrittenLine::Unchanged(text) => text,
            RewrittenLine::Updated { text, .. } => text,
            RewrittenLine::Annotated { text, .. } => text,
        }
    }
}

/// Rewritten contents of one manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Every physical line in original order
    pub lines: Vec<RewrittenLine>,
    /// Number of lines successfully substituted
    pub applied: usize,
    /// Number of lines annotated instead
    pub failed: usize,
    /// Whether the contents were written back to disk
    pub written: bool,
}

impl Rewrite {
    /// Concatenated contents
    pub fn contents(&self) -> String {
        self.lines.iter().map(RewrittenLine::text).collect()
    }
}

/// Split a line into its body and line ending
fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Replace the last occurrence of `old` outside the trailing comment
///
/// The version follows the package name and operator, so the last match in
/// the requirement part is the version even when the name contains the same
/// digits (`web3==3`).
fn substitute(body: &str, old: &str, new: &str) -> Option<String> {
    if old.is_empty() {
        return None;
    }
    let pos = code_part(body).rfind(old)?;
    let mut out = String::with_capacity(body.len() + new.len());
    out.push_str(&body[..pos]);
    out.push_str(new);
    out.push_str(&body[pos + old.len()..]);
    Some(out)
}

/// Apply line updates to manifest contents
///
/// The physical lines of a continued requirement are searched from the last
/// one back to the first. When none holds the old text, the last line is
/// annotated.
pub fn rewrite_content(content: &str, updates: &LineUpdates) -> Rewrite {
    let mut rewrite = Rewrite {
        lines: content
            .split_inclusive('\n')
            .map(|line| RewrittenLine::Unchanged(line.to_string()))
            .collect(),
        applied: 0,
        failed: 0,
        written: false,
    };

    for (&index, update) in &updates.entries {
        if index >= rewrite.lines.len() {
            continue;
        }

        let found = (update.first_line..=index).rev().find_map(|i| {
            let (body, ending) = split_line_ending(rewrite.lines[i].text());
            substitute(body, &update.old, &update.new)
                .map(|replaced| (i, format!("{}{}", replaced, ending)))
        });

        match found {
            Some((i, text)) => {
                rewrite.applied += 1;
                rewrite.lines[i] = RewrittenLine::Updated {
                    text,
                    old: update.old.clone(),
                    new: update.new.clone(),
                };
            }
            None => {
                warn!(
                    line = index + 1,
                    "could not find '{}' to replace with '{}'",
                    update.old,
                    update.new
                );
                let (body, ending) = split_line_ending(rewrite.lines[index].text());
                let text = format!(
                    "{} # ERROR: could not update version string to {}{}",
                    body.trim_end(),
                    update.new,
                    ending
                );
                rewrite.failed += 1;
                rewrite.lines[index] = RewrittenLine::Annotated {
                    text,
                    new: update.new.clone(),
                };
            }
        }
    }

    rewrite
}

/// Produces rewritten manifests and optionally writes them back
pub struct ManifestWriter {
    /// Whether to persist rewritten contents
    write: bool,
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(write: bool) -> Self {
        Self { write }
    }

    /// Create a ManifestWriter that never touches the file
    pub fn preview() -> Self {
        Self { write: false }
    }

    /// Check if this writer persists changes
    pub fn writes(&self) -> bool {
        self.write
    }

    /// Re-read the manifest and apply the updates
    pub fn apply(&self, path: &Path, updates: &LineUpdates) -> Result<Rewrite, ManifestError> {
        let content = read_manifest(path)?;
        let mut rewrite = rewrite_content(&content, updates);

        if self.write && rewrite.applied + rewrite.failed > 0 {
            write_manifest(path, &rewrite.contents())?;
            rewrite.written = true;
        }

        Ok(rewrite)
    }
}

/// Read a manifest file content
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))
}

/// Write content to a manifest file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn updates(entries: &[(usize, &str, &str)]) -> LineUpdates {
        let mut map = LineUpdates::new();
        for (index, old, new) in entries {
            map.insert(*index, *old, *new);
        }
        map
    }

    #[test]
    fn test_line_updates() {
        let map = updates(&[(3, "1.0", "2.0")]);
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.get(3).unwrap().new, "2.0");
        assert_eq!(map.get(3).unwrap().first_line, 3);
        assert!(map.get(0).is_none());
    }

    #[test]
    fn test_rewrite_substitutes_version() {
        let content = "# deps\nrequests>=2.0.0\nflask==1.0\n";
        let rewrite = rewrite_content(content, &updates(&[(1, "2.0.0", "2.5.0")]));

        assert_eq!(rewrite.applied, 1);
        assert_eq!(rewrite.failed, 0);
        assert_eq!(rewrite.contents(), "# deps\nrequests>=2.5.0\nflask==1.0\n");
        assert!(matches!(rewrite.lines[1], RewrittenLine::Updated { .. }));
    }

    #[test]
    fn test_rewrite_leaves_comment_alone() {
        let content = "flask==1.0  # 1.0 is known good\n";
        let rewrite = rewrite_content(content, &updates(&[(0, "1.0", "3.0")]));
        assert_eq!(rewrite.contents(), "flask==3.0  # 1.0 is known good\n");
    }

    #[test]
    fn test_rewrite_prefers_version_over_name_digits() {
        let rewrite = rewrite_content("web3==3\n", &updates(&[(0, "3", "7")]));
        assert_eq!(rewrite.contents(), "web3==7\n");
    }

    #[test]
    fn test_rewrite_annotates_when_text_missing() {
        // version split across a continuation: line 1 only holds "0"
        let content = "foo==1.\\\n0\nbar==2\n";
        let rewrite = rewrite_content(content, &updates(&[(1, "1.0", "1.5")]));

        assert_eq!(rewrite.applied, 0);
        assert_eq!(rewrite.failed, 1);
        assert_eq!(
            rewrite.lines[1].text(),
            "0 # ERROR: could not update version string to 1.5\n"
        );
        assert!(matches!(rewrite.lines[1], RewrittenLine::Annotated { .. }));
        assert_eq!(rewrite.lines[2].text(), "bar==2\n");
    }

    #[test]
    fn test_rewrite_continued_requirement_searches_earlier_lines() {
        // requirement continued onto a comment-only line
        let content = "numpy~=1.0 \\\n    # note\nflask==1.0\n";
        let mut map = LineUpdates::new();
        map.insert_span(0, 1, "1.0", "2.0");
        let rewrite = rewrite_content(content, &map);

        assert_eq!(rewrite.applied, 1);
        assert_eq!(rewrite.failed, 0);
        assert_eq!(
            rewrite.contents(),
            "numpy~=2.0 \\\n    # note\nflask==1.0\n"
        );
        assert!(matches!(rewrite.lines[0], RewrittenLine::Updated { .. }));
    }

    #[test]
    fn test_rewrite_continued_requirement_prefers_last_line() {
        let mut map = LineUpdates::new();
        map.insert_span(0, 1, "1", "2");
        let rewrite = rewrite_content("pkg1 \\\n==1\n", &map);
        assert_eq!(rewrite.contents(), "pkg1 \\\n==2\n");
    }

    #[test]
    fn test_rewrite_continued_requirement_split_version_is_annotated() {
        let mut map = LineUpdates::new();
        map.insert_span(0, 1, "1.0", "1.5");
        let rewrite = rewrite_content("foo==1.\\\n0\n", &map);

        assert_eq!(rewrite.failed, 1);
        assert_eq!(
            rewrite.contents(),
            "foo==1.\\\n0 # ERROR: could not update version string to 1.5\n"
        );
    }

    #[test]
    fn test_rewrite_ignores_updates_past_end() {
        let rewrite = rewrite_content("flask==1.0\n", &updates(&[(5, "1.0", "2.0")]));
        assert_eq!(rewrite.applied, 0);
        assert_eq!(rewrite.contents(), "flask==1.0\n");
    }

    #[test]
    fn test_rewrite_preserves_line_endings() {
        let content = "flask==1.0\r\nrequests>=2.0";
        let map = updates(&[(0, "1.0", "3.0"), (1, "2.0", "2.5")]);
        let rewrite = rewrite_content(content, &map);
        assert_eq!(rewrite.contents(), "flask==3.0\r\nrequests>=2.5");
    }

    #[test]
    fn test_rewrite_without_updates_is_identity() {
        let content = "a==1\n\n# c\n";
        let rewrite = rewrite_content(content, &LineUpdates::new());
        assert_eq!(rewrite.contents(), content);
        assert_eq!(rewrite.applied, 0);
    }

    #[test]
    fn test_writer_preview_does_not_touch_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requirements.txt");
        fs::write(&path, "flask==1.0\n").unwrap();

        let writer = ManifestWriter::preview();
        assert!(!writer.writes());
        let map = updates(&[(0, "1.0", "3.0")]);
        let rewrite = writer.apply(&path, &map).unwrap();

        assert!(!rewrite.written);
        assert_eq!(rewrite.contents(), "flask==3.0\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "flask==1.0\n");
    }

    #[test]
    fn test_writer_writes_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requirements.txt");
        fs::write(&path, "flask==1.0\nrequests>=2.0\n").unwrap();

        let writer = ManifestWriter::new(true);
        let map = updates(&[(1, "2.0", "2.31.0")]);
        let rewrite = writer.apply(&path, &map).unwrap();

        assert!(rewrite.written);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "flask==1.0\nrequests>=2.31.0\n"
        );
    }

    #[test]
    fn test_writer_missing_file() {
        let writer = ManifestWriter::preview();
        let err = writer
            .apply(Path::new("/nonexistent/requirements.txt"), &LineUpdates::new())
            .unwrap_err();
        assert!(matches!(err, ManifestError::ReadError { .. }));
    }
}
