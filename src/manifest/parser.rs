//! Requirement line parser
//!
//! Recognizes `name OP version` lines where OP is one of `>=`, `==` or `~=`.
//! Everything else in a requirements file (options, URLs, markers, upper
//! bounds) is skipped without error.

use crate::domain::{Operator, Requirement, Version};
use crate::error::ManifestError;
use crate::manifest::LogicalLines;
use regex::Regex;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s+)#.*$").unwrap());
static REQUIREMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([-\w]+)\s*([>=~]{2})\s*(.+?)\s*$").unwrap());

/// Why a logical line produced no requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSkip {
    /// Nothing left after removing the comment
    Empty,
    /// Not shaped like `name OP version`
    Unrecognized,
    /// Shaped right, but the operator is not an update candidate
    UnsupportedOperator(String),
}

/// Outcome of parsing one logical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The line is a requirement
    Matched(Requirement),
    /// The line is ignored
    Skipped(LineSkip),
}

/// The part of a line before its trailing `# comment`, untrimmed
pub fn code_part(line: &str) -> &str {
    match COMMENT_RE.find(line) {
        Some(m) => &line[..m.start()],
        None => line,
    }
}

/// Remove a trailing `# comment` and surrounding whitespace
pub fn strip_comment(line: &str) -> &str {
    code_part(line).trim()
}

/// Parse a single logical line
///
/// `path` and `line_index` only provide context for the error raised when the
/// version text is not a valid PEP 440 version.
pub fn parse_line(
    path: &Path,
    line_index: usize,
    line: &str,
) -> Result<ParseOutcome, ManifestError> {
    let line = strip_comment(line);
    if line.is_empty() {
        return Ok(ParseOutcome::Skipped(LineSkip::Empty));
    }

    let Some(caps) = REQUIREMENT_RE.captures(line) else {
        return Ok(ParseOutcome::Skipped(LineSkip::Unrecognized));
    };

    let name = &caps[1];
    let token = &caps[2];
    let raw_version = &caps[3];

    let Some(operator) = Operator::from_token(token) else {
        return Ok(ParseOutcome::Skipped(LineSkip::UnsupportedOperator(
            token.to_string(),
        )));
    };

    let version = Version::from_str(raw_version).map_err(|e| {
        ManifestError::invalid_version(path, line_index, raw_version, e.to_string())
    })?;

    Ok(ParseOutcome::Matched(Requirement::new(
        name,
        operator,
        version,
        raw_version,
        line_index,
    )))
}

/// Read every requirement from a manifest file, in file order
pub fn parse_requirements(path: &Path) -> Result<Vec<Requirement>, ManifestError> {
    let lines = LogicalLines::open(path).map_err(|e| ManifestError::read_error(path, e))?;

    let mut requirements = Vec::new();
    for item in lines.spans() {
        let line = item.map_err(|e| ManifestError::read_error(path, e))?;
        match parse_line(path, line.index, &line.text)? {
            ParseOutcome::Matched(requirement) => {
                requirements.push(requirement.with_first_line(line.first_index))
            }
            ParseOutcome::Skipped(LineSkip::Empty) => {}
            ParseOutcome::Skipped(reason) => {
                debug!(line = line.index + 1, ?reason, "skipping line: {}", line.text);
            }
        }
    }

    Ok(requirements)
}
