//! Requirement records parsed from `name OP version` lines

use pep508_rs::pep440_rs::Version;
use std::fmt;

/// Version constraint operators that mark a requirement as an update candidate
///
/// Upper bounds and exclusions (`<=`, `<`, `!=`) never pin a package to an
/// outdated release, so they have no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>=`
    GreaterOrEqual,
    /// `==`
    Exact,
    /// `~=` (compatible release)
    Compatible,
}

impl Operator {
    /// Parse a two-character operator token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            ">=" => Some(Operator::GreaterOrEqual),
            "==" => Some(Operator::Exact),
            "~=" => Some(Operator::Compatible),
            _ => None,
        }
    }

    /// The operator as written in a manifest
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterOrEqual => ">=",
            Operator::Exact => "==",
            Operator::Compatible => "~=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single requirement matched in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Package name as written
    pub name: String,
    /// Constraint operator
    pub operator: Operator,
    /// Parsed version used for comparisons
    pub version: Version,
    /// Version text exactly as captured from the line
    pub raw_version: String,
    /// 0-based index of the physical line that closes this requirement
    pub line_index: usize,
    /// 0-based index of the physical line it starts on (differs only for
    /// backslash continuations)
    pub first_line_index: usize,
}

impl Requirement {
    /// Creates a new requirement record
    pub fn new(
        name: impl Into<String>,
        operator: Operator,
        version: Version,
        raw_version: impl Into<String>,
        line_index: usize,
    ) -> Self {
        Self {
            name: name.into(),
            operator,
            version,
            raw_version: raw_version.into(),
            line_index,
            first_line_index: line_index,
        }
    }

    /// Set the physical line a continued requirement starts on
    pub fn with_first_line(mut self, first_line_index: usize) -> Self {
        self.first_line_index = first_line_index.min(self.line_index);
        self
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, self.operator, self.raw_version)
    }
}

/// Normalize a package name: lowercase, runs of `-`, `_` and `.` become `-`
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
            }
            in_separator = true;
        } else {
            normalized.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    normalized
}
