//! Requirements manifest handling
//!
//! This module provides functionality to:
//! - Read a requirements file as logical lines (backslash continuations joined)
//! - Parse `name OP version` requirements out of those lines
//! - Rewrite the file with new versions substituted

mod lines;
mod parser;
mod writer;

pub use lines::{LogicalLine, LogicalLines, Spans};
pub use parser::{
    code_part, parse_line, parse_requirements, strip_comment, LineSkip, ParseOutcome,
};
pub use writer::{
    read_manifest, rewrite_content, write_manifest, LineUpdate, LineUpdates, ManifestWriter,
    Rewrite, RewrittenLine,
};

/// Manifest processed when no file is given
pub const DEFAULT_MANIFEST: &str = "requirements.txt";
