//! Logical line reader for requirements files
//!
//! A physical line ending in a backslash continues on the next physical line.
//! The joined line is reported under the index of the last physical line it
//! spans, which is where the version text normally ends up.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Continuation marker
const CONTINUATION: char = '\\';

/// Byte order mark some editors put at the start of the file
const BOM: char = '\u{feff}';

/// A logical line and the physical lines it was joined from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 0-based index of the first physical line
    pub first_index: usize,
    /// 0-based index of the last physical line
    pub index: usize,
    /// Joined text
    pub text: String,
}

/// Lazy iterator over `(physical_line_index, logical_line)` pairs
pub struct LogicalLines<R> {
    lines: io::Lines<R>,
    next_index: usize,
    pending: Option<(usize, String)>,
    done: bool,
}

impl<R: BufRead> LogicalLines<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            next_index: 0,
            pending: None,
            done: false,
        }
    }

    /// Yield full `LogicalLine` records instead of index/text pairs
    pub fn spans(self) -> Spans<R> {
        Spans { inner: self }
    }

    fn next_line(&mut self) -> Option<io::Result<LogicalLine>> {
        while !self.done {
            let Some(read) = self.lines.next() else {
                self.done = true;
                // A dangling continuation still counts as a line
                let (first_index, text) = self.pending.take()?;
                if text.is_empty() {
                    return None;
                }
                return Some(Ok(LogicalLine {
                    first_index,
                    index: self.next_index.saturating_sub(1),
                    text,
                }));
            };

            let physical = match read {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            let index = self.next_index;
            self.next_index += 1;

            let physical = if index == 0 {
                physical.trim_start_matches(BOM)
            } else {
                physical.as_str()
            };

            let (first_index, mut text) = match self.pending.take() {
                Some((first, mut held)) => {
                    held.push_str(physical.trim_end());
                    (first, held)
                }
                None => (index, physical.trim_end().to_string()),
            };

            if text.ends_with(CONTINUATION) {
                text.pop();
                self.pending = Some((first_index, text));
                continue;
            }

            if !text.is_empty() {
                return Some(Ok(LogicalLine {
                    first_index,
                    index,
                    text,
                }));
            }
        }
        None
    }
}

impl LogicalLines<BufReader<File>> {
    /// Open a manifest file for reading
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for LogicalLines<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().map(|item| item.map(|line| (line.index, line.text)))
    }
}

/// Iterator returned by [`LogicalLines::spans`]
pub struct Spans<R> {
    inner: LogicalLines<R>,
}

impl<R: BufRead> Iterator for Spans<R> {
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_line()
    }
}
