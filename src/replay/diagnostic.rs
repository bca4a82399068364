//! Per-line bookkeeping
//!
//! Counts what happened to each line of a pass and collects the failures.

use std::io::BufRead;

use crate::error::{CatalogError, Result};
use crate::protocol::numbered_lines;

/// A line that could not be applied
#[derive(Debug)]
pub struct Diagnostic {
    /// 1-based line number within its source
    pub line_number: usize,

    /// The raw line as read
    pub line: String,

    /// Why the line was abandoned
    pub error: CatalogError,
}

/// What happened to a single line that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line mutated state (or ran a query)
    Applied,

    /// Valid, but its key was absent so nothing changed
    Dropped,

    /// No delimiter on the line
    Skipped,

    /// Tag not meaningful for this stream
    Ignored,
}

/// Result of a pass over a line source
#[derive(Debug, Default)]
pub struct ReplayResult {
    /// Number of lines read from the source
    pub lines_read: u64,

    /// Lines that took effect
    pub commands_applied: u64,

    /// Valid lines whose key was absent
    pub commands_dropped: u64,

    /// Lines without a delimiter
    pub lines_skipped: u64,

    /// Lines with an unrecognized tag
    pub lines_ignored: u64,

    /// One entry per failed line, in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl ReplayResult {
    /// True when no line failed
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn record(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Applied => self.commands_applied += 1,
            LineOutcome::Dropped => self.commands_dropped += 1,
            LineOutcome::Skipped => self.lines_skipped += 1,
            LineOutcome::Ignored => self.lines_ignored += 1,
        }
    }
}

/// Drive `handle` over every line of `reader`
///
/// Line-local errors (and lines that are not valid UTF-8) become diagnostics.
/// Any other error from the source or from `handle` ends the pass.
pub(crate) fn process_lines<R, F>(reader: R, source: &str, mut handle: F) -> Result<ReplayResult>
where
    R: BufRead,
    F: FnMut(&str) -> Result<LineOutcome>,
{
    let mut result = ReplayResult::default();

    for (line_number, bytes) in numbered_lines(reader) {
        result.lines_read += 1;

        let line = match String::from_utf8(bytes?) {
            Ok(line) => line,
            Err(e) => {
                let line = String::from_utf8_lossy(e.as_bytes()).into_owned();
                let error = CatalogError::Decode(format!("invalid UTF-8: {}", e.utf8_error()));
                tracing::warn!(source, line_number, %error, line = %line, "Skipping line");
                result.diagnostics.push(Diagnostic {
                    line_number,
                    line,
                    error,
                });
                continue;
            }
        };

        match handle(&line) {
            Ok(outcome) => result.record(outcome),
            Err(error) if error.is_line_local() => {
                tracing::warn!(source, line_number, %error, line = %line, "Skipping line");
                result.diagnostics.push(Diagnostic {
                    line_number,
                    line,
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }

    Ok(result)
}
