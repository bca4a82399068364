//! Command Replayer
//!
//! Applies INSERT / PATCH / DELETE lines to a catalog in source order.

use std::io::BufRead;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::protocol::{decode_payload, split_line, Command, CommandType};

use super::{process_lines, LineOutcome, ReplayResult};

/// Replays a command log into a catalog
#[derive(Debug, Clone, Copy)]
pub struct CommandReplayer {
    delimiter: char,
}

impl CommandReplayer {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Replay every line of `reader` into `catalog`
    ///
    /// Bad lines are reported in the result and skipped; only a failing
    /// source aborts the replay. Mutations already applied are kept.
    pub fn replay<R: BufRead>(&self, reader: R, catalog: &mut Catalog) -> Result<ReplayResult> {
        let result = process_lines(reader, "commands", |line| self.apply_line(line, catalog))?;

        tracing::info!(
            lines = result.lines_read,
            applied = result.commands_applied,
            dropped = result.commands_dropped,
            errors = result.diagnostics.len(),
            records = catalog.len(),
            "Replay complete"
        );

        Ok(result)
    }

    /// Apply a single command line
    ///
    /// The payload is decoded before the tag is looked at, so an unknown tag
    /// with a malformed payload still reports a decode error.
    pub fn apply_line(&self, line: &str, catalog: &mut Catalog) -> Result<LineOutcome> {
        let Some((tag, payload)) = split_line(line, self.delimiter) else {
            return Ok(LineOutcome::Skipped);
        };

        let payload = decode_payload(payload)?;

        let Some(command_type) = CommandType::from_tag(tag) else {
            tracing::debug!(tag, "Ignoring unknown tag");
            return Ok(LineOutcome::Ignored);
        };

        let command = Command::from_payload(command_type, payload)?;
        let isbn = command.isbn().to_string();

        if catalog.apply(command) {
            tracing::debug!(tag = command_type.as_tag(), isbn = %isbn, "Applied");
            Ok(LineOutcome::Applied)
        } else {
            tracing::debug!(tag = command_type.as_tag(), isbn = %isbn, "No record, dropped");
            Ok(LineOutcome::Dropped)
        }
    }
}

impl Default for CommandReplayer {
    fn default() -> Self {
        Self::new(Config::DEFAULT_DELIMITER)
    }
}
