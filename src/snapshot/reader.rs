//! Snapshot Reader
//!
//! Rebuilds a catalog from previously written snapshot lines.

use std::io::BufRead;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::protocol::decode_record;
use crate::replay::{process_lines, Diagnostic, LineOutcome};

/// Reloads snapshots
pub struct SnapshotReader;

/// Result of a reload
#[derive(Debug, Default)]
pub struct ReloadResult {
    /// Number of lines decoded into records
    pub records_loaded: u64,

    /// Lines that could not be decoded, in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl SnapshotReader {
    /// Reload a snapshot into a fresh catalog
    ///
    /// Best effort: a line that fails to decode is reported and skipped.
    /// A later line with the same isbn replaces an earlier one.
    pub fn reload<R: BufRead>(reader: R) -> Result<(Catalog, ReloadResult)> {
        let mut catalog = Catalog::new();

        let pass = process_lines(reader, "snapshot", |line| {
            catalog.insert(decode_record(line)?);
            Ok(LineOutcome::Applied)
        })?;

        let result = ReloadResult {
            records_loaded: pass.commands_applied,
            diagnostics: pass.diagnostics,
        };

        tracing::info!(
            loaded = result.records_loaded,
            errors = result.diagnostics.len(),
            records = catalog.len(),
            "Snapshot reloaded"
        );

        Ok((catalog, result))
    }
}
