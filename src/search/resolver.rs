//! Search Resolver
//!
//! Runs SEARCH queries against an inventory and accumulates the matches.

use std::io::{BufRead, Write};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::protocol::{decode_payload, split_line, SearchQuery};
use crate::record::Record;
use crate::replay::{process_lines, LineOutcome, ReplayResult};
use crate::snapshot::{ReloadResult, SnapshotReader, SnapshotWriter};

/// Resolves name queries against a reloaded catalog
#[derive(Debug)]
pub struct SearchResolver {
    /// Records searched; never mutated by queries
    inventory: Catalog,

    /// Accumulated matches
    results: Catalog,

    delimiter: char,
}

impl SearchResolver {
    /// Search over an existing catalog
    pub fn new(inventory: Catalog, delimiter: char) -> Self {
        Self {
            inventory,
            results: Catalog::new(),
            delimiter,
        }
    }

    /// Reload a snapshot and search over it
    pub fn from_snapshot<R: BufRead>(reader: R, delimiter: char) -> Result<(Self, ReloadResult)> {
        let (inventory, reload) = SnapshotReader::reload(reader)?;
        Ok((Self::new(inventory, delimiter), reload))
    }

    /// Run every query line of `reader`
    pub fn run_queries<R: BufRead>(&mut self, reader: R) -> Result<ReplayResult> {
        let result = process_lines(reader, "queries", |line| self.apply_line(line))?;

        tracing::info!(
            lines = result.lines_read,
            queries = result.commands_applied,
            errors = result.diagnostics.len(),
            matches = self.results.len(),
            "Queries complete"
        );

        Ok(result)
    }

    /// Run a single query line
    ///
    /// As with commands, the payload is decoded before the tag is checked.
    pub fn apply_line(&mut self, line: &str) -> Result<LineOutcome> {
        let Some((tag, payload)) = split_line(line, self.delimiter) else {
            return Ok(LineOutcome::Skipped);
        };

        let payload = decode_payload(payload)?;

        if tag != SearchQuery::TAG {
            tracing::debug!(tag, "Ignoring non-search tag");
            return Ok(LineOutcome::Ignored);
        }

        let query = SearchQuery::from_payload(&payload)?;
        let found = self.search(&query);
        tracing::debug!(name = %query.name, found, "Search");

        Ok(LineOutcome::Applied)
    }

    /// Add every inventory record named exactly `query.name` to the results
    ///
    /// Returns how many inventory records matched.
    pub fn search(&mut self, query: &SearchQuery) -> usize {
        let mut found = 0;
        for record in self.inventory.find_by_name(&query.name) {
            self.results.insert(record.clone());
            found += 1;
        }
        found
    }

    /// Matches so far, sorted ascending by isbn
    pub fn results(&self) -> Vec<&Record> {
        self.results.snapshot()
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn inventory(&self) -> &Catalog {
        &self.inventory
    }

    /// Write the result set in snapshot format
    pub fn write_results<W: Write>(&self, writer: W) -> Result<usize> {
        let mut writer = SnapshotWriter::new(writer);
        let written = writer.write_catalog(&self.results)?;
        writer.finish()?;
        Ok(written)
    }
}
