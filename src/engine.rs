//! Engine Module
//!
//! Runs the batch pipeline over the configured files.
//!
//! ## Responsibilities
//! - Open each file inside the stage that uses it, and release it before
//!   the next stage starts
//! - Keep going when one stage cannot run
//! - Report per-stage outcomes
//!
//! ## Stages
//! ```text
//! commands ──► replay ──► Catalog ──► write snapshot ──► snapshot file
//!                                                            │
//! queries ──────────────────────────► resolve searches ◄─────┘
//!                                            │
//!                                            ▼
//!                                       results file
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::catalog::Catalog;
use crate::config::{Config, StreamRole};
use crate::error::{CatalogError, Result};
use crate::replay::{CommandReplayer, ReplayResult};
use crate::search::SearchResolver;
use crate::snapshot::{ReloadResult, SnapshotWriter};

/// Coordinates the pipeline stages
pub struct Engine {
    config: Config,
}

/// Outcome of the search stage
#[derive(Debug)]
pub struct SearchOutcome {
    pub reload: ReloadResult,
    pub queries: ReplayResult,
    pub matches_written: usize,
}

/// Outcome of a full run
///
/// A stage that could not run leaves its field `None` and adds an entry to
/// `stage_errors`.
#[derive(Debug, Default)]
pub struct RunReport {
    pub replay: Option<ReplayResult>,
    pub records_written: Option<usize>,
    pub search: Option<SearchOutcome>,
    pub stage_errors: Vec<String>,
}

impl RunReport {
    /// True when every stage ran and no line failed
    pub fn is_clean(&self) -> bool {
        self.stage_errors.is_empty()
            && self.replay.as_ref().is_some_and(ReplayResult::is_clean)
            && self.search.as_ref().is_some_and(|search| {
                search.reload.diagnostics.is_empty() && search.queries.is_clean()
            })
    }

    /// Total per-line diagnostics across all stages
    pub fn diagnostic_count(&self) -> usize {
        let replay = self.replay.as_ref().map_or(0, |r| r.diagnostics.len());
        let search = self.search.as_ref().map_or(0, |s| {
            s.reload.diagnostics.len() + s.queries.diagnostics.len()
        });
        replay + search
    }
}

impl Engine {
    /// Create an engine for the given config
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run every stage in order
    ///
    /// Never fails: a stage error is logged, recorded, and the next stage
    /// still runs. An unopenable command log leaves the catalog empty, and
    /// the empty snapshot is still written. A log that fails partway keeps
    /// the mutations applied before the failure.
    pub fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        let mut catalog = Catalog::new();
        match self.replay_into(&mut catalog) {
            Ok(replay) => report.replay = Some(replay),
            Err(e) => self.stage_failed(&mut report, "replay", e),
        }

        match self.write_snapshot(&catalog) {
            Ok(written) => report.records_written = Some(written),
            Err(e) => self.stage_failed(&mut report, "snapshot", e),
        }
        drop(catalog);

        match self.resolve_searches() {
            Ok(search) => report.search = Some(search),
            Err(e) => self.stage_failed(&mut report, "search", e),
        }

        tracing::info!(
            diagnostics = report.diagnostic_count(),
            stage_errors = report.stage_errors.len(),
            "Run finished"
        );

        report
    }

    /// Replay the command log into a fresh catalog
    pub fn replay_commands(&self) -> Result<(Catalog, ReplayResult)> {
        let mut catalog = Catalog::new();
        let result = self.replay_into(&mut catalog)?;
        Ok((catalog, result))
    }

    /// Replay the command log into `catalog`
    ///
    /// On error, mutations applied before the failure stay in `catalog`.
    pub fn replay_into(&self, catalog: &mut Catalog) -> Result<ReplayResult> {
        let reader = self.open(StreamRole::Commands)?;
        CommandReplayer::new(self.config.delimiter).replay(reader, catalog)
    }

    /// Write `catalog` to the snapshot file, replacing its contents
    pub fn write_snapshot(&self, catalog: &Catalog) -> Result<usize> {
        let mut writer = SnapshotWriter::new(self.create(StreamRole::Snapshot)?);
        let written = writer.write_catalog(catalog)?;
        writer.finish()?;

        tracing::info!(
            records = written,
            path = %self.config.snapshot_path.display(),
            "Snapshot written"
        );
        Ok(written)
    }

    /// Reload the snapshot, run the queries, and write the results file
    ///
    /// Both the query file and the snapshot must open before any work is
    /// done. Each input is closed as soon as it has been consumed.
    pub fn resolve_searches(&self) -> Result<SearchOutcome> {
        let queries = self.open(StreamRole::Queries)?;

        let (mut resolver, reload) = {
            let snapshot = self.open(StreamRole::Snapshot)?;
            SearchResolver::from_snapshot(snapshot, self.config.delimiter)?
        };

        let queries = resolver.run_queries(queries)?;

        let matches_written = resolver.write_results(self.create(StreamRole::Results)?)?;

        tracing::info!(
            records = matches_written,
            path = %self.config.results_path.display(),
            "Results written"
        );

        Ok(SearchOutcome {
            reload,
            queries,
            matches_written,
        })
    }

    // =========================================================================
    // Stream helpers
    // =========================================================================

    fn open(&self, role: StreamRole) -> Result<BufReader<File>> {
        let path = self.config.path_for(role);
        File::open(path)
            .map(BufReader::new)
            .map_err(|source| unavailable(role, path, source))
    }

    fn create(&self, role: StreamRole) -> Result<BufWriter<File>> {
        let path = self.config.path_for(role);
        File::create(path)
            .map(BufWriter::new)
            .map_err(|source| unavailable(role, path, source))
    }

    fn stage_failed(&self, report: &mut RunReport, stage: &str, error: CatalogError) {
        tracing::error!(stage, %error, "Stage did not complete");
        report.stage_errors.push(format!("{}: {}", stage, error));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn unavailable(role: StreamRole, path: &Path, source: std::io::Error) -> CatalogError {
    CatalogError::SourceUnavailable {
        role,
        path: path.to_path_buf(),
        source,
    }
}
