//! Configuration for Bookshelf
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result};

/// Main configuration for a Bookshelf run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Replay Configuration
    // -------------------------------------------------------------------------
    /// Command log replayed into the catalog (`TAG;payload` per line)
    pub commands_path: PathBuf,

    /// Snapshot written after replay and reloaded for search
    pub snapshot_path: PathBuf,

    // -------------------------------------------------------------------------
    // Search Configuration
    // -------------------------------------------------------------------------
    /// Query lines (`SEARCH;payload` per line)
    pub queries_path: PathBuf,

    /// Matching records, one per line
    pub results_path: PathBuf,

    // -------------------------------------------------------------------------
    // Line Format
    // -------------------------------------------------------------------------
    /// Separator between the tag and the payload
    pub delimiter: char,
}

/// The four logical file roles of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamRole {
    Commands,
    Snapshot,
    Queries,
    Results,
}

impl fmt::Display for StreamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamRole::Commands => "commands",
            StreamRole::Snapshot => "snapshot",
            StreamRole::Queries => "queries",
            StreamRole::Results => "results",
        };
        f.write_str(name)
    }
}

impl Config {
    pub const DEFAULT_COMMANDS_FILE: &'static str = "lab01_books.csv";
    pub const DEFAULT_SNAPSHOT_FILE: &'static str = "output.txt";
    pub const DEFAULT_QUERIES_FILE: &'static str = "lab01_search.csv";
    pub const DEFAULT_RESULTS_FILE: &'static str = "final_output.txt";
    pub const DEFAULT_DELIMITER: char = ';';

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default file names placed under `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            commands_path: dir.join(Self::DEFAULT_COMMANDS_FILE),
            snapshot_path: dir.join(Self::DEFAULT_SNAPSHOT_FILE),
            queries_path: dir.join(Self::DEFAULT_QUERIES_FILE),
            results_path: dir.join(Self::DEFAULT_RESULTS_FILE),
            delimiter: Self::DEFAULT_DELIMITER,
        }
    }

    /// Path configured for a file role
    pub fn path_for(&self, role: StreamRole) -> &Path {
        match role {
            StreamRole::Commands => &self.commands_path,
            StreamRole::Snapshot => &self.snapshot_path,
            StreamRole::Queries => &self.queries_path,
            StreamRole::Results => &self.results_path,
        }
    }

    /// Reject configurations no run could use
    pub fn validate(&self) -> Result<()> {
        for role in [
            StreamRole::Commands,
            StreamRole::Snapshot,
            StreamRole::Queries,
            StreamRole::Results,
        ] {
            if self.path_for(role).as_os_str().is_empty() {
                return Err(CatalogError::Config(format!("{} path is empty", role)));
            }
        }

        if self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(CatalogError::Config(
                "delimiter cannot be a line terminator".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commands_path: PathBuf::from(Self::DEFAULT_COMMANDS_FILE),
            snapshot_path: PathBuf::from(Self::DEFAULT_SNAPSHOT_FILE),
            queries_path: PathBuf::from(Self::DEFAULT_QUERIES_FILE),
            results_path: PathBuf::from(Self::DEFAULT_RESULTS_FILE),
            delimiter: Self::DEFAULT_DELIMITER,
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Place every default file name under `dir`, keeping the delimiter
    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        let delimiter = self.config.delimiter;
        self.config = Config::in_dir(dir);
        self.config.delimiter = delimiter;
        self
    }

    /// Set the command log path
    pub fn commands_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.commands_path = path.into();
        self
    }

    /// Set the snapshot path
    pub fn snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.snapshot_path = path.into();
        self
    }

    /// Set the query file path
    pub fn queries_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.queries_path = path.into();
        self
    }

    /// Set the results path
    pub fn results_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.results_path = path.into();
        self
    }

    /// Set the tag/payload delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
