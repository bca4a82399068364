//! Error types for Bookshelf
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::StreamRole;

/// Result type alias using CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Unified error type for Bookshelf operations
#[derive(Debug, Error)]
pub enum CatalogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open {role} file {}: {source}", path.display())]
    SourceUnavailable {
        role: StreamRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Line Errors (recovered per line, surfaced as diagnostics)
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Missing key field: {field}")]
    MissingKeyField { field: &'static str },

    #[error("Invalid field {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Whether this error only affects the line it came from
    pub fn is_line_local(&self) -> bool {
        matches!(
            self,
            CatalogError::Decode(_)
                | CatalogError::MissingKeyField { .. }
                | CatalogError::InvalidField { .. }
        )
    }
}
