//! # Bookshelf
//!
//! An in-memory book catalog rebuilt from a line-based command log:
//! - INSERT / PATCH / DELETE replay with per-line error isolation
//! - Deterministic, isbn-ordered snapshots with a fixed field order
//! - Exact name search over a reloaded snapshot
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Command Log (TAG;payload)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   CommandReplayer                            │
//! │            (bad lines → diagnostics, keep going)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!                ┌─────────────┐          ┌─────────────┐
//!                │   Catalog   │─────────►│  Snapshot   │
//!                │ (isbn map)  │  sorted  │   Writer    │
//!                └─────────────┘          └──────┬──────┘
//!                                                │ snapshot lines
//!                                                ▼
//!   query lines ─────────────────────────► ┌─────────────┐
//!                                          │   Search    │──► result lines
//!                                          │  Resolver   │
//!                                          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod protocol;
pub mod catalog;
pub mod replay;
pub mod snapshot;
pub mod search;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CatalogError, Result};
pub use config::Config;
pub use record::Record;
pub use catalog::Catalog;
pub use engine::Engine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Bookshelf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
