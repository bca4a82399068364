//! Snapshot Module
//!
//! Canonical, isbn-ordered serialization of a catalog, and its reload.
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │ {"isbn":"A1","name":"X","author":"Y","price":15,"quantity":2}\n      │
//! │ {"isbn":"B7","name":"Z","author":"W","price":9.5,"quantity":1}\n     │
//! │ ...                                                                  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//! One record per line, sorted ascending by isbn, exactly the five output
//! fields in fixed order. Extra in-memory fields are not written.

mod reader;
mod writer;

pub use reader::{ReloadResult, SnapshotReader};
pub use writer::SnapshotWriter;
