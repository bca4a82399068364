//! Search Module
//!
//! Equality search on `name` over a reloaded snapshot.
//!
//! ## Flow
//! ```text
//! snapshot lines ──► SnapshotReader ──► inventory (Catalog)
//!                                           │
//! query lines ──► SEARCH;{"name":..} ───────┤ exact, case-sensitive match
//!                                           ▼
//!                                   results (Catalog, keyed by isbn)
//!                                           │
//!                                           ▼
//!                                   SnapshotWriter ──► result lines
//! ```
//!
//! Matches from every query accumulate in one result set, so a record hit
//! by several queries is written once.

mod resolver;

pub use resolver::SearchResolver;
