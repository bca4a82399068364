//! Catalog Module
//!
//! In-memory keyed collection of book records.
//!
//! ## Responsibilities
//! - Hold at most one record per isbn
//! - Apply insert / merge / remove mutations
//! - Produce an isbn-ordered snapshot for output
//!
//! ## Data Structure Choice
//! Records live in a `HashMap` keyed by isbn. Iteration order of the map is
//! never observable: every emission goes through [`Catalog::snapshot`], which
//! sorts by isbn (byte-wise).

mod table;

pub use table::Catalog;
