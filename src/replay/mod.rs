//! Replay Module
//!
//! Applies a command log to a catalog, one line at a time.
//!
//! ## Responsibilities
//! - Split each line into tag and payload
//! - Decode the payload and dispatch INSERT / PATCH / DELETE
//! - Turn per-line failures into diagnostics without stopping the pass
//!
//! ## Line Outcomes
//! ```text
//! no delimiter ──────────────► Skipped
//! bad payload / missing key ─► Diagnostic (line abandoned)
//! unknown tag ───────────────► Ignored
//! key absent (PATCH/DELETE) ─► Dropped
//! otherwise ─────────────────► Applied
//! ```

mod diagnostic;
mod replayer;

pub use diagnostic::{Diagnostic, LineOutcome, ReplayResult};
pub use replayer::CommandReplayer;

pub(crate) use diagnostic::process_lines;
