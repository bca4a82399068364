//! Protocol Module
//!
//! Defines the line formats consumed and produced by the catalog.
//!
//! ## Line Format
//!
//! ### Command / Query Lines
//! ```text
//! <TAG>;<payload>
//! ```
//!
//! ### Tags
//! - INSERT: payload is a full record
//! - PATCH:  payload is `isbn` plus the fields to overwrite
//! - DELETE: payload is `isbn`
//! - SEARCH: payload is `name` (query stream only)
//!
//! Any other tag is ignored. A line without a delimiter is skipped.
//!
//! ### Payload
//! A JSON object. Decoding and encoding go through `serde_json`; the rest of
//! the crate only sees [`FieldSet`](crate::record::FieldSet) and
//! [`Record`](crate::record::Record).

mod codec;
mod command;

pub use codec::{
    decode_payload, decode_record, encode_record, numbered_lines, split_line, write_record,
};
pub use command::{Command, CommandType, SearchQuery};
