//! Line codec
//!
//! Splitting, decoding and encoding of text lines.
//!
//! ## Line Formats
//!
//! ### Command / Query Line
//! ```text
//! ┌──────────┬───┬─────────────────────────────┐
//! │   TAG    │ ; │     JSON object payload     │
//! └──────────┴───┴─────────────────────────────┘
//! ```
//!
//! ### Snapshot / Result Line
//! ```text
//! {"isbn":..,"name":..,"author":..,"price":..,"quantity":..}
//! ```

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::record::{FieldSet, Record};

// =============================================================================
// Line Splitting
// =============================================================================

/// Split a line at the first delimiter into `(tag, payload)`
///
/// Returns `None` when the delimiter does not occur.
pub fn split_line(line: &str, delimiter: char) -> Option<(&str, &str)> {
    line.split_once(delimiter)
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a payload into its named fields
///
/// Anything other than a JSON object is a decode error.
pub fn decode_payload(text: &str) -> Result<FieldSet> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CatalogError::Decode(e.to_string()))?;

    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(CatalogError::Decode(format!(
            "expected an object, got {}",
            value_kind(&other)
        ))),
    }
}

/// Decode a snapshot line back into a record
pub fn decode_record(text: &str) -> Result<Record> {
    Record::from_fields(decode_payload(text)?)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a record as a single snapshot line (without terminator)
pub fn encode_record(record: &Record) -> Result<String> {
    serde_json::to_string(&record.projection())
        .map_err(|e| CatalogError::Serialization(e.to_string()))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Iterate the raw lines of a source with 1-based line numbers
///
/// Line terminators (`\n` or `\r\n`) are stripped. Bytes are not checked
/// for UTF-8 here, so a bad line can still be reported with its content.
pub fn numbered_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = (usize, std::io::Result<Vec<u8>>)> {
    reader.split(b'\n').enumerate().map(|(index, line)| {
        let line = line.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            bytes
        });
        (index + 1, line)
    })
}

/// Write a record as one newline-terminated line
pub fn write_record<W: Write>(writer: &mut W, record: &Record) -> Result<()> {
    let line = encode_record(record)?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}
