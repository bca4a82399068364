//! Record definitions
//!
//! A `Record` is one book in the catalog. Its fields are kept as a flat
//! structured object so that fields beyond the five known ones survive
//! inserts and patches, while output is always projected onto
//! [`OUTPUT_FIELDS`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CatalogError, Result};

/// An object of named fields, as decoded from a payload
pub type FieldSet = Map<String, Value>;

// =============================================================================
// Field Names
// =============================================================================

pub const ISBN: &str = "isbn";
pub const NAME: &str = "name";
pub const AUTHOR: &str = "author";
pub const PRICE: &str = "price";
pub const QUANTITY: &str = "quantity";

/// Fields written to snapshots and results, in output order
pub const OUTPUT_FIELDS: [&str; 5] = [ISBN, NAME, AUTHOR, PRICE, QUANTITY];

static NULL: Value = Value::Null;

/// A single book
///
/// `fields` always contains the `isbn` entry; `isbn` caches it as the key.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    isbn: String,
    fields: FieldSet,
}

impl Record {
    /// Build a record from decoded fields
    ///
    /// Fails if `isbn` is missing, empty, or not a string.
    pub fn from_fields(fields: FieldSet) -> Result<Self> {
        let isbn = key_field(&fields, ISBN)?.to_string();
        Ok(Self { isbn, fields })
    }

    /// Build a record holding exactly the five output fields
    pub fn new(
        isbn: impl Into<String>,
        name: impl Into<String>,
        author: impl Into<String>,
        price: impl Into<Value>,
        quantity: i64,
    ) -> Result<Self> {
        let mut fields = FieldSet::new();
        fields.insert(ISBN.to_string(), Value::String(isbn.into()));
        fields.insert(NAME.to_string(), Value::String(name.into()));
        fields.insert(AUTHOR.to_string(), Value::String(author.into()));
        fields.insert(PRICE.to_string(), price.into());
        fields.insert(QUANTITY.to_string(), Value::from(quantity));
        Self::from_fields(fields)
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// The `name` field, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.fields.get(NAME).and_then(Value::as_str)
    }

    pub fn author(&self) -> Option<&str> {
        self.fields.get(AUTHOR).and_then(Value::as_str)
    }

    pub fn price(&self) -> Option<f64> {
        self.fields.get(PRICE).and_then(Value::as_f64)
    }

    pub fn quantity(&self) -> Option<i64> {
        self.fields.get(QUANTITY).and_then(Value::as_i64)
    }

    /// Raw access to any field, including ones outside the output set
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Overwrite every field present in `patch`, leaving the rest untouched
    ///
    /// The key is never rewritten. Returns the number of fields written.
    pub fn merge(&mut self, patch: &FieldSet) -> usize {
        let mut written = 0;
        for (field, value) in patch {
            if field == ISBN {
                continue;
            }
            self.fields.insert(field.clone(), value.clone());
            written += 1;
        }
        written
    }

    /// Fixed-order view used for snapshot and result lines
    ///
    /// Absent fields are emitted as `null`.
    pub fn projection(&self) -> Projection<'_> {
        Projection {
            isbn: &self.isbn,
            name: self.field_or_null(NAME),
            author: self.field_or_null(AUTHOR),
            price: self.field_or_null(PRICE),
            quantity: self.field_or_null(QUANTITY),
        }
    }

    fn field_or_null(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }
}

/// Output shape of a record; serializes in declaration order
#[derive(Debug, Serialize)]
pub struct Projection<'a> {
    pub isbn: &'a str,
    pub name: &'a Value,
    pub author: &'a Value,
    pub price: &'a Value,
    pub quantity: &'a Value,
}

/// Extract a required non-empty string field
pub fn key_field<'a>(fields: &'a FieldSet, field: &'static str) -> Result<&'a str> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(CatalogError::MissingKeyField { field }),
        Some(Value::String(value)) if value.is_empty() => {
            Err(CatalogError::MissingKeyField { field })
        }
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(CatalogError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}
