//! Command definitions
//!
//! Represents decoded command and query lines.

use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::record::{key_field, FieldSet, Record, ISBN, NAME};

/// Command types accepted on the command stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Insert,
    Patch,
    Delete,
}

impl CommandType {
    /// Match a line tag exactly (case-sensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "INSERT" => Some(CommandType::Insert),
            "PATCH" => Some(CommandType::Patch),
            "DELETE" => Some(CommandType::Delete),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            CommandType::Insert => "INSERT",
            CommandType::Patch => "PATCH",
            CommandType::Delete => "DELETE",
        }
    }
}

/// A parsed catalog mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Store the full record, replacing any record with the same isbn
    Insert(Record),

    /// Overwrite the supplied fields of an existing record
    Patch { isbn: String, fields: FieldSet },

    /// Remove a record
    Delete { isbn: String },
}

impl Command {
    /// Build a command from its type and decoded payload
    pub fn from_payload(command_type: CommandType, payload: FieldSet) -> Result<Self> {
        match command_type {
            CommandType::Insert => Ok(Command::Insert(Record::from_fields(payload)?)),
            CommandType::Patch => {
                let isbn = key_field(&payload, ISBN)?.to_string();
                Ok(Command::Patch {
                    isbn,
                    fields: payload,
                })
            }
            CommandType::Delete => {
                let isbn = key_field(&payload, ISBN)?.to_string();
                Ok(Command::Delete { isbn })
            }
        }
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Insert(_) => CommandType::Insert,
            Command::Patch { .. } => CommandType::Patch,
            Command::Delete { .. } => CommandType::Delete,
        }
    }

    /// The key this command targets
    pub fn isbn(&self) -> &str {
        match self {
            Command::Insert(record) => record.isbn(),
            Command::Patch { isbn, .. } | Command::Delete { isbn } => isbn,
        }
    }
}

/// An equality search on the `name` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: String,
}

impl SearchQuery {
    /// The only tag meaningful on the query stream
    pub const TAG: &'static str = "SEARCH";

    /// An empty name is a valid query; it matches records with an empty name
    pub fn from_payload(payload: &FieldSet) -> Result<Self> {
        match payload.get(NAME) {
            Some(Value::String(name)) => Ok(Self { name: name.clone() }),
            None | Some(Value::Null) => Err(CatalogError::MissingKeyField { field: NAME }),
            Some(_) => Err(CatalogError::InvalidField {
                field: NAME,
                expected: "a string",
            }),
        }
    }
}
