//! Catalog implementation
//!
//! HashMap-based catalog with sort-on-snapshot.

use std::collections::HashMap;

use crate::protocol::Command;
use crate::record::{FieldSet, Record};

/// Keyed collection of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: HashMap<String, Record>,
}

impl Catalog {
    /// Create a new empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing any record with the same isbn
    ///
    /// Returns the replaced record, if any.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.isbn().to_string(), record)
    }

    /// Overwrite the fields in `fields` on the record at `isbn`
    ///
    /// A merge onto an absent isbn is dropped. Returns whether a record was
    /// updated.
    pub fn merge(&mut self, isbn: &str, fields: &FieldSet) -> bool {
        match self.records.get_mut(isbn) {
            Some(record) => {
                record.merge(fields);
                true
            }
            None => false,
        }
    }

    /// Delete the record at `isbn`, if present
    pub fn remove(&mut self, isbn: &str) -> Option<Record> {
        self.records.remove(isbn)
    }

    /// Apply a parsed command
    ///
    /// Returns `false` when the command had nothing to act on (patch or
    /// delete of an absent isbn).
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Insert(record) => {
                self.insert(record);
                true
            }
            Command::Patch { isbn, fields } => self.merge(&isbn, &fields),
            Command::Delete { isbn } => self.remove(&isbn).is_some(),
        }
    }

    /// All records, sorted ascending by isbn
    pub fn snapshot(&self) -> Vec<&Record> {
        let mut records: Vec<&Record> = self.records.values().collect();
        records.sort_unstable_by(|a, b| a.isbn().cmp(b.isbn()));
        records
    }

    /// Records whose `name` equals `name` exactly (unordered)
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .values()
            .filter(move |record| record.name() == Some(name))
    }

    pub fn get(&self, isbn: &str) -> Option<&Record> {
        self.records.get(isbn)
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.records.contains_key(isbn)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Catalog {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}
