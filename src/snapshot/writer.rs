//! Snapshot Writer
//!
//! Emits records as canonical lines.

use std::io::Write;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::protocol::write_record;
use crate::record::Record;

/// Writes snapshot lines to a sink
pub struct SnapshotWriter<W: Write> {
    writer: W,
    records_written: usize,
}

impl<W: Write> SnapshotWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    /// Write every record of `catalog` in isbn order
    ///
    /// Returns the number of records written by this call.
    pub fn write_catalog(&mut self, catalog: &Catalog) -> Result<usize> {
        self.write_records(catalog.snapshot())
    }

    /// Write records in the order given
    pub fn write_records<'a, I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut count = 0;
        for record in records {
            write_record(&mut self.writer, record)?;
            count += 1;
        }
        self.records_written += count;
        Ok(count)
    }

    /// Total records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
