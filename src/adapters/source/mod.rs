//! Data source traits and in-memory implementations
//!
//! The export engine never queries a database itself; it consumes
//! anything that can hand it rows one at a time. [`RowSource`] is that
//! seam: executed query results, files, and plain in-memory collections
//! all satisfy the same shape. [`SchemaProbe`] is the read-only
//! companion used by source verification before an export begins.

pub mod jsonl;

use crate::domain::{Result, Row};
use std::collections::BTreeMap;

pub use jsonl::{JsonlCatalog, JsonlSource};

/// A cursor of source rows.
///
/// Rows come back as ordered column-to-value mappings in the source's
/// natural column order. `close` releases the underlying cursor and must
/// be safe to call more than once; the session calls it on both success
/// and error paths.
pub trait RowSource {
    /// Next row, or `None` when the source is exhausted.
    fn next_row(&mut self) -> Result<Option<Row>>;

    /// Releases the cursor's resources. Idempotent.
    fn close(&mut self) -> Result<()>;
}

/// In-memory row collection.
///
/// Used by tests and by embedding callers that already hold their rows.
pub struct MemorySource {
    rows: std::vec::IntoIter<Row>,
}

impl MemorySource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl RowSource for MemorySource {
    fn next_row(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.next())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Read-only view of the source schema, for precondition checks.
pub trait SchemaProbe {
    /// Column names of a source table, or `None` when the table does
    /// not exist at all.
    fn table_columns(&self, table: &str) -> Result<Option<Vec<String>>>;
}

/// In-memory schema catalog for tests and embedded callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: BTreeMap<String, Vec<String>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table with its column names.
    pub fn with_table(mut self, name: &str, columns: &[&str]) -> Self {
        self.tables.insert(
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        self
    }
}

impl SchemaProbe for MemoryCatalog {
    fn table_columns(&self, table: &str) -> Result<Option<Vec<String>>> {
        Ok(self.tables.get(table).cloned())
    }
}
