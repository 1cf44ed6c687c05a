//! Newline-delimited JSON data sources
//!
//! A source table is one `.jsonl` file: one JSON object per line, with
//! object key order taken as the source column order (the engine locks
//! output structure from the first row, so order matters).

use super::{RowSource, SchemaProbe};
use crate::domain::{PorticoError, Result, Row};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Streaming row source over a JSONL file.
pub struct JsonlSource {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    line_number: usize,
}

impl JsonlSource {
    /// Opens the file. Fails if the file cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| {
            PorticoError::Source(format!("cannot open source file {}: {e}", path.display()))
        })?;
        Ok(Self {
            path,
            reader: Some(BufReader::new(file)),
            line_number: 0,
        })
    }

    fn parse_line(&self, line: &str) -> Result<Row> {
        let value: serde_json::Value = serde_json::from_str(line).map_err(|e| {
            PorticoError::Source(format!(
                "{}:{}: invalid JSON: {e}",
                self.path.display(),
                self.line_number
            ))
        })?;
        match value {
            serde_json::Value::Object(object) => Ok(Row::from_json_object(object)),
            _ => Err(PorticoError::Source(format!(
                "{}:{}: expected a JSON object per line",
                self.path.display(),
                self.line_number
            ))),
        }
    }
}

impl RowSource for JsonlSource {
    fn next_row(&mut self) -> Result<Option<Row>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        let mut line = String::new();
        loop {
            line.clear();
            self.line_number += 1;
            let read = reader.read_line(&mut line).map_err(|e| {
                PorticoError::Source(format!(
                    "{}:{}: read failed: {e}",
                    self.path.display(),
                    self.line_number
                ))
            })?;
            if read == 0 {
                return Ok(None);
            }
            if line.trim().is_empty() {
                continue;
            }
            let trimmed = line.trim_end_matches(['\n', '\r']).to_string();
            return self.parse_line(&trimmed).map(Some);
        }
    }

    fn close(&mut self) -> Result<()> {
        self.reader = None;
        Ok(())
    }
}

/// Schema probe over a directory of JSONL files.
///
/// A table named `T` maps to `<root>/<prefix>T.jsonl`; a missing file
/// means the table is absent, and the keys of the first data line are
/// the table's columns.
#[derive(Debug, Clone)]
pub struct JsonlCatalog {
    root: PathBuf,
    prefix: String,
}

impl JsonlCatalog {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    /// Path a table name resolves to.
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.root.join(format!("{}{}.jsonl", self.prefix, table))
    }
}

impl SchemaProbe for JsonlCatalog {
    fn table_columns(&self, table: &str) -> Result<Option<Vec<String>>> {
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(None);
        }
        let mut source = JsonlSource::open(&path)?;
        let columns = match source.next_row()? {
            Some(row) => row.iter().map(|(name, _)| name.to_string()).collect(),
            None => Vec::new(),
        };
        source.close()?;
        Ok(Some(columns))
    }
}
