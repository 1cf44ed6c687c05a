//! Export session lifecycle
//!
//! The only stateful, long-lived object in the pipeline. A session moves
//! NotStarted -> Exporting -> Ended; the states are encoded structurally
//! ([`ExportSession::begin`] constructs one, [`ExportSession::end`]
//! consumes it), so an out-of-order call is a compile error rather than
//! a runtime check.
//!
//! Every non-fatal condition is recorded as a comment inside the export
//! artifact itself, so the document carries its own audit trail. Only
//! unrecoverable I/O aborts a run.

use crate::adapters::source::RowSource;
use crate::core::mapping::{normalize_mapping, reconcile, MappingSet, ReconciledStructure};
use crate::core::schema::CanonicalSchema;
use crate::core::serialize::{format_elapsed, serialize_row};
use crate::core::writer::{ExportWriter, SinkConfig, FORMAT_VERSION};
use crate::domain::Result;
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Options for a file-backed export.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Export file path; a timestamped name in the working directory is
    /// derived when absent.
    pub path: Option<PathBuf>,
    /// Source-tool tag recorded in the document header.
    pub source_label: Option<String>,
    /// Gzip the output file. Ignored when the `compression` feature is
    /// compiled out.
    pub compress: bool,
}

/// Result of one table export.
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub table: String,
    pub rows: u64,
    pub elapsed: std::time::Duration,
    /// True when the table name was not canonical and the export was
    /// skipped with a diagnostic comment.
    pub skipped: bool,
}

/// Result of a whole export run.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: Option<PathBuf>,
    pub tables: Vec<TableSummary>,
    pub comments: Vec<String>,
    pub elapsed: std::time::Duration,
}

/// Timestamped default export filename.
pub fn default_filename(compressed: bool) -> String {
    let stamp = Local::now().format("%Y-%m-%d %H%M%S");
    let suffix = if compressed { ".txt.gz" } else { ".txt" };
    format!("export {stamp}{suffix}")
}

/// An in-progress export run.
pub struct ExportSession {
    writer: ExportWriter,
    path: Option<PathBuf>,
    comments: Vec<String>,
    tables: Vec<TableSummary>,
    started_at: Instant,
}

impl ExportSession {
    /// Begins a file-backed export: opens the sink, writes the document
    /// header and the opening comment.
    pub fn begin(options: ExportOptions) -> Result<Self> {
        let compressed = options.compress && cfg!(feature = "compression");
        let path = options
            .path
            .unwrap_or_else(|| PathBuf::from(default_filename(compressed)));

        tracing::info!(path = %path.display(), compressed, "Beginning export");

        let writer = ExportWriter::open(SinkConfig::File {
            path: path.clone(),
            compress: options.compress,
        })?;
        Self::start(writer, Some(path), options.source_label.as_deref())
    }

    /// Begins an export straight onto a live output stream. Framing
    /// metadata goes out before any payload byte; the stream is never
    /// compressed.
    pub fn begin_streaming(
        output: Box<dyn Write>,
        filename: &str,
        source_label: Option<&str>,
    ) -> Result<Self> {
        tracing::info!(filename, "Beginning streamed export");
        let writer = ExportWriter::open(SinkConfig::Stream {
            output,
            filename: filename.to_string(),
        })?;
        Self::start(writer, None, source_label)
    }

    fn start(
        mut writer: ExportWriter,
        path: Option<PathBuf>,
        source_label: Option<&str>,
    ) -> Result<Self> {
        writer.write_header(FORMAT_VERSION, source_label)?;
        let mut session = Self {
            writer,
            path,
            comments: Vec::new(),
            tables: Vec::new(),
            started_at: Instant::now(),
        };
        session.comment(&format!(
            "Export Started: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ))?;
        Ok(session)
    }

    /// Writes a comment into the document and echoes it into the
    /// session's audit log.
    pub fn comment(&mut self, message: &str) -> Result<()> {
        self.writer.write_comment(message)?;
        self.comments.push(message.to_string());
        Ok(())
    }

    /// Comments written so far, in order.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Exports one table.
    ///
    /// An unknown table name is a configuration error, not a fatal one:
    /// it produces a diagnostic comment plus a blank separator and the
    /// session continues. The output structure is locked from the first
    /// row; the row source is released on success and error paths alike.
    pub fn export_table(
        &mut self,
        table_name: &str,
        source: &mut dyn RowSource,
        mapping: &MappingSet,
    ) -> Result<TableSummary> {
        let begin = Instant::now();

        let Some(table) = CanonicalSchema::get(table_name) else {
            tracing::warn!(table = table_name, "Not a canonical table, skipping");
            let valid: Vec<&str> = CanonicalSchema::table_names().collect();
            self.comment(&format!(
                "Error: {table_name} is not a valid export. The valid tables for export are {}",
                valid.join(", ")
            ))?;
            self.writer.write_blank()?;
            let _ = source.close();
            let summary = TableSummary {
                table: table_name.to_string(),
                rows: 0,
                elapsed: begin.elapsed(),
                skipped: true,
            };
            self.tables.push(summary.clone());
            return Ok(summary);
        };

        self.writer.write_table_name(table_name)?;

        let normalized = normalize_mapping(mapping, table);

        // Stream rows through; the cursor must be released even when a
        // read or write fails mid-table.
        let pump = (|| -> Result<u64> {
            let mut structure = ReconciledStructure::default();
            let mut rows = 0u64;
            while let Some(row) = source.next_row()? {
                if rows == 0 {
                    structure = reconcile(&row, table, &normalized);
                    self.writer.write_columns_header(&structure.header_tokens())?;
                }
                rows += 1;
                let record = serialize_row(&row, &structure, &normalized);
                self.writer.write_record(&record)?;
            }
            Ok(rows)
        })();
        let close_result = source.close();
        let rows = pump?;
        close_result?;

        if rows > 0 {
            self.writer.write_blank()?;
        }

        let elapsed = begin.elapsed();
        self.comment(&format!(
            "Exported Table: {table_name} ({rows} rows, {})",
            format_elapsed(elapsed)
        ))?;
        tracing::info!(table = table_name, rows, "Exported table");

        let summary = TableSummary {
            table: table_name.to_string(),
            rows,
            elapsed,
            skipped: false,
        };
        self.tables.push(summary.clone());
        Ok(summary)
    }

    /// Ends the export: writes the completion comments and closes the
    /// sink exactly once.
    pub fn end(mut self) -> Result<ExportSummary> {
        let elapsed = self.started_at.elapsed();
        self.comment(&format!(
            "Export Completed: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ))?;
        self.comment(&format!("Elapsed Time: {}", format_elapsed(elapsed)))?;

        let Self {
            writer,
            path,
            comments,
            tables,
            ..
        } = self;
        writer.close()?;

        tracing::info!(
            tables = tables.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Export completed"
        );

        Ok(ExportSummary {
            path,
            tables,
            comments,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::source::MemorySource;
    use crate::core::mapping::MappingDirective;
    use crate::domain::{Row, Value};

    fn begin_in(dir: &std::path::Path) -> (ExportSession, PathBuf) {
        let path = dir.join("export.txt");
        let session = ExportSession::begin(ExportOptions {
            path: Some(path.clone()),
            source_label: None,
            compress: false,
        })
        .unwrap();
        (session, path)
    }

    fn read(path: &PathBuf) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_unknown_table_is_non_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, path) = begin_in(dir.path());

        let mut source = MemorySource::new(vec![[("x", 1i64)].into_iter().collect()]);
        let summary = session
            .export_table("Bogus", &mut source, &MappingSet::new())
            .unwrap();
        assert!(summary.skipped);

        // The session keeps going afterwards.
        let mut roles = MemorySource::new(vec![Row::from_iter([
            ("RoleID", Value::Int(1)),
            ("Name", Value::Text("admin".to_string())),
        ])]);
        session
            .export_table("Role", &mut roles, &MappingSet::new())
            .unwrap();
        session.end().unwrap();

        let text = read(&path);
        assert!(text.contains("// Error: Bogus is not a valid export."));
        assert!(!text.contains("Table: Bogus"));
        assert!(text.contains("Table: Role\nRoleID,Name\n1,\"admin\"\n\n"));
    }

    #[test]
    fn test_zero_row_table_has_no_header_and_no_blank() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, path) = begin_in(dir.path());

        let mut source = MemorySource::new(vec![]);
        let summary = session
            .export_table("UserRole", &mut source, &MappingSet::new())
            .unwrap();
        assert_eq!(summary.rows, 0);
        session.end().unwrap();

        let text = read(&path);
        // Structure comes from the first row, so with no rows there is
        // no columns header and no closing blank line.
        assert!(text.contains("Table: UserRole\n// Exported Table: UserRole (0 rows,"));
    }

    #[test]
    fn test_first_row_locks_structure() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, path) = begin_in(dir.path());

        // The second row's extra canonical column arrives too late to
        // register; the first row drives the schema for the whole table.
        let rows = vec![
            Row::from_iter([("UserID", Value::Int(1)), ("DiscussionID", Value::Int(2))]),
            Row::from_iter([
                ("UserID", Value::Int(3)),
                ("DiscussionID", Value::Int(4)),
                ("Bookmarked", Value::Int(1)),
            ]),
        ];
        let mut source = MemorySource::new(rows);
        session
            .export_table("UserDiscussion", &mut source, &MappingSet::new())
            .unwrap();
        session.end().unwrap();

        let text = read(&path);
        assert!(text.contains("Table: UserDiscussion\nUserID,DiscussionID\n1,2\n3,4\n\n"));
    }

    #[test]
    fn test_comments_are_echoed_to_session_log() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _path) = begin_in(dir.path());

        assert_eq!(session.comments().len(), 1);
        assert!(session.comments()[0].starts_with("Export Started: "));
    }

    #[test]
    fn test_mapped_export_with_fresh_column() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, path) = begin_in(dir.path());

        let mapping: MappingSet = [
            (
                "groupID".to_string(),
                MappingDirective::Target("RoleID".to_string()),
            ),
            (
                "groupName".to_string(),
                MappingDirective::Target("Name".to_string()),
            ),
            (
                "badge".to_string(),
                MappingDirective::Fresh {
                    column: "BadgeLabel".to_string(),
                    type_label: "varchar(50)".to_string(),
                },
            ),
        ]
        .into_iter()
        .collect();

        let mut source = MemorySource::new(vec![Row::from_iter([
            ("groupID", Value::Int(3)),
            ("groupName", Value::Text("mods".to_string())),
            ("badge", Value::Text("star".to_string())),
        ])]);
        session.export_table("Role", &mut source, &mapping).unwrap();
        session.end().unwrap();

        let text = read(&path);
        assert!(text.contains("Table: Role\nRoleID,Name,BadgeLabel:varchar(50)\n3,\"mods\",\"star\"\n\n"));
    }

    #[test]
    fn test_end_writes_completion_comments() {
        let dir = tempfile::tempdir().unwrap();
        let (session, path) = begin_in(dir.path());
        let summary = session.end().unwrap();

        let text = read(&path);
        assert!(text.starts_with("Portico Export: 1.0\n\n// Export Started: "));
        assert!(text.contains("// Export Completed: "));
        assert!(text.contains("// Elapsed Time: 00:0"));
        assert_eq!(summary.comments.len(), 3);
    }

    #[test]
    fn test_idempotent_table_blocks() {
        let dir = tempfile::tempdir().unwrap();

        let rows = || {
            vec![Row::from_iter([
                ("UserID", Value::Int(1)),
                ("RoleID", Value::Int(2)),
            ])]
        };

        let extract_block = |path: &PathBuf| {
            let text = read(path);
            let start = text.find("Table: UserRole").unwrap();
            let end = text[start..].find("\n\n").unwrap();
            text[start..start + end].to_string()
        };

        let path_a = dir.path().join("a.txt");
        let mut session = ExportSession::begin(ExportOptions {
            path: Some(path_a.clone()),
            ..Default::default()
        })
        .unwrap();
        let mut source = MemorySource::new(rows());
        session
            .export_table("UserRole", &mut source, &MappingSet::new())
            .unwrap();
        session.end().unwrap();

        let path_b = dir.path().join("b.txt");
        let mut session = ExportSession::begin(ExportOptions {
            path: Some(path_b.clone()),
            ..Default::default()
        })
        .unwrap();
        let mut source = MemorySource::new(rows());
        session
            .export_table("UserRole", &mut source, &MappingSet::new())
            .unwrap();
        session.end().unwrap();

        assert_eq!(extract_block(&path_a), extract_block(&path_b));
    }
}
