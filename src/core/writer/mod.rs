//! Export document writer
//!
//! Owns the output sink and knows the document's physical layout: the
//! version header, `Table:` lines, column headers, records, separators,
//! and `// ` comment lines. Everything above this layer hands it
//! already-serialized text.

pub mod sink;

use crate::core::serialize::COMMENT_MARKER;
use crate::domain::Result;
use sink::{ExportSink, FileSink, ResponseHead, StreamSink};
use std::io::Write;
use std::path::PathBuf;

/// Engine name emitted in the document header.
pub const ENGINE_NAME: &str = "Portico Export";
/// Wire-format version emitted in the document header. Importers select
/// their parsing rules from this string.
pub const FORMAT_VERSION: &str = "1.0";

/// Where an export document goes.
pub enum SinkConfig {
    /// Write to a file on disk, optionally gzip-compressed.
    File { path: PathBuf, compress: bool },
    /// Write to a live output stream for direct client delivery.
    Stream {
        output: Box<dyn Write>,
        filename: String,
    },
}

impl SinkConfig {
    /// Whether this configuration will actually compress.
    ///
    /// Streaming never compresses, and file compression requires the
    /// `compression` feature; without it the request is silently skipped
    /// and a plain file is written.
    pub fn compression_active(&self) -> bool {
        match self {
            SinkConfig::File { compress, .. } => *compress && cfg!(feature = "compression"),
            SinkConfig::Stream { .. } => false,
        }
    }
}

/// Writer for one export document.
pub struct ExportWriter {
    sink: Box<dyn ExportSink>,
}

impl ExportWriter {
    /// Opens the configured sink. Fails fast when the sink cannot be
    /// opened; there is no partial-open retry.
    pub fn open(config: SinkConfig) -> Result<Self> {
        let compressed = config.compression_active();
        let sink: Box<dyn ExportSink> = match config {
            SinkConfig::File { path, .. } => open_file_sink(&path, compressed)?,
            SinkConfig::Stream { output, filename } => {
                let head = ResponseHead::attachment(&filename);
                Box::new(StreamSink::open(output, &head)?)
            }
        };
        Ok(Self { sink })
    }

    /// Writes the document preamble: engine name, format version, the
    /// optional source tag, and the blank separator line.
    pub fn write_header(&mut self, version: &str, source: Option<&str>) -> Result<()> {
        write!(self.sink, "{ENGINE_NAME}: {version}")?;
        if let Some(source) = source {
            write!(self.sink, ", Source: {source}")?;
        }
        self.sink.write_all(b"\n\n")?;
        Ok(())
    }

    /// Writes an informational comment. Multi-line text gets every
    /// physical line prefixed with the comment marker so importers can
    /// skip each one independently.
    pub fn write_comment(&mut self, text: &str) -> Result<()> {
        for line in text.split('\n') {
            writeln!(self.sink, "{COMMENT_MARKER} {line}")?;
        }
        Ok(())
    }

    /// Opens a table block.
    pub fn write_table_name(&mut self, name: &str) -> Result<()> {
        writeln!(self.sink, "Table: {name}")?;
        Ok(())
    }

    /// Writes the comma-joined column header line for a table block.
    pub fn write_columns_header(&mut self, tokens: &[String]) -> Result<()> {
        writeln!(self.sink, "{}", tokens.join(","))?;
        Ok(())
    }

    /// Writes one serialized record line.
    pub fn write_record(&mut self, record: &str) -> Result<()> {
        self.sink.write_all(record.as_bytes())?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }

    /// Writes the blank line that closes a table block.
    pub fn write_blank(&mut self) -> Result<()> {
        self.sink.write_all(b"\n")?;
        Ok(())
    }

    /// Closes the sink, applying its close discipline exactly once.
    pub fn close(self) -> Result<()> {
        self.sink.finish()
    }
}

fn open_file_sink(path: &std::path::Path, compress: bool) -> Result<Box<dyn ExportSink>> {
    #[cfg(feature = "compression")]
    if compress {
        return Ok(Box::new(sink::GzipFileSink::create(path)?));
    }
    let _ = compress;
    Ok(Box::new(FileSink::create(path)?))
}
