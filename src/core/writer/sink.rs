//! Output sinks for export documents
//!
//! The writer owns exactly one sink for the lifetime of a session. Three
//! implementations exist: a plain file, a gzip-compressed file, and a
//! raw stream for direct client delivery. Each carries its own close
//! discipline behind [`ExportSink::finish`] so the session can close the
//! document without knowing which sink it is talking to.

use crate::domain::{PorticoError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "compression")]
use flate2::write::GzEncoder;
#[cfg(feature = "compression")]
use flate2::Compression;

/// An open export output.
///
/// `finish` consumes the sink and must be called exactly once; dropping
/// a sink without finishing it may lose buffered bytes (gzip trailers in
/// particular).
pub trait ExportSink: Write {
    /// Flushes and closes the sink.
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Plain buffered file sink.
pub struct FileSink {
    inner: BufWriter<File>,
}

impl FileSink {
    /// Creates the file, failing fast if the path is unwritable.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            PorticoError::Io(format!("cannot open export file {}: {e}", path.display()))
        })?;
        Ok(Self {
            inner: BufWriter::new(file),
        })
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl ExportSink for FileSink {
    fn finish(mut self: Box<Self>) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Gzip-compressed file sink.
#[cfg(feature = "compression")]
pub struct GzipFileSink {
    inner: GzEncoder<BufWriter<File>>,
}

#[cfg(feature = "compression")]
impl GzipFileSink {
    /// Creates the file and wraps it in a gzip encoder.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            PorticoError::Io(format!("cannot open export file {}: {e}", path.display()))
        })?;
        Ok(Self {
            inner: GzEncoder::new(BufWriter::new(file), Compression::default()),
        })
    }
}

#[cfg(feature = "compression")]
impl Write for GzipFileSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(feature = "compression")]
impl ExportSink for GzipFileSink {
    fn finish(self: Box<Self>) -> Result<()> {
        // finish() writes the gzip trailer; flushing the BufWriter
        // afterwards pushes it to disk.
        let mut file = self
            .inner
            .finish()
            .map_err(|e| PorticoError::Io(format!("gzip close failed: {e}")))?;
        file.flush()?;
        Ok(())
    }
}

/// Transport framing metadata for streamed delivery.
///
/// When exporting straight to a client stream, these fields must reach
/// the client before any payload byte, and intermediary buffering or
/// compression must be off so the payload stays byte-exact. Outside an
/// HTTP server the head is emitted CGI-style on the stream itself; a
/// server embedding translates the fields into response headers instead.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub content_type: String,
    pub attachment_filename: String,
    pub cache_control: String,
}

impl ResponseHead {
    /// Framing for a plain-text attachment download.
    pub fn attachment(filename: &str) -> Self {
        Self {
            content_type: "text/plain".to_string(),
            attachment_filename: filename.to_string(),
            cache_control: "private".to_string(),
        }
    }

    fn write_to(&self, out: &mut dyn Write) -> std::io::Result<()> {
        write!(out, "Content-Type: {}\r\n", self.content_type)?;
        write!(
            out,
            "Content-Disposition: attachment; filename=\"{}\"\r\n",
            self.attachment_filename
        )?;
        out.write_all(b"Content-Transfer-Encoding: binary\r\n")?;
        out.write_all(b"Accept-Ranges: bytes\r\n")?;
        write!(out, "Cache-control: {}\r\n", self.cache_control)?;
        write!(out, "Pragma: {}\r\n", self.cache_control)?;
        out.write_all(b"Expires: Mon, 26 Jul 1997 05:00:00 GMT\r\n")?;
        out.write_all(b"\r\n")
    }
}

/// Unbuffered stream sink for direct client delivery.
///
/// Never compresses; the framing head is written before any payload
/// byte and every payload write is flushed through immediately.
pub struct StreamSink {
    inner: Box<dyn Write>,
}

impl StreamSink {
    /// Wraps a live output stream, emitting the framing head first.
    pub fn open(mut output: Box<dyn Write>, head: &ResponseHead) -> Result<Self> {
        head.write_to(&mut output)
            .map_err(|e| PorticoError::Io(format!("stream already committed: {e}")))?;
        Ok(Self { inner: output })
    }
}

impl Write for StreamSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.inner.flush()?;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl ExportSink for StreamSink {
    fn finish(mut self: Box<Self>) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
