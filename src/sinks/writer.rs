//! Sink over any `std::io::Write`

use super::console::terminated;
use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Wraps a writer in a mutex; each line is one `write_all` under the lock
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            name: "writer".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterSink<BufWriter<File>> {
    /// Append to `path`, creating the file if needed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_rich_logger::sinks::WriterSink;
    ///
    /// let sink = WriterSink::append_file("/var/log/app.log").unwrap();
    /// ```
    pub fn append_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)).with_name(path.display().to_string()))
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&self, line: &str) -> Result<()> {
        let buf = terminated(line);
        self.writer.lock().write_all(&buf)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
