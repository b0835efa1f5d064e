//! Rotating file sink.

use super::Sink;
use crate::rotate::{RotatingWriter, RotationPolicy};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct FileSink {
    writer: RotatingWriter,
}

impl FileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        Self {
            writer: RotatingWriter::new(path, policy),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.writer.path()
    }

    #[must_use]
    pub const fn writer(&self) -> &RotatingWriter {
        &self.writer
    }
}

impl From<RotatingWriter> for FileSink {
    fn from(writer: RotatingWriter) -> Self {
        Self { writer }
    }
}

impl Sink for FileSink {
    fn write(&self, line: &[u8]) -> Result<(), crate::Error> {
        self.writer.write(line).map(|_| ())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.writer.flush()
    }
}
