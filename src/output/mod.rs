//! Destinations for encoded lines. A core owns a set of sinks; the built-in
//! ones are the rotating file, the console, and an in-memory buffer. The
//! `Sink` trait lets callers add their own without touching the router.

mod buffer;
mod console;
mod file;

pub use buffer::MemorySink;
pub use console::Console;
pub use file::FileSink;

use crate::level::Level;
use chrono::{DateTime, Local};
use std::panic::Location;

/// One log event as the router, encoder and hooks see it.
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub time: DateTime<Local>,
    /// Call site of the facade or `Logger` method that produced the record.
    pub caller: &'static Location<'static>,
    pub message: String,
    /// Attached by cores that capture stack traces (the error core in split mode).
    pub stacktrace: Option<String>,
}

impl Record {
    /// Stamps the record with the current local time.
    #[must_use]
    pub fn new(level: Level, message: String, caller: &'static Location<'static>) -> Self {
        Self {
            level,
            time: Local::now(),
            caller,
            message,
            stacktrace: None,
        }
    }
}

/// `Send + Sync` because one logger is shared by every thread in the process.
pub trait Sink: Send + Sync {
    /// Writes one encoded line. Implementations must write it as a single
    /// unit so lines from concurrent callers never interleave.
    ///
    /// # Errors
    /// I/O errors from the underlying destination.
    fn write(&self, line: &[u8]) -> Result<(), crate::Error>;

    /// # Errors
    /// I/O errors from the underlying destination.
    fn flush(&self) -> Result<(), crate::Error>;
}
