use super::Sink;
use std::io::{self, Write};

/// Standard output. Every accepted record appears here once, in the same
/// layout as the files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Console {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Sink for Console {
    fn write(&self, line: &[u8]) -> Result<(), crate::Error> {
        // Holding the lock for the whole line keeps concurrent records from interleaving.
        let mut stdout = io::stdout().lock();
        stdout.write_all(line)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        io::stdout().flush()?;
        Ok(())
    }
}
