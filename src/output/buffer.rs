use super::Sink;
use std::sync::{Arc, Mutex, PoisonError};

/// Collects lines in memory. Clones share the same buffer, so a test can keep
/// one handle while the logger owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line written so far, without trailing newlines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// All written text joined back together.
    #[must_use]
    pub fn contents(&self) -> String {
        self.lines().iter().fold(String::new(), |mut acc, line| {
            acc.push_str(line);
            acc.push('\n');
            acc
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn write(&self, line: &[u8]) -> Result<(), crate::Error> {
        let text = String::from_utf8_lossy(line);
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.trim_end_matches('\n').to_string());
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}
