//! A core pairs a level filter with the sinks that receive what it accepts.

use crate::level::Level;
use crate::output::Sink;
use std::fmt;
use std::sync::Arc;

/// Filters are either open-ended or half-open ranges, so a split logger can
/// partition the level set without gaps or overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFilter {
    /// `level >= min`
    AtLeast(Level),
    /// `min <= level < below`
    Between { min: Level, below: Level },
}

impl LevelFilter {
    #[must_use]
    pub const fn accepts(self, level: Level) -> bool {
        let level = level as u8;
        match self {
            Self::AtLeast(min) => level >= min as u8,
            Self::Between { min, below } => level >= min as u8 && level < below as u8,
        }
    }
}

pub struct Core {
    pub(super) filter: LevelFilter,
    pub(super) sinks: Vec<Arc<dyn Sink>>,
    pub(super) stacktrace: bool,
}

impl Core {
    #[must_use]
    pub const fn new(filter: LevelFilter) -> Self {
        Self {
            filter,
            sinks: Vec::new(),
            stacktrace: false,
        }
    }

    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Cores of one logger share the console through this.
    #[must_use]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Records accepted by this core get a stack trace attached.
    #[must_use]
    pub const fn stacktrace(mut self, enabled: bool) -> Self {
        self.stacktrace = enabled;
        self
    }

    #[must_use]
    pub const fn filter(&self) -> LevelFilter {
        self.filter
    }

    #[must_use]
    pub const fn captures_stacktrace(&self) -> bool {
        self.stacktrace
    }

    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("filter", &self.filter)
            .field("sinks", &self.sinks.len())
            .field("stacktrace", &self.stacktrace)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_filters_partition_levels() {
        let debug = LevelFilter::Between {
            min: Level::Debug,
            below: Level::Error,
        };
        let error = LevelFilter::AtLeast(Level::Error);
        for level in Level::all() {
            assert_ne!(debug.accepts(level), error.accepts(level), "{level}");
        }
        assert!(debug.accepts(Level::Warn));
        assert!(error.accepts(Level::Fatal));
    }

    #[test]
    fn at_least_debug_accepts_everything() {
        let filter = LevelFilter::AtLeast(Level::Debug);
        assert!(Level::all().into_iter().all(|l| filter.accepts(l)));
    }
}
