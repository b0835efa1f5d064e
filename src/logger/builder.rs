//! Stepwise composition of a `Logger`: each `core(...)` opens a sub-builder for
//! that core's sinks, and `done()` returns to the logger builder.

use super::{Core, Hook, LevelFilter, Logger, NamedHook};
use crate::fmt::{Encoder, Encoding};
use crate::output::{Console, FileSink, Sink};
use crate::rotate::RotationPolicy;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct LoggerBuilder {
    pub(super) encoder: Encoder,
    pub(super) cores: Vec<Core>,
    pub(super) hooks: Vec<NamedHook>,
}

impl LoggerBuilder {
    /// Console encoding, no cores, no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoder = Encoder::new(encoding);
        self
    }

    /// Opens a sub-builder for a core accepting `filter`.
    #[must_use]
    pub fn core(self, filter: LevelFilter) -> CoreBuilder {
        CoreBuilder {
            parent: self,
            core: Core::new(filter),
        }
    }

    /// Adds an already assembled core.
    #[must_use]
    pub fn with_core(mut self, core: Core) -> Self {
        self.cores.push(core);
        self
    }

    /// Registers a hook for records at `Error` and above.
    #[must_use]
    pub fn hook(mut self, name: impl Into<String>, hook: impl Hook + 'static) -> Self {
        self.hooks.push(NamedHook::new(name, hook));
        self
    }

    #[must_use]
    pub fn hooks(mut self, hooks: impl IntoIterator<Item = NamedHook>) -> Self {
        self.hooks.extend(hooks);
        self
    }

    #[must_use]
    pub fn build(self) -> Logger {
        Logger {
            encoder: self.encoder,
            cores: self.cores,
            hooks: self.hooks,
        }
    }
}

/// Sinks and options for one core.
#[derive(Debug)]
pub struct CoreBuilder {
    parent: LoggerBuilder,
    core: Core,
}

impl CoreBuilder {
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.core = self.core.sink(sink);
        self
    }

    /// For sinks shared with other cores, such as the console.
    #[must_use]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.core = self.core.shared_sink(sink);
        self
    }

    #[must_use]
    pub fn console(self) -> Self {
        self.sink(Console::new())
    }

    /// A rotating file at `path`.
    #[must_use]
    pub fn file(self, path: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        self.sink(FileSink::new(path, policy))
    }

    #[must_use]
    pub fn stacktrace(mut self, enabled: bool) -> Self {
        self.core = self.core.stacktrace(enabled);
        self
    }

    /// Sub-builder consumes self, so there must be a way back to add more cores.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.cores.push(self.core);
        self.parent
    }
}
