//! Side channels for error-level records, such as alerting.
//!
//! Any `Fn(&Record) -> HookResult` closure is a hook. Failures are collected
//! and returned from the log call that triggered them.

use crate::output::Record;
use std::fmt;
use std::sync::Arc;

pub type HookResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Invoked synchronously, after routing, for every record at `Error` or above.
pub trait Hook: Send + Sync {
    /// # Errors
    /// Whatever the hook considers a failure; it is surfaced as `Error::Hook`.
    fn handle(&self, record: &Record) -> HookResult;
}

impl<F> Hook for F
where
    F: Fn(&Record) -> HookResult + Send + Sync,
{
    fn handle(&self, record: &Record) -> HookResult {
        self(record)
    }
}

/// A hook plus the name its failures are reported under.
#[derive(Clone)]
pub struct NamedHook {
    name: String,
    hook: Arc<dyn Hook>,
}

impl NamedHook {
    #[must_use]
    pub fn new(name: impl Into<String>, hook: impl Hook + 'static) -> Self {
        Self {
            name: name.into(),
            hook: Arc::new(hook),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    /// The wrapped hook's failure.
    pub fn handle(&self, record: &Record) -> HookResult {
        self.hook.handle(record)
    }
}

impl fmt::Debug for NamedHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedHook")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
