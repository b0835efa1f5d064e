//! splitlog's own diagnostics. Directory creation, rotation and compression
//! failures are reported here instead of through the logger they concern.
//!
//! Output goes straight to stderr: routing it through a `Logger` would feed a
//! failing sink back into itself. Disabled until `init` is called with a level,
//! or the `SPLITLOG_INTERNAL` environment variable names one.

use crate::level::Level;
use std::io::{self, Write};
use std::sync::OnceLock;

const ENV_VAR: &str = "SPLITLOG_INTERNAL";

static INTERNAL_LEVEL: OnceLock<Option<Level>> = OnceLock::new();

/// Only the first call takes effect; later calls are no-ops.
pub fn init(level: Option<Level>) {
    let was_init = INTERNAL_LEVEL.get().is_some();
    INTERNAL_LEVEL.get_or_init(|| level.or_else(level_from_env));
    if !was_init {
        debug("INTERNAL", "Internal diagnostics ready");
    }
}

fn level_from_env() -> Option<Level> {
    std::env::var(ENV_VAR).ok()?.parse().ok()
}

fn threshold() -> Option<Level> {
    *INTERNAL_LEVEL.get_or_init(level_from_env)
}

fn log(level: Level, scope: &str, msg: &str) {
    let Some(min) = threshold() else {
        return;
    };
    if level < min {
        return;
    }
    let mut stderr = io::stderr().lock();
    let _ = writeln!(
        stderr,
        "[splitlog] {:<5} {scope:<8} {msg}",
        level.as_capital_str()
    );
}

/// Per-write instrumentation.
pub fn trace(scope: &str, msg: &str) {
    // No trace level exists publicly; it shares the debug threshold.
    log(Level::Debug, scope, msg);
}

/// Startup and state-change details.
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Non-fatal anomalies, e.g. a backup that could not be removed.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

/// Sink and rotation failures.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
