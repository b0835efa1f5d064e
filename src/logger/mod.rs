//! The router. A `Logger` owns one encoder, a list of cores and a list of
//! hooks. Each record is encoded once, written to every sink of every core
//! whose filter accepts its level, and then handed to the hooks when it is at
//! `Error` or above.
//!
//! Sink failures do not stop the fan-out: every accepting sink is attempted,
//! and the first failure is returned from the log call.

mod builder;
mod cores;
mod from_config;
mod hook;

pub use builder::{CoreBuilder, LoggerBuilder};
pub use cores::{Core, LevelFilter};
pub use hook::{Hook, HookResult, NamedHook};

use crate::error::HookError;
use crate::fmt::{Encoder, resolve};
use crate::internal;
use crate::level::Level;
use crate::output::{Console, Record, Sink};
use std::backtrace::Backtrace;
use std::fmt::{Arguments, Display};
use std::panic::Location;

/// Appended to the message of every `exit` record. Carries no newline of its
/// own; the encoder ends the line.
pub const EXIT_MARKER: &str = "\t === err exit === ";

/// Status passed to `std::process::exit` by [`terminate`] (255 on Unix).
pub const EXIT_CODE: i32 = -1;

/// Immutable after build, so it can be shared by every thread without locks
/// of its own. Sinks serialize their own writes.
#[derive(Debug, Default)]
pub struct Logger {
    encoder: Encoder,
    cores: Vec<Core>,
    hooks: Vec<NamedHook>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Whether any core would accept a record at `level`.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.cores.iter().any(|core| core.filter.accepts(level))
    }

    /// Routes an already-built record.
    ///
    /// # Errors
    /// The first sink failure; otherwise the collected hook failures.
    pub fn dispatch(&self, mut record: Record) -> Result<(), crate::Error> {
        let mut first_err: Option<crate::Error> = None;
        let mut plain: Option<String> = None;
        let mut traced: Option<String> = None;

        for core in self.cores.iter().filter(|c| c.filter.accepts(record.level)) {
            let slot = if core.stacktrace {
                if record.stacktrace.is_none() {
                    record.stacktrace = Some(Backtrace::force_capture().to_string());
                }
                &mut traced
            } else {
                &mut plain
            };

            if slot.is_none() {
                let encoded = if core.stacktrace {
                    self.encoder.encode(&record)
                } else {
                    let trace = record.stacktrace.take();
                    let encoded = self.encoder.encode(&record);
                    record.stacktrace = trace;
                    encoded
                };
                match encoded {
                    Ok(line) => *slot = Some(line),
                    Err(e) => {
                        internal::error("LOGGER", &format!("Failed to encode record: {e}"));
                        first_err.get_or_insert(e);
                        continue;
                    }
                }
            }
            let Some(line) = slot.as_deref() else {
                continue;
            };

            for sink in &core.sinks {
                if let Err(e) = sink.write(line.as_bytes()) {
                    internal::error("LOGGER", &format!("Sink write failed: {e}"));
                    first_err.get_or_insert(e);
                }
            }
        }

        let hook_errors = self.run_hooks(&record);

        match first_err {
            Some(e) => Err(e),
            None if !hook_errors.is_empty() => Err(crate::Error::Hook(hook_errors)),
            None => Ok(()),
        }
    }

    fn run_hooks(&self, record: &Record) -> Vec<HookError> {
        if record.level < Level::Error {
            return Vec::new();
        }
        self.hooks
            .iter()
            .filter_map(|hook| {
                hook.handle(record).err().map(|e| {
                    internal::warn("HOOK", &format!("Hook {} failed: {e}", hook.name()));
                    HookError::new(hook.name(), e.to_string())
                })
            })
            .collect()
    }

    fn emit(
        &self,
        level: Level,
        message: String,
        caller: &'static Location<'static>,
    ) -> Result<(), crate::Error> {
        if !self.enabled(level) && (level < Level::Error || self.hooks.is_empty()) {
            return Ok(());
        }
        self.dispatch(Record::new(level, message, caller))
    }

    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn log(&self, level: Level, msg: impl Display) -> Result<(), crate::Error> {
        self.emit(level, msg.to_string(), Location::caller())
    }

    /// `format_args!` entry point used by the crate's macros.
    ///
    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn log_args(&self, level: Level, args: Arguments<'_>) -> Result<(), crate::Error> {
        self.emit(level, args.to_string(), Location::caller())
    }

    /// printf-style variant, see [`resolve`].
    ///
    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn logf(
        &self,
        level: Level,
        template: &str,
        args: &[&dyn Display],
    ) -> Result<(), crate::Error> {
        self.emit(level, resolve(template, args), Location::caller())
    }

    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn debug(&self, msg: impl Display) -> Result<(), crate::Error> {
        self.emit(Level::Debug, msg.to_string(), Location::caller())
    }

    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn info(&self, msg: impl Display) -> Result<(), crate::Error> {
        self.emit(Level::Info, msg.to_string(), Location::caller())
    }

    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn warn(&self, msg: impl Display) -> Result<(), crate::Error> {
        self.emit(Level::Warn, msg.to_string(), Location::caller())
    }

    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn error(&self, msg: impl Display) -> Result<(), crate::Error> {
        self.emit(Level::Error, msg.to_string(), Location::caller())
    }

    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn debugf(&self, template: &str, args: &[&dyn Display]) -> Result<(), crate::Error> {
        self.emit(Level::Debug, resolve(template, args), Location::caller())
    }

    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn infof(&self, template: &str, args: &[&dyn Display]) -> Result<(), crate::Error> {
        self.emit(Level::Info, resolve(template, args), Location::caller())
    }

    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn warnf(&self, template: &str, args: &[&dyn Display]) -> Result<(), crate::Error> {
        self.emit(Level::Warn, resolve(template, args), Location::caller())
    }

    /// # Errors
    /// See [`Logger::dispatch`].
    #[track_caller]
    pub fn errorf(&self, template: &str, args: &[&dyn Display]) -> Result<(), crate::Error> {
        self.emit(Level::Error, resolve(template, args), Location::caller())
    }

    /// First half of `exit`: emits `msg` plus [`EXIT_MARKER`] at `Error` and
    /// flushes every sink, without terminating. Tests use this directly.
    ///
    /// # Errors
    /// The emission's failure, or else the flush's.
    #[track_caller]
    pub fn exit_record(&self, msg: impl Display) -> Result<(), crate::Error> {
        let caller = Location::caller();
        let emitted = self.emit(Level::Error, format!("{msg}{EXIT_MARKER}"), caller);
        let flushed = self.flush();
        emitted.and(flushed)
    }

    /// Emits like [`Logger::exit_record`], then terminates the process.
    #[track_caller]
    pub fn exit(&self, msg: impl Display) -> ! {
        if let Err(e) = self.exit_record(msg) {
            internal::error("LOGGER", &format!("Exit record incomplete: {e}"));
        }
        terminate()
    }

    /// # Errors
    /// Returns the first flush failure across all sinks.
    pub fn flush(&self) -> Result<(), crate::Error> {
        let mut first_err = None;
        for sink in self.cores.iter().flat_map(|core| &core.sinks) {
            if let Err(e) = sink.flush() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    #[must_use]
    pub const fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    #[must_use]
    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    #[must_use]
    pub fn core_count(&self) -> usize {
        self.cores.len()
    }

    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }
}

/// Ends the process with [`EXIT_CODE`]. In-flight log calls on other threads
/// are not waited for.
pub fn terminate() -> ! {
    std::process::exit(EXIT_CODE)
}

/// Best-effort output for `exit` when no logger exists: one console line.
pub(crate) fn emergency_line(msg: &str, caller: &'static Location<'static>) {
    let record = Record::new(Level::Error, format!("{msg}{EXIT_MARKER}"), caller);
    if let Ok(line) = Encoder::default().encode(&record) {
        let console = Console::new();
        let _ = console.write(line.as_bytes());
        let _ = console.flush();
    }
}
