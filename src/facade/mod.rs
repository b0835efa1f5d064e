//! Process-wide logger. `init_logger` installs it once; the free functions and
//! macros route through it from any thread.
//!
//! Calls made before initialization return `Error::Uninitialized`, except
//! `exit`, which still prints one console line and terminates.

use crate::config::LogConfig;
use crate::internal;
use crate::level::Level;
use crate::logger::{Logger, emergency_line, terminate};
use std::fmt::{Arguments, Display};
use std::panic::Location;
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Builds a logger from `config` and installs it as the global logger.
///
/// # Errors
/// `Error::AlreadyInitialized` on every call after the first successful one.
pub fn init_logger(config: &LogConfig) -> Result<(), crate::Error> {
    internal::init(config.parse_internal_level());
    if is_initialized() {
        return Err(crate::Error::AlreadyInitialized);
    }
    install(Logger::from_config(config))
}

/// Alias of [`init_logger`].
///
/// # Errors
/// `Error::AlreadyInitialized` on every call after the first successful one.
pub fn init(config: &LogConfig) -> Result<(), crate::Error> {
    init_logger(config)
}

/// Installs a logger built elsewhere, e.g. with custom sinks.
///
/// # Errors
/// `Error::AlreadyInitialized` if a global logger already exists.
pub fn install(logger: Logger) -> Result<(), crate::Error> {
    LOGGER
        .set(logger)
        .map_err(|_| crate::Error::AlreadyInitialized)?;
    internal::info("FACADE", "Global logger installed");
    Ok(())
}

/// # Errors
/// `Error::Uninitialized` before `init_logger` or `install`.
pub fn logger() -> Result<&'static Logger, crate::Error> {
    LOGGER.get().ok_or(crate::Error::Uninitialized)
}

#[must_use]
pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

/// # Errors
/// `Error::Uninitialized`, or the logger's own failure.
#[track_caller]
pub fn log(level: Level, msg: impl Display) -> Result<(), crate::Error> {
    logger()?.log(level, msg)
}

/// Entry point for the `debug!`..`error!` macros.
///
/// # Errors
/// `Error::Uninitialized`, or the logger's own failure.
#[track_caller]
pub fn log_args(level: Level, args: Arguments<'_>) -> Result<(), crate::Error> {
    logger()?.log_args(level, args)
}

/// # Errors
/// `Error::Uninitialized`, or the logger's own failure.
#[track_caller]
pub fn debug(msg: impl Display) -> Result<(), crate::Error> {
    logger()?.debug(msg)
}

/// # Errors
/// `Error::Uninitialized`, or the logger's own failure.
#[track_caller]
pub fn info(msg: impl Display) -> Result<(), crate::Error> {
    logger()?.info(msg)
}

/// # Errors
/// `Error::Uninitialized`, or the logger's own failure.
#[track_caller]
pub fn warn(msg: impl Display) -> Result<(), crate::Error> {
    logger()?.warn(msg)
}

/// # Errors
/// `Error::Uninitialized`, or the logger's own failure.
#[track_caller]
pub fn error(msg: impl Display) -> Result<(), crate::Error> {
    logger()?.error(msg)
}

/// # Errors
/// `Error::Uninitialized`, or the logger's own failure.
#[track_caller]
pub fn debugf(template: &str, args: &[&dyn Display]) -> Result<(), crate::Error> {
    logger()?.debugf(template, args)
}

/// # Errors
/// `Error::Uninitialized`, or the logger's own failure.
#[track_caller]
pub fn infof(template: &str, args: &[&dyn Display]) -> Result<(), crate::Error> {
    logger()?.infof(template, args)
}

/// # Errors
/// `Error::Uninitialized`, or the logger's own failure.
#[track_caller]
pub fn warnf(template: &str, args: &[&dyn Display]) -> Result<(), crate::Error> {
    logger()?.warnf(template, args)
}

/// # Errors
/// `Error::Uninitialized`, or the logger's own failure.
#[track_caller]
pub fn errorf(template: &str, args: &[&dyn Display]) -> Result<(), crate::Error> {
    logger()?.errorf(template, args)
}

/// # Errors
/// `Error::Uninitialized`, or the first flush failure.
pub fn flush() -> Result<(), crate::Error> {
    logger()?.flush()
}

/// Logs `msg` with the exit marker at `Error`, flushes, and terminates with
/// status -1. Without a global logger the line goes to stdout only.
#[track_caller]
pub fn exit(msg: impl Display) -> ! {
    let caller = Location::caller();
    let message = msg.to_string();
    match LOGGER.get() {
        Some(logger) => {
            if let Err(e) = logger.exit_record(message) {
                internal::error("FACADE", &format!("Exit record incomplete: {e}"));
            }
        }
        None => emergency_line(&message, caller),
    }
    terminate()
}

/// printf-style [`exit`].
#[track_caller]
pub fn exitf(template: &str, args: &[&dyn Display]) -> ! {
    exit(crate::fmt::resolve(template, args))
}

/// `format!`-style logging at `Debug` through the global logger.
/// Evaluates to `Result<(), splitlog::Error>`.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::facade::log_args($crate::Level::Debug, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::facade::log_args($crate::Level::Info, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::facade::log_args($crate::Level::Warn, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::facade::log_args($crate::Level::Error, format_args!($($arg)*))
    };
}

/// `format!`-style [`exit`](crate::facade::exit). Never returns.
#[macro_export]
macro_rules! exit {
    ($($arg:tt)*) => {
        $crate::facade::exit(format_args!($($arg)*))
    };
}
