//! `splitlog` - Leveled logging with split debug/error streams and rotating files.
//!
//! Records go to date-partitioned files under `<root>/<app>/<date>/`:
//! - split mode (default): `debug.log` for `Debug`..`Warn`, `err.log` with
//!   stack traces for `Error` and above
//! - simple mode: everything in `debug.log`
//!
//! Every record is also written once to stdout. Files rotate by size, old
//! backups are pruned by count and age and gzip-compressed in the background.
//!
//! # Example
//!
//! ```no_run
//! use splitlog::LogConfig;
//!
//! splitlog::init_logger(&LogConfig::new().app_name("billing"))?;
//!
//! splitlog::info!("listening on {}", 8080)?;
//! splitlog::warnf("retrying %s (%d/%d)", &[&"upstream", &1, &3])?;
//! splitlog::error("connection lost")?;
//! # Ok::<(), splitlog::Error>(())
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `splitlog` command-line binary

pub mod config;
pub mod error;
pub mod facade;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod logger;
pub mod output;
pub mod path;
pub mod rotate;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::LogConfig;
pub use error::{Error, HookError};
pub use facade::{
    debug, debugf, error, errorf, exit, exitf, flush, info, infof, init, init_logger, install,
    is_initialized, logger, warn, warnf,
};
pub use fmt::{Encoding, resolve};
pub use level::Level;
pub use logger::{Hook, HookResult, LevelFilter, Logger, LoggerBuilder};
pub use output::{Console, FileSink, MemorySink, Record, Sink};
pub use path::Stream;
pub use rotate::{RotatingWriter, RotationConfig, RotationPolicy};
