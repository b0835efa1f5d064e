//! Maps (platform, app, stream) to the file a rotating writer should own.
//!
//! Linux servers get a persistent per-day directory under `/var/log`; everything
//! else gets an ephemeral per-hour directory under `/tmp`.

mod clock;

pub use clock::{day, day_hour, today, today_hour};

use chrono::{DateTime, TimeZone};
use std::fmt;
use std::path::{Path, PathBuf};

/// Only the distinction that changes the path layout is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Other,
}

impl Platform {
    /// Detected at compile time.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub const fn default_root(self) -> &'static str {
        match self {
            Self::Linux => "/var/log",
            Self::Other => "/tmp",
        }
    }

    /// Name of the date directory for `at`.
    #[must_use]
    pub fn date_dir<Tz: TimeZone>(self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        match self {
            Self::Linux => day(at),
            Self::Other => day_hour(at),
        }
    }
}

/// The two severity streams a split logger writes. Simple mode only uses `Debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Debug,
    Err,
}

impl Stream {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Err => "err",
        }
    }

    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.log", self.as_str())
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<platform root>/<app>/<date dir>/<stream>.log`.
#[must_use]
pub fn log_path<Tz: TimeZone>(
    platform: Platform,
    app: &str,
    stream: Stream,
    at: &DateTime<Tz>,
) -> PathBuf
where
    Tz::Offset: fmt::Display,
{
    log_path_in(Path::new(platform.default_root()), platform, app, stream, at)
}

/// Same layout as [`log_path`] below an explicit root directory.
#[must_use]
pub fn log_path_in<Tz: TimeZone>(
    root: &Path,
    platform: Platform,
    app: &str,
    stream: Stream,
    at: &DateTime<Tz>,
) -> PathBuf
where
    Tz::Offset: fmt::Display,
{
    root.join(app)
        .join(platform.date_dir(at))
        .join(stream.file_name())
}

/// Config values use `~` for portability.
#[must_use]
pub fn expand_root(root: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(root).as_ref())
}
