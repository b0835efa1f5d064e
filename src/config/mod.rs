//! `LogConfig` is built once by the application and handed to `init_logger`.
//! It can be constructed in code or loaded from a TOML file; hooks can only be
//! registered in code.

use crate::fmt::Encoding;
use crate::internal;
use crate::level::Level;
use crate::logger::{Hook, NamedHook};
use crate::path::{Platform, Stream, expand_root, log_path, log_path_in};
use crate::rotate::{RotationConfig, RotationPolicy};
use chrono::{DateTime, TimeZone};
use serde::Deserialize;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_APP_NAME: &str = "splitlog";

/// A completely empty config file must still produce a working logger, so
/// every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One `debug` stream for everything instead of split `debug`/`err` streams.
    pub simple: bool,
    /// Directory name under the log root.
    pub app_name: String,
    /// Replaces `/var/log` (Linux) or `/tmp` (elsewhere). `~` is expanded.
    pub root_dir: Option<String>,
    /// Tee every record to stdout.
    pub console: bool,
    pub format: Encoding,
    /// Threshold for splitlog's own stderr diagnostics; unset disables them.
    pub internal_level: Option<String>,
    pub rotation: RotationConfig,
    /// Run for every record at `Error` and above.
    #[serde(skip)]
    pub hooks: Vec<NamedHook>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            simple: false,
            app_name: DEFAULT_APP_NAME.to_string(),
            root_dir: None,
            console: true,
            format: Encoding::default(),
            internal_level: None,
            rotation: RotationConfig::default(),
            hooks: Vec::new(),
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn simple(mut self, simple: bool) -> Self {
        self.simple = simple;
        self
    }

    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    #[must_use]
    pub fn root_dir(mut self, dir: impl Into<String>) -> Self {
        self.root_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    #[must_use]
    pub const fn format(mut self, format: Encoding) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn internal_level(mut self, level: Level) -> Self {
        self.internal_level = Some(level.as_str().to_string());
        self
    }

    #[must_use]
    pub const fn rotation(mut self, rotation: RotationConfig) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn hook(mut self, name: impl Into<String>, hook: impl Hook + 'static) -> Self {
        self.hooks.push(NamedHook::new(name, hook));
        self
    }

    /// Reads the config file from its default location. A missing file
    /// yields the defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be
    /// read, or TOML parsing hits a syntax error.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::get_config_path()?;
        Self::load_from(&path)
    }

    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug(
                "CONFIG",
                &format!("{} not found, using defaults", path.display()),
            );
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        internal::debug("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// `<config dir>/splitlog/splitlog.toml`, e.g. `~/.config/splitlog/splitlog.toml`.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("splitlog").join("splitlog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Unknown level strings disable internal diagnostics rather than failing init.
    #[must_use]
    pub fn parse_internal_level(&self) -> Option<Level> {
        self.internal_level.as_deref()?.parse().ok()
    }

    #[must_use]
    pub fn rotation_policy(&self) -> RotationPolicy {
        self.rotation.into()
    }

    /// File a stream writes to when the logger is initialized at `at`.
    #[must_use]
    pub fn stream_path<Tz: TimeZone>(&self, stream: Stream, at: &DateTime<Tz>) -> PathBuf
    where
        Tz::Offset: Display,
    {
        let platform = Platform::current();
        match self.root_dir.as_deref() {
            Some(root) => log_path_in(&expand_root(root), platform, &self.app_name, stream, at),
            None => log_path(platform, &self.app_name, stream, at),
        }
    }
}
