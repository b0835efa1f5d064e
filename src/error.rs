//! Unified error type for all splitlog operations.

use std::fmt;

/// Error type for splitlog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from a sink, the rotating writer, or config loading.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// A facade function was called before `init`.
    Uninitialized,
    /// `init` was called after a logger had already been installed.
    AlreadyInitialized,
    /// A single write is larger than the rotating writer's size limit.
    WriteTooLarge {
        /// Length of the rejected write in bytes.
        len: u64,
        /// Maximum active file size in bytes.
        max: u64,
    },
    /// One or more hooks rejected an error-level record.
    Hook(Vec<HookError>),
    /// Format/serialization error.
    Format(String),
}

/// A failure reported by a single hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    /// Name the hook was registered under.
    pub hook: String,
    /// The hook's own error message.
    pub message: String,
}

impl HookError {
    #[must_use]
    pub fn new(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hook: hook.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.hook, self.message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::Uninitialized => write!(f, "logger used before init"),
            Self::AlreadyInitialized => write!(f, "logger already initialized"),
            Self::WriteTooLarge { len, max } => {
                write!(f, "write length {len} exceeds maximum file size {max}")
            }
            Self::Hook(errors) => {
                let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "hook failed: {}", joined.join("; "))
            }
            Self::Format(s) => write!(f, "format error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(format!("JSON serialization failed: {e}"))
    }
}
