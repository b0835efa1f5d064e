//! Separated from the writer so callers can construct policies without
//! touching any file.

use serde::Deserialize;

pub const DEFAULT_MAX_SIZE_MB: u64 = 10;
pub const DEFAULT_MAX_BACKUPS: usize = 3;
pub const DEFAULT_MAX_AGE_DAYS: u32 = 7;
pub const DEFAULT_COMPRESS: bool = true;

const MEGABYTE: u64 = 1024 * 1024;

/// Size, count, and age limits for one rotating file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Active file size in bytes that triggers a rotation.
    pub max_size: u64,
    /// Backups kept after rotation. `0` keeps all of them.
    pub max_backups: usize,
    /// Backups older than this are removed. `0` disables the age limit.
    pub max_age_days: u32,
    /// Gzip backups in the background after rotation.
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE_MB * MEGABYTE,
            max_backups: DEFAULT_MAX_BACKUPS,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            compress: DEFAULT_COMPRESS,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `0` falls back to the default size.
    #[must_use]
    pub const fn max_size_mb(mut self, mb: u64) -> Self {
        self.max_size = if mb == 0 {
            DEFAULT_MAX_SIZE_MB * MEGABYTE
        } else {
            mb.saturating_mul(MEGABYTE)
        };
        self
    }

    /// Tests and small deployments need limits below one megabyte.
    #[must_use]
    pub const fn max_size_bytes(mut self, bytes: u64) -> Self {
        self.max_size = if bytes == 0 {
            DEFAULT_MAX_SIZE_MB * MEGABYTE
        } else {
            bytes
        };
        self
    }

    #[must_use]
    pub const fn max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use]
    pub const fn max_age_days(mut self, days: u32) -> Self {
        self.max_age_days = days;
        self
    }

    #[must_use]
    pub const fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// The `[rotation]` table of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub max_size_mb: u64,
    pub max_backups: usize,
    pub max_age_days: u32,
    pub compress: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            max_backups: DEFAULT_MAX_BACKUPS,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            compress: DEFAULT_COMPRESS,
        }
    }
}

impl From<RotationConfig> for RotationPolicy {
    fn from(config: RotationConfig) -> Self {
        Self::new()
            .max_size_mb(config.max_size_mb)
            .max_backups(config.max_backups)
            .max_age_days(config.max_age_days)
            .compress(config.compress)
    }
}
