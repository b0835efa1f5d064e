//! Backup naming and retention. Backups live next to the active file as
//! `<stem>-<timestamp><ext>` (plus `.gz` once compressed); the timestamp in the
//! name, not the file's mtime, decides its age.

use super::policy::RotationPolicy;
use crate::internal;
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Sorts lexically in time order and contains no `:` so it is valid on every filesystem.
pub const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

const GZ_SUFFIX: &str = ".gz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub path: PathBuf,
    pub time: NaiveDateTime,
    pub compressed: bool,
}

impl BackupFile {
    /// Plain and compressed copies of one backup share this key.
    fn key(&self) -> &OsStr {
        let name = self.path.file_name().unwrap_or_default();
        name.to_str()
            .and_then(|s| s.strip_suffix(GZ_SUFFIX))
            .map_or(name, OsStr::new)
    }
}

/// `(stem, ext)` of the active file, `ext` including its leading dot.
fn split_name(active: &Path) -> (String, String) {
    let stem = active
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = active
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}

/// Name a backup taken at `at` would get. Never returns a path that already
/// exists: rotations within the same millisecond are pushed forward by 1ms.
#[must_use]
pub fn backup_path(active: &Path, at: DateTime<Local>) -> PathBuf {
    let dir = active.parent().unwrap_or_else(|| Path::new("."));
    let (stem, ext) = split_name(active);
    let mut at = at.naive_local();
    loop {
        let candidate = dir.join(format!("{stem}-{}{ext}", at.format(BACKUP_TIME_FORMAT)));
        if !candidate.exists() && !super::compress::gz_path(&candidate).exists() {
            return candidate;
        }
        at += TimeDelta::milliseconds(1);
    }
}

/// Parses the timestamp out of a backup file name belonging to `active`.
fn parse_backup(active: &Path, name: &str) -> Option<(NaiveDateTime, bool)> {
    let (stem, ext) = split_name(active);
    let (name, compressed) = name
        .strip_suffix(GZ_SUFFIX)
        .map_or((name, false), |n| (n, true));
    let ts = name.strip_prefix(&stem)?.strip_prefix('-')?.strip_suffix(&ext)?;
    NaiveDateTime::parse_from_str(ts, BACKUP_TIME_FORMAT)
        .ok()
        .map(|t| (t, compressed))
}

/// All backups of `active`, newest first.
///
/// # Errors
/// Directory listing failures. A missing directory yields no backups.
pub fn list_backups(active: &Path) -> Result<Vec<BackupFile>, crate::Error> {
    let dir = active.parent().unwrap_or_else(|| Path::new("."));
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut backups = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some((time, compressed)) = parse_backup(active, name) {
            backups.push(BackupFile {
                path: entry.path(),
                time,
                compressed,
            });
        }
    }

    backups.sort_by(|a, b| b.time.cmp(&a.time));
    Ok(backups)
}

/// Deletes backups beyond the count and age limits and returns the surviving
/// uncompressed backups when the policy asks for compression.
///
/// # Errors
/// Directory listing failures. Individual removal failures are reported
/// through internal diagnostics and do not stop the pass.
pub fn apply_retention(
    active: &Path,
    policy: &RotationPolicy,
    now: DateTime<Local>,
) -> Result<Vec<PathBuf>, crate::Error> {
    let backups = list_backups(active)?;
    if backups.is_empty() {
        return Ok(Vec::new());
    }

    let mut keep = Vec::with_capacity(backups.len());
    let mut remove = Vec::new();

    if policy.max_backups > 0 {
        let mut preserved: HashSet<&OsStr> = HashSet::new();
        for backup in &backups {
            preserved.insert(backup.key());
            if preserved.len() > policy.max_backups {
                remove.push(backup);
            } else {
                keep.push(backup);
            }
        }
    } else {
        keep.extend(backups.iter());
    }

    if policy.max_age_days > 0 {
        let cutoff = now.naive_local() - TimeDelta::days(i64::from(policy.max_age_days));
        let (expired, fresh): (Vec<_>, Vec<_>) = keep.into_iter().partition(|b| b.time < cutoff);
        remove.extend(expired);
        keep = fresh;
    }

    for backup in &remove {
        match fs::remove_file(&backup.path) {
            Ok(()) => internal::debug(
                "ROTATE",
                &format!("Removed backup {}", backup.path.display()),
            ),
            Err(e) => internal::warn(
                "ROTATE",
                &format!("Failed to remove backup {}: {e}", backup.path.display()),
            ),
        }
    }

    if !policy.compress {
        return Ok(Vec::new());
    }
    // A plain backup next to its own `.gz` means compression was cut short;
    // it is queued again and the archive rewritten.
    Ok(keep
        .into_iter()
        .filter(|b| !b.compressed)
        .map(|b| b.path.clone())
        .collect())
}
