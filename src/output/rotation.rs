//! Rotation policy and the `logroller` writer it configures.
//!
//! Size rotation, backup count and gzip are left to `logroller`. It has no age limit, so
//! `max_age_days` is enforced here by pruning old backups whenever the file sink opens or
//! flushes.

use crate::internal;
use logroller::{Compression, LogRoller, LogRollerBuilder, Rotation, RotationSize};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub const MEGABYTE: u64 = 1024 * 1024;

const KILOBYTE: u64 = 1024;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Concrete thresholds for the file sink. Built from `RotationConfig` with defaults filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Bytes. Zero means the default 10 MB.
    pub max_size: u64,
    /// Backups kept after rotation. Zero keeps all.
    pub max_backups: usize,
    /// Backups older than this many days are removed. Zero keeps all.
    pub max_age_days: u32,
    /// Gzip backups after rotation.
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size: 10 * MEGABYTE,
            max_backups: 3,
            max_age_days: 28,
            compress: true,
        }
    }
}

impl RotationPolicy {
    /// Size limit in bytes with the zero default applied.
    #[must_use]
    pub fn effective_max_size(&self) -> u64 {
        if self.max_size == 0 {
            Self::default().max_size
        } else {
            self.max_size
        }
    }

    /// Whole megabytes when possible, otherwise kilobytes rounded up.
    fn rotation_size(&self) -> RotationSize {
        let bytes = self.effective_max_size();
        if bytes % MEGABYTE == 0 {
            RotationSize::MB(bytes / MEGABYTE)
        } else {
            RotationSize::KB(bytes.div_ceil(KILOBYTE))
        }
    }

    /// Age limit, `None` when backups never expire.
    #[must_use]
    pub fn max_age(&self) -> Option<Duration> {
        (self.max_age_days > 0)
            .then(|| Duration::from_secs(u64::from(self.max_age_days) * SECONDS_PER_DAY))
    }
}

/// Builds the size-rotating writer for `path`, creating its directory.
pub(super) fn open_roller(path: &Path, policy: &RotationPolicy) -> Result<LogRoller, crate::Error> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir)?;

    let dir_str = dir
        .to_str()
        .ok_or_else(|| crate::Error::InvalidPath(dir.display().to_string()))?;
    let file_name = path
        .file_name()
        .and_then(OsStr::to_str)
        .ok_or_else(|| crate::Error::InvalidPath(path.display().to_string()))?;

    let mut builder = LogRollerBuilder::new(dir_str, file_name)
        .rotation(Rotation::SizeBased(policy.rotation_size()));
    if policy.max_backups > 0
        && let Ok(keep) = policy.max_backups.try_into()
    {
        builder = builder.max_keep_files(keep);
    }
    if policy.compress {
        builder = builder.compression(Compression::Gzip);
    }

    let roller = builder
        .build()
        .map_err(|e| crate::Error::Rotation(e.to_string()))?;
    internal::debug("ROTATE", &format!("Opened {}", path.display()));
    Ok(roller)
}

/// Removes backups of `active` last modified more than `max_age` before `now`. Backups are
/// siblings whose name extends the active file name (`logger-<date>.log.<suffix>`).
pub(super) fn prune_expired(
    active: &Path,
    max_age: Duration,
    now: SystemTime,
) -> Result<Vec<PathBuf>, crate::Error> {
    let Some(active_name) = active.file_name().and_then(OsStr::to_str) else {
        return Ok(Vec::new());
    };

    let mut removed = Vec::new();
    for entry in fs::read_dir(parent_dir(active))? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name == active_name || !name.starts_with(active_name) {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        if now.duration_since(modified).is_ok_and(|age| age > max_age) {
            let path = entry.path();
            fs::remove_file(&path)?;
            internal::debug("ROTATE", &format!("Removed expired {}", path.display()));
            removed.push(path);
        }
    }
    Ok(removed)
}

/// Age pruning with failures reported as diagnostics only.
pub(super) fn enforce_max_age(active: &Path, policy: &RotationPolicy) {
    let Some(max_age) = policy.max_age() else {
        return;
    };
    if let Err(e) = prune_expired(active, max_age, SystemTime::now()) {
        internal::warn("ROTATE", &format!("Age pruning failed: {e}"));
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
