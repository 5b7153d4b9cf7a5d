//! Rotating file sink.

use super::rotation::{self, RotationPolicy};
use super::{LogRecord, Output};
use crate::internal;
use chrono::{Local, NaiveDate};
use logroller::LogRoller;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// `logger-<YYYY-MM-DD>.log` for the given day.
#[must_use]
pub fn log_file_name(date: NaiveDate) -> String {
    format!("logger-{}.log", date.format("%Y-%m-%d"))
}

/// One JSON line per record, appended through a mutex-guarded `logroller` writer.
///
/// The file name is resolved once, when the output is built. A process that runs past
/// midnight keeps writing to the file of the day it started. Nothing touches the disk until
/// the first record.
pub struct FileOutput {
    path: PathBuf,
    policy: RotationPolicy,
    writer: Mutex<Option<LogRoller>>,
}

impl FileOutput {
    /// Writes to `<dir>/logger-<today>.log`. The directory is created here; if that fails
    /// the file goes to the current directory instead.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>, policy: RotationPolicy) -> Self {
        let dir = resolve_dir(dir.as_ref());
        let path = dir.join(log_file_name(Local::now().date_naive()));
        internal::debug("FILE", &format!("Log file: {}", path.display()));
        Self::at_path(path, policy)
    }

    /// Writes to exactly `path`, rotating under `policy`.
    #[must_use]
    pub fn at_path(path: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            writer: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn policy(&self) -> RotationPolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, Option<LogRoller>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for FileOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileOutput")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn resolve_dir(dir: &Path) -> PathBuf {
    match fs::create_dir_all(dir) {
        Ok(()) => dir.to_path_buf(),
        Err(e) => {
            internal::warn(
                "FILE",
                &format!(
                    "Failed to create {}: {e}; using current directory",
                    dir.display()
                ),
            );
            PathBuf::from(".")
        }
    }
}

impl Output for FileOutput {
    /// A record is written with a single call so it never straddles two files.
    ///
    /// # Errors
    /// `Error::RotationOverflow` when the encoded line alone exceeds the size limit, otherwise
    /// encoding, open or I/O errors.
    fn write(&self, record: &LogRecord<'_>) -> Result<(), crate::Error> {
        let mut line = record.to_json_line()?;
        line.push('\n');

        let len = line.len() as u64;
        let max = self.policy.effective_max_size();
        if len > max {
            return Err(crate::Error::RotationOverflow { len, max });
        }

        let mut writer = self.lock();
        if writer.is_none() {
            rotation::enforce_max_age(&self.path, &self.policy);
            *writer = Some(rotation::open_roller(&self.path, &self.policy)?);
        }
        if let Some(roller) = writer.as_mut() {
            roller.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        let mut writer = self.lock();
        if let Some(roller) = writer.as_mut() {
            roller.flush()?;
            rotation::enforce_max_age(&self.path, &self.policy);
        }
        Ok(())
    }
}
