//! Configuration struct definitions.

use crate::output::{MEGABYTE, RotationPolicy};
use serde::Deserialize;
use std::fmt;

/// Which sinks a logger writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Lock-guarded stderr only.
    Terminal,
    /// Rotating file only.
    File,
    /// Every record goes to stderr and the rotating file.
    Both,
}

impl OutputMode {
    /// Lowercase because that is how config files spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::File => "file",
            Self::Both => "both",
        }
    }

    /// Unrecognized or empty values fall back to terminal-only output.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "file" => Self::File,
            "both" => Self::Both,
            _ => Self::Terminal,
        }
    }

    #[must_use]
    pub const fn writes_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }

    #[must_use]
    pub const fn writes_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rotation overrides. Every field is optional so a partial table only overrides what it
/// names; zero counts as unset for the numeric fields.
///
/// `compress` is tri-state: leaving it out keeps compression on, `compress = false` turns it off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Size in megabytes at which the active file is rotated.
    pub max_size_mb: Option<u64>,
    /// Number of rotated backups to keep.
    pub max_backups: Option<usize>,
    /// Days to keep rotated backups.
    pub max_age_days: Option<u32>,
    /// Gzip rotated backups.
    pub compress: Option<bool>,
}

impl RotationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn max_size_mb(mut self, mb: u64) -> Self {
        self.max_size_mb = Some(mb);
        self
    }

    #[must_use]
    pub const fn max_backups(mut self, count: usize) -> Self {
        self.max_backups = Some(count);
        self
    }

    #[must_use]
    pub const fn max_age_days(mut self, days: u32) -> Self {
        self.max_age_days = Some(days);
        self
    }

    #[must_use]
    pub const fn compress(mut self, compress: bool) -> Self {
        self.compress = Some(compress);
        self
    }

    /// Fills every unset or zero field from the defaults.
    #[must_use]
    pub fn policy(&self) -> RotationPolicy {
        let defaults = RotationPolicy::default();
        RotationPolicy {
            max_size: self
                .max_size_mb
                .filter(|&mb| mb > 0)
                .map_or(defaults.max_size, |mb| mb.saturating_mul(MEGABYTE)),
            max_backups: self
                .max_backups
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_backups),
            max_age_days: self
                .max_age_days
                .filter(|&d| d > 0)
                .unwrap_or(defaults.max_age_days),
            compress: self.compress.unwrap_or(defaults.compress),
        }
    }
}
