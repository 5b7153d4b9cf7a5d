//! Severity levels that gate which records reach the sinks.

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so the engine can compare a record's level against the configured floor.
///
/// Only the first four variants are valid floors. `Fatal` and `Panic` sort above every floor,
/// so they are never filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Development-time diagnostics. The default floor, so nothing is hidden unless asked.
    #[default]
    Debug = 0,
    /// Normal operational milestones: request started, config loaded.
    Info = 1,
    /// Non-fatal anomalies that may need attention.
    Warn = 2,
    /// Failures that prevent the current operation from completing.
    Error = 3,
    /// Emits, flushes, then terminates the process.
    Fatal = 4,
    /// Emits, flushes, then panics.
    Panic = 5,
}

impl Level {
    /// Lowercase because config files use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }

    /// Encoded form of the `level` field.
    #[must_use]
    pub const fn as_capital(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Panic => "PANIC",
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Fatal,
            Self::Panic,
        ]
    }

    /// Lenient floor parsing: only debug/info/warn/error are floors, anything else
    /// (including "fatal" and garbage) means the most permissive floor.
    #[must_use]
    pub fn parse_floor(s: &str) -> Self {
        match s.parse() {
            Ok(level @ (Self::Debug | Self::Info | Self::Warn | Self::Error)) => level,
            _ => Self::Debug,
        }
    }

    /// Levels that transfer control after emission.
    #[must_use]
    pub const fn escalation(self) -> Escalation {
        match self {
            Self::Fatal => Escalation::Exit,
            Self::Panic => Escalation::Panic,
            Self::Debug | Self::Info | Self::Warn | Self::Error => Escalation::None,
        }
    }
}

/// What happens after a record has been written. Kept separate from emission so the engine
/// can flush before handing control to its `FatalHook`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Ordinary record, control returns to the caller.
    None,
    /// Fatal record, the process terminates.
    Exit,
    /// Panic record, a panic is raised.
    Panic,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "panic" => Ok(Self::Panic),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
