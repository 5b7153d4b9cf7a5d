//! Unified error type for all reqlog operations.
//!
//! The facade itself never surfaces these to callers of `send`: sinks return them to the
//! engine, which drops them during fan-out. They matter for direct users of `Output`,
//! `FileOutput`, `Logger::flush` and config loading.

/// Error type for reqlog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Encoding/serialization error.
    Format(String),
    /// Invalid path.
    InvalidPath(String),
    /// The rotating writer could not be built.
    Rotation(String),
    /// A single write is larger than the rotation size limit.
    RotationOverflow {
        /// Bytes in the rejected write.
        len: u64,
        /// Configured maximum file size in bytes.
        max: u64,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::Format(s) => write!(f, "format error: {s}"),
            Self::InvalidPath(s) => write!(f, "invalid path: {s}"),
            Self::Rotation(s) => write!(f, "rotation error: {s}"),
            Self::RotationOverflow { len, max } => {
                write!(f, "write length {len} exceeds maximum file size {max}")
            }
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
        Self::Format(e.to_string())
    }
}
