//! Logger configuration: the value object a `Logger` is built from, plus TOML loading.
//!
//! Mode and level are stored as strings so a TOML file reads naturally; the `parse_*`
//! methods turn them into typed values and apply the lenient fallbacks.

mod structs;

pub use structs::{OutputMode, RotationConfig};

use crate::internal;
use crate::level::Level;
use crate::output::RotationPolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Field name for the correlation id when the config leaves it empty.
pub const DEFAULT_REQUEST_ID_KEY: &str = "request-id";

/// Directory for the rotating file when nothing else is configured.
pub const DEFAULT_LOG_DIR: &str = "logger";

/// Immutable once handed to a logger. `Default` is the `Logger::new()` setup: both sinks,
/// debug floor, `logger/` directory, `request-id` key, caller shown.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// `terminal`, `file` or `both`. Anything else means terminal.
    pub output_mode: String,
    /// `debug`, `info`, `warn` or `error`. Anything else means debug.
    pub log_level: String,
    /// Directory for the rotating file sink. `~` is expanded.
    pub log_dir: String,
    /// Field name for the correlation id. Empty means `request-id`.
    pub request_id_key: String,
    /// Attach `file:line` of the `send` call site to each record.
    pub show_caller: bool,
    /// Rotation overrides. `None` uses the defaults for every field.
    pub rotation: Option<RotationConfig>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            output_mode: OutputMode::Both.as_str().to_string(),
            log_level: Level::Debug.as_str().to_string(),
            log_dir: DEFAULT_LOG_DIR.to_string(),
            request_id_key: DEFAULT_REQUEST_ID_KEY.to_string(),
            show_caller: true,
            rotation: None,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns `Error::ConfigParse` on TOML syntax or type errors.
    pub fn from_toml_str(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// Reads a TOML file. A missing file is not an error and yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug(
                "CONFIG",
                &format!("Config file {} not found, using defaults", path.display()),
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        internal::debug("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    #[must_use]
    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode.as_str().to_string();
        self
    }

    #[must_use]
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = level.as_str().to_string();
        self
    }

    #[must_use]
    pub fn log_dir(mut self, dir: impl Into<String>) -> Self {
        self.log_dir = dir.into();
        self
    }

    #[must_use]
    pub fn request_id_key(mut self, key: impl Into<String>) -> Self {
        self.request_id_key = key.into();
        self
    }

    #[must_use]
    pub const fn show_caller(mut self, show: bool) -> Self {
        self.show_caller = show;
        self
    }

    #[must_use]
    pub const fn rotation(mut self, rotation: RotationConfig) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn parse_output_mode(&self) -> OutputMode {
        OutputMode::parse(&self.output_mode)
    }

    #[must_use]
    pub fn parse_level(&self) -> Level {
        Level::parse_floor(&self.log_level)
    }

    /// The correlation field name with the empty-string default applied.
    #[must_use]
    pub fn effective_request_id_key(&self) -> &str {
        if self.request_id_key.is_empty() {
            DEFAULT_REQUEST_ID_KEY
        } else {
            &self.request_id_key
        }
    }

    /// Config values use `~` for portability; the OS needs a real path.
    #[must_use]
    pub fn resolved_log_dir(&self) -> PathBuf {
        let dir = if self.log_dir.trim().is_empty() {
            "."
        } else {
            self.log_dir.as_str()
        };
        PathBuf::from(shellexpand::tilde(dir).as_ref())
    }

    #[must_use]
    pub fn rotation_policy(&self) -> RotationPolicy {
        self.rotation
            .as_ref()
            .map_or_else(RotationPolicy::default, RotationConfig::policy)
    }
}
