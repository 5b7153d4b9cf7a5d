//! Sinks. Terminal and rotating file are built in; the `Output` trait lets callers add their
//! own (tests use it to capture records) without touching the engine.

mod encode;
mod file;
mod rotation;
mod terminal;

pub use file::{FileOutput, log_file_name};
pub use rotation::{MEGABYTE, RotationPolicy};
pub use terminal::TerminalOutput;

use crate::level::Level;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::panic::Location;

/// One structured field. Keys are not deduplicated; order is emission order.
pub type Field = (String, Value);

/// Everything a sink needs to render one record, borrowed from the caller's builder.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub level: Level,
    /// Captured once per record so every sink prints the same instant.
    pub timestamp: DateTime<Local>,
    /// Call site of `send`, present when caller attribution is on.
    pub caller: Option<&'static Location<'static>>,
    pub message: &'a str,
    /// Correlation field first (when bound), then user fields in call order.
    pub fields: &'a [Field],
}

/// `Send + Sync` so one engine can be shared across threads; implementations do their own
/// locking around the underlying writer.
pub trait Output: Send + Sync {
    /// Writes one record as a single line.
    ///
    /// # Errors
    /// Encoding or I/O errors from the underlying sink.
    fn write(&self, record: &LogRecord<'_>) -> Result<(), crate::Error>;

    /// Pushes buffered bytes to the underlying device.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error>;
}
