//! Terminal sink. Every record goes to stderr (or an injected writer) behind one mutex, so
//! concurrent records never interleave inside a line.

use super::{LogRecord, Output};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Lock-guarded single-writer sink.
pub struct TerminalOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TerminalOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalOutput").finish_non_exhaustive()
    }
}

impl TerminalOutput {
    /// Writes to stderr so log lines never mix with a program's stdout data.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Same framing and locking over any writer; used to capture terminal output in tests.
    #[must_use]
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl Output for TerminalOutput {
    fn write(&self, record: &LogRecord<'_>) -> Result<(), crate::Error> {
        let mut line = record.to_json_line()?;
        line.push('\n');

        // A poisoned lock still guards a usable writer
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.flush()?;
        Ok(())
    }
}
