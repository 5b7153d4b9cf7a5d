//! The leveled engine behind the facade: a severity floor, a set of outputs every record
//! fans out to, and the hook that takes over after Fatal and Panic records.

mod builder;
mod from_config;
mod hook;

pub use builder::{EngineBuilder, FileBuilder, TerminalBuilder};
pub use from_config::build_engine;
pub use hook::{FatalHook, ProcessExit};

use crate::level::{Escalation, Level};
use crate::output::{Field, LogRecord, Output};
use chrono::Local;
use std::fmt;
use std::panic::Location;

/// Immutable after build, so one engine can be shared by every clone of a `Logger`.
pub struct Engine {
    min_level: Level,
    outputs: Vec<Box<dyn Output>>,
    hook: Box<dyn FatalHook>,
}

impl Engine {
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Whether a record at `level` passes the floor. Fatal and Panic always do.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    /// Message-only emission.
    pub fn log(&self, level: Level, message: &str, caller: Option<&'static Location<'static>>) {
        let escalation = self.emit(level, message, &[], caller);
        self.escalate(escalation, message);
    }

    /// Emission with ordered structured fields.
    pub fn log_fields(
        &self,
        level: Level,
        message: &str,
        fields: &[Field],
        caller: Option<&'static Location<'static>>,
    ) {
        let escalation = self.emit(level, message, fields, caller);
        self.escalate(escalation, message);
    }

    /// Writes the record to every output and reports what should happen next, without doing
    /// it. Records below the floor never reach an output.
    pub fn emit(
        &self,
        level: Level,
        message: &str,
        fields: &[Field],
        caller: Option<&'static Location<'static>>,
    ) -> Escalation {
        if self.enabled(level) {
            let record = LogRecord {
                level,
                timestamp: Local::now(),
                caller,
                message,
                fields,
            };

            for output in &self.outputs {
                let _ = output.write(&record);
            }
        }

        level.escalation()
    }

    /// Flushes, then hands Fatal and Panic to the hook. `Escalation::None` is a no-op.
    pub fn escalate(&self, escalation: Escalation, message: &str) {
        match escalation {
            Escalation::None => {}
            Escalation::Exit => {
                self.sync();
                self.hook.fatal(message);
            }
            Escalation::Panic => {
                self.sync();
                self.hook.panic(message);
            }
        }
    }

    /// Flushes every output, even after a failure.
    ///
    /// # Errors
    /// Returns the first error encountered.
    pub fn flush(&self) -> Result<(), crate::Error> {
        let mut first_error = None;
        for output in &self.outputs {
            if let Err(e) = output.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Best-effort flush. Sync failures on terminals are routine and not worth surfacing.
    pub fn sync(&self) {
        let _ = self.flush();
    }

    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("min_level", &self.min_level)
            .field("outputs", &self.outputs.len())
            .finish_non_exhaustive()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.sync();
    }
}
