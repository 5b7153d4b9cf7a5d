//! Stepwise engine assembly. Each built-in sink has a sub-builder for its own options;
//! `done()` hands control back so more sinks can be chained.

use super::{Engine, FatalHook, ProcessExit};
use crate::level::Level;
use crate::output::{FileOutput, Output, RotationPolicy, TerminalOutput};
use std::io::Write;
use std::path::PathBuf;

pub struct EngineBuilder {
    pub(super) min_level: Level,
    pub(super) outputs: Vec<Box<dyn Output>>,
    pub(super) hook: Box<dyn FatalHook>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// Debug floor, no outputs, process-terminating Fatal/Panic.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Level::Debug,
            outputs: Vec::new(),
            hook: Box::new(ProcessExit),
        }
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Replaces what runs after Fatal and Panic records.
    #[must_use]
    pub fn fatal_hook(mut self, hook: impl FatalHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    #[must_use]
    pub fn terminal(self) -> TerminalBuilder {
        TerminalBuilder {
            parent: self,
            writer: None,
        }
    }

    #[must_use]
    pub fn file(self) -> FileBuilder {
        FileBuilder {
            parent: self,
            target: FileTarget::Dir(PathBuf::from(crate::config::DEFAULT_LOG_DIR)),
            policy: RotationPolicy::default(),
        }
    }

    /// Adds any sink, built-in or custom.
    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.outputs.push(Box::new(output));
        self
    }

    #[must_use]
    pub(crate) fn has_outputs(&self) -> bool {
        !self.outputs.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            min_level: self.min_level,
            outputs: self.outputs,
            hook: self.hook,
        }
    }
}

pub struct TerminalBuilder {
    parent: EngineBuilder,
    writer: Option<Box<dyn Write + Send>>,
}

impl TerminalBuilder {
    /// Redirects the terminal sink away from stderr.
    #[must_use]
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    #[must_use]
    pub fn done(self) -> EngineBuilder {
        let output = match self.writer {
            Some(writer) => TerminalOutput::with_writer(writer),
            None => TerminalOutput::new(),
        };
        self.parent.output(output)
    }
}

enum FileTarget {
    Dir(PathBuf),
    Path(PathBuf),
}

pub struct FileBuilder {
    parent: EngineBuilder,
    target: FileTarget,
    policy: RotationPolicy,
}

impl FileBuilder {
    /// Writes `logger-<date>.log` inside `dir`.
    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target = FileTarget::Dir(dir.into());
        self
    }

    /// Writes to an exact file path instead of the dated name.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = FileTarget::Path(path.into());
        self
    }

    #[must_use]
    pub const fn rotation(mut self, policy: RotationPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn done(self) -> EngineBuilder {
        let output = match self.target {
            FileTarget::Dir(dir) => FileOutput::in_dir(dir, self.policy),
            FileTarget::Path(path) => FileOutput::at_path(path, self.policy),
        };
        self.parent.output(output)
    }
}
