//! What happens after a Fatal or Panic record has been written and flushed.

/// Receives control after a Fatal or Panic record has been flushed to every sink.
///
/// The default, `ProcessExit`, terminates or panics. Tests install their own hook to observe
/// escalation without losing the test process.
pub trait FatalHook: Send + Sync {
    /// Called after a Fatal record. Expected not to return in production.
    fn fatal(&self, message: &str);

    /// Called after a Panic record.
    fn panic(&self, message: &str);
}

/// Exit status 1 on Fatal, `panic!` with the record message on Panic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl FatalHook for ProcessExit {
    fn fatal(&self, _message: &str) {
        std::process::exit(1);
    }

    fn panic(&self, message: &str) {
        panic!("{message}");
    }
}
