//! reqlog's own diagnostics: directory fallbacks, rotation, config loading.
//!
//! Quiet until [`init`] is called. Uses `OnceLock` so the diagnostic engine is built exactly
//! once even if several threads race to enable it.

use crate::engine::Engine;
use crate::level::Level;
use crate::output::{Output, TerminalOutput};
use serde_json::Value;
use std::sync::OnceLock;

static INTERNAL_ENGINE: OnceLock<Engine> = OnceLock::new();

/// Sends diagnostics at or above `level` to stderr. Only the first call takes effect.
pub fn init(level: Level) {
    init_with(level, TerminalOutput::new());
}

/// Like [`init`], with diagnostics going to `output` instead of stderr.
pub fn init_with(level: Level, output: impl Output + 'static) {
    let was_init = INTERNAL_ENGINE.get().is_some();
    INTERNAL_ENGINE.get_or_init(|| Engine::builder().level(level).output(output).build());
    if !was_init {
        debug("INTERNAL", "Internal diagnostics enabled");
    }
}

#[must_use]
pub fn enabled() -> bool {
    INTERNAL_ENGINE.get().is_some()
}

/// Pre-init calls silently vanish rather than failing.
fn log(level: Level, scope: &str, msg: &str) {
    if let Some(engine) = INTERNAL_ENGINE.get() {
        let fields = [("scope".to_string(), Value::String(scope.to_string()))];
        engine.log_fields(level, msg, &fields, None);
    }
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

/// Recovered problems: directory fallback, failed age pruning.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}
