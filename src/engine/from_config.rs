//! Engine construction from a `LoggerConfig`.

use super::{Engine, EngineBuilder};
use crate::config::LoggerConfig;
use crate::internal;

/// Builds the engine a `LoggerConfig` describes: normalized output mode, severity floor,
/// terminal and/or rotating file sink.
#[must_use]
pub fn build_engine(config: &LoggerConfig) -> Engine {
    Engine::from_config(config)
}

impl Engine {
    /// See [`build_engine`].
    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        let mode = config.parse_output_mode();
        let level = config.parse_level();
        internal::debug(
            "ENGINE",
            &format!("Building engine: mode={mode}, level={level}"),
        );

        let mut builder = EngineBuilder::new().level(level);

        if mode.writes_terminal() {
            builder = builder.terminal().done();
        }

        if mode.writes_file() {
            let policy = config.rotation_policy();
            internal::debug(
                "ENGINE",
                &format!(
                    "Rotation: max_size={}B, max_backups={}, max_age_days={}, compress={}",
                    policy.max_size, policy.max_backups, policy.max_age_days, policy.compress
                ),
            );
            builder = builder
                .file()
                .dir(config.resolved_log_dir())
                .rotation(policy)
                .done();
        }

        // An engine always has at least one sink
        if !builder.has_outputs() {
            internal::warn("ENGINE", "No outputs configured, falling back to terminal");
            builder = builder.terminal().done();
        }

        builder.build()
    }
}
