//! The facade callers hold: configured once, cloned freely, and the starting point of every
//! record chain.

mod record;

pub use record::Record;

use crate::config::{DEFAULT_REQUEST_ID_KEY, LoggerConfig};
use crate::context::RequestContext;
use crate::engine::{Engine, EngineBuilder};
use crate::internal;
use serde::Serialize;
use std::sync::Arc;

/// Cheap to clone: clones share one engine. `Send + Sync`, so a single logger can serve
/// every request handler in a process.
#[derive(Debug, Clone)]
pub struct Logger {
    engine: Arc<Engine>,
    context: RequestContext,
    request_id_key: Arc<str>,
    show_caller: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Terminal and `logger/logger-<date>.log`, debug floor, `request-id` key, caller shown.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    /// Builds the engine `config` describes. An empty `request_id_key` becomes `request-id`.
    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        let engine = Engine::from_config(&config);
        internal::debug(
            "LOGGER",
            &format!(
                "Logger ready: request_id_key={}, show_caller={}",
                config.effective_request_id_key(),
                config.show_caller
            ),
        );
        Self {
            engine: Arc::new(engine),
            context: RequestContext::background(),
            request_id_key: Arc::from(config.effective_request_id_key()),
            show_caller: config.show_caller,
        }
    }

    /// Wraps a hand-assembled engine with the default key and caller attribution on.
    #[must_use]
    pub fn from_engine(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
            context: RequestContext::background(),
            request_id_key: Arc::from(DEFAULT_REQUEST_ID_KEY),
            show_caller: true,
        }
    }

    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Same engine, different correlation field name. Empty means `request-id`.
    #[must_use]
    pub fn with_request_id_key(&self, key: &str) -> Self {
        let key = if key.is_empty() {
            DEFAULT_REQUEST_ID_KEY
        } else {
            key
        };
        Self {
            request_id_key: Arc::from(key),
            ..self.clone()
        }
    }

    /// Same engine, caller attribution switched on or off.
    #[must_use]
    pub fn with_show_caller(&self, show: bool) -> Self {
        Self {
            show_caller: show,
            ..self.clone()
        }
    }

    fn record(&self) -> Record {
        Record::new(
            Arc::clone(&self.engine),
            self.context.clone(),
            Arc::clone(&self.request_id_key),
            self.show_caller,
        )
    }

    /// Starts a chain bound to `ctx`; its correlation id is attached on `send`.
    pub fn with_context(&self, ctx: &RequestContext) -> Record {
        self.record().with_context(ctx)
    }

    pub fn debug(&self, message: impl Into<String>) -> Record {
        self.record().debug(message)
    }

    pub fn info(&self, message: impl Into<String>) -> Record {
        self.record().info(message)
    }

    pub fn warn(&self, message: impl Into<String>) -> Record {
        self.record().warn(message)
    }

    pub fn error(&self, message: impl Into<String>) -> Record {
        self.record().error(message)
    }

    pub fn fatal(&self, message: impl Into<String>) -> Record {
        self.record().fatal(message)
    }

    pub fn panic(&self, message: impl Into<String>) -> Record {
        self.record().panic(message)
    }

    pub fn data(&self, key: impl Into<String>, value: impl Serialize) -> Record {
        self.record().data(key, value)
    }

    pub fn error_data<E>(&self, err: Option<&E>) -> Record
    where
        E: std::error::Error + ?Sized,
    {
        self.record().error_data(err)
    }

    /// Flushes every sink and reports the first failure.
    ///
    /// # Errors
    /// I/O errors from any sink.
    pub fn flush(&self) -> Result<(), crate::Error> {
        self.engine.flush()
    }

    /// Flushes every sink, ignoring failures. Safe to call repeatedly; the logger stays
    /// usable afterwards.
    pub fn shutdown(&self) {
        self.engine.sync();
    }

    #[must_use]
    pub const fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    #[must_use]
    pub const fn context(&self) -> &RequestContext {
        &self.context
    }

    #[must_use]
    pub fn request_id_key(&self) -> &str {
        &self.request_id_key
    }

    #[must_use]
    pub const fn show_caller(&self) -> bool {
        self.show_caller
    }
}
