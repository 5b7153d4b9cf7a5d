//! The chained value behind every `Logger` call.
//!
//! Every method borrows the receiver and returns a new `Record` with its own copy of the
//! field list. Two continuations of the same intermediate record therefore never see each
//! other's fields:
//!
//! ```
//! use reqlog::{Engine, Logger};
//!
//! let logger = Logger::from_engine(Engine::builder().build());
//! let base = logger.info("checkout").data("cart", 7);
//! let paid = base.data("paid", true);
//! let failed = base.data("paid", false);
//!
//! assert_eq!(base.fields().len(), 1);
//! assert_eq!(paid.fields()[1].1, true);
//! assert_eq!(failed.fields()[1].1, false);
//! ```

use crate::context::RequestContext;
use crate::engine::Engine;
use crate::level::Level;
use crate::output::Field;
use serde::Serialize;
use serde_json::Value;
use std::panic::Location;
use std::sync::Arc;

/// Immutable log record under construction. Nothing is written until [`Record::send`].
#[derive(Debug, Clone)]
#[must_use = "a record is only written by `send`"]
pub struct Record {
    engine: Arc<Engine>,
    context: RequestContext,
    request_id_key: Arc<str>,
    show_caller: bool,
    level: Option<Level>,
    message: String,
    fields: Vec<Field>,
    has_fields: bool,
}

impl Record {
    pub(super) fn new(
        engine: Arc<Engine>,
        context: RequestContext,
        request_id_key: Arc<str>,
        show_caller: bool,
    ) -> Self {
        Self {
            engine,
            context,
            request_id_key,
            show_caller,
            level: None,
            message: String::new(),
            fields: Vec::new(),
            has_fields: false,
        }
    }

    fn leveled(&self, level: Level, message: impl Into<String>) -> Self {
        Self {
            level: Some(level),
            message: message.into(),
            ..self.clone()
        }
    }

    pub fn debug(&self, message: impl Into<String>) -> Self {
        self.leveled(Level::Debug, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Self {
        self.leveled(Level::Info, message)
    }

    pub fn warn(&self, message: impl Into<String>) -> Self {
        self.leveled(Level::Warn, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Self {
        self.leveled(Level::Error, message)
    }

    /// Once sent, the record is flushed and the process exits.
    pub fn fatal(&self, message: impl Into<String>) -> Self {
        self.leveled(Level::Fatal, message)
    }

    /// Once sent, the record is flushed and a panic is raised with `message`.
    pub fn panic(&self, message: impl Into<String>) -> Self {
        self.leveled(Level::Panic, message)
    }

    /// Appends one field. Keys are neither validated nor deduplicated.
    ///
    /// A value that fails to serialize is recorded as `<key>Error` holding the error text.
    pub fn data(&self, key: impl Into<String>, value: impl Serialize) -> Self {
        let key = key.into();
        let field = match serde_json::to_value(value) {
            Ok(value) => (key, value),
            Err(e) => (format!("{key}Error"), Value::String(e.to_string())),
        };

        let mut next = self.clone();
        next.fields.push(field);
        next.has_fields = true;
        next
    }

    /// Appends `("error", err.to_string())`. `None` returns the record unchanged, so
    /// `.error_data(result.as_ref().err())` can be chained unconditionally.
    pub fn error_data<E>(&self, err: Option<&E>) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        match err {
            Some(err) => self.data("error", err.to_string()),
            None => self.clone(),
        }
    }

    /// Binds `ctx` and starts over: level, message and fields are cleared, while the engine,
    /// correlation key and caller flag carry over. Call it first in a chain.
    pub fn with_context(&self, ctx: &RequestContext) -> Self {
        Self::new(
            Arc::clone(&self.engine),
            ctx.clone(),
            Arc::clone(&self.request_id_key),
            self.show_caller,
        )
    }

    /// Emits the record. The correlation id, when bound, is the first field. A record without
    /// a level emits nothing. Each call emits again; there is no "already sent" state.
    ///
    /// Fatal records terminate the process and Panic records panic, after flushing.
    #[track_caller]
    pub fn send(&self) {
        let Some(level) = self.level else {
            return;
        };

        let caller = if self.show_caller {
            Some(Location::caller())
        } else {
            None
        };

        let request_id = self.context.request_id();
        if request_id.is_empty() && self.fields.is_empty() {
            self.engine.log(level, &self.message, caller);
            return;
        }

        let mut fields = Vec::with_capacity(self.fields.len() + 1);
        if !request_id.is_empty() {
            fields.push((self.request_id_key.to_string(), Value::String(request_id)));
        }
        fields.extend(self.fields.iter().cloned());
        self.engine.log_fields(level, &self.message, &fields, caller);
    }

    /// `None` until a level method has been called.
    #[must_use]
    pub const fn level(&self) -> Option<Level> {
        self.level
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// User fields in call order, without the correlation field.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub const fn has_fields(&self) -> bool {
        self.has_fields
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

    #[must_use]
    pub const fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }
}
