//! Request-scoped context carrying the correlation id between call layers.
//!
//! A `RequestContext` is an immutable chain of typed values. Deriving a context never
//! touches the parent, so a handler can hand a derived context to one task and keep the
//! original for another. Values are addressed by a key *type* rather than a string, so an
//! unrelated crate can never shadow the request id by picking the same name.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use ulid::Ulid;

/// Private key type for the correlation id. Nothing outside this module can name it.
struct RequestIdKey;

struct Entry {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Entry>>,
}

/// Opaque request-scoped context. Cheap to clone: all clones share the same entries.
#[derive(Clone, Default)]
pub struct RequestContext {
    head: Option<Arc<Entry>>,
}

impl RequestContext {
    /// Empty root context, the equivalent of "no request in flight".
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Derives a context holding `value` under the key type `K`.
    ///
    /// Later bindings of the same key shadow earlier ones; the receiver is unchanged.
    #[must_use]
    pub fn with_value<K: 'static, V: Any + Send + Sync>(&self, value: V) -> Self {
        Self {
            head: Some(Arc::new(Entry {
                key: TypeId::of::<K>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Nearest value bound under `K`, if it exists and has type `V`.
    #[must_use]
    pub fn value<K: 'static, V: Any>(&self) -> Option<&V> {
        let key = TypeId::of::<K>();
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            if entry.key == key {
                return entry.value.downcast_ref::<V>();
            }
            cursor = entry.parent.as_deref();
        }
        None
    }

    /// Derives a context carrying `id` as the correlation id.
    #[must_use]
    pub fn with_request_id(&self, id: impl Into<String>) -> Self {
        self.with_value::<RequestIdKey, String>(id.into())
    }

    /// Derives a context with a freshly generated ULID as correlation id, for entry points
    /// that have no upstream id to propagate.
    #[must_use]
    pub fn with_generated_request_id(&self) -> Self {
        self.with_request_id(Ulid::new().to_string())
    }

    /// The bound correlation id, or an empty string when none is bound.
    #[must_use]
    pub fn request_id(&self) -> String {
        self.value::<RequestIdKey, String>()
            .cloned()
            .unwrap_or_default()
    }

    fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            depth += 1;
            cursor = entry.parent.as_deref();
        }
        depth
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id())
            .field("values", &self.depth())
            .finish()
    }
}

/// Returns a derived context carrying `id` under the private correlation key.
#[must_use]
pub fn bind_request_id(ctx: &RequestContext, id: impl Into<String>) -> RequestContext {
    ctx.with_request_id(id)
}

/// Returns the correlation id bound on `ctx`, or an empty string. Never fails.
#[must_use]
pub fn request_id(ctx: &RequestContext) -> String {
    ctx.request_id()
}
