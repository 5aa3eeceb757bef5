//! Draft persistence behind an injected key/value interface.
//!
//! The aggregator never reaches for ambient storage; it is handed a
//! [`DraftStore`] instead. Three implementations are provided:
//!
//! - [`MemoryDraftStore`]: process-local map, used by tests and as the
//!   degraded mode of [`FallbackStore`]
//! - [`SqliteDraftStore`]: session-scoped rows in a SQLite file
//! - [`FallbackStore`]: wraps another store and silently switches to memory
//!   after the first storage failure

use crate::error::Result;

mod fallback;
mod memory;
mod sqlite;

pub use fallback::FallbackStore;
pub use memory::MemoryDraftStore;
pub use sqlite::SqliteDraftStore;

/// Key under which the in-progress manufacturing draft is stored.
pub const CURRENT_DRAFT_KEY: &str = "manufacturing_draft";

/// Key/value storage for JSON draft blobs, scoped to one session.
///
/// There is no versioning: concurrent writers to the same key follow
/// last-writer-wins.
pub trait DraftStore: Send + Sync {
    /// Returns the stored value, or `None` when nothing was saved.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value`, replacing any previous value for `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value for `key`. Removing a missing key is not an error.
    fn clear(&self, key: &str) -> Result<()>;
}

impl<S: DraftStore + ?Sized> DraftStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn clear(&self, key: &str) -> Result<()> {
        (**self).clear(key)
    }
}
