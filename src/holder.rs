//! Handle through which callers read loaded translations.

use std::sync::Arc;
use std::sync::atomic::{
    AtomicBool,
    Ordering,
};

use parking_lot::RwLock;

use crate::input::table::EntryTable;
use crate::input::translation::{
    TranslationNode,
    flatten_into,
};

/// Loaded translations for one top-level load request.
///
/// Clones share the same table. The table is filled by the load cascade and
/// read synchronously through [`MessageHolder::get_value`].
#[derive(Debug, Clone, Default)]
pub struct MessageHolder {
    /// Shared with the spawned cascade.
    inner: Arc<HolderInner>,
}

/// State shared between the holder and its load cascade.
#[derive(Debug, Default)]
struct HolderInner {
    /// Flattened translations.
    table: RwLock<EntryTable>,
    /// Set once a resource loaded successfully.
    loaded: AtomicBool,
}

impl MessageHolder {
    /// A holder with an empty table, not yet loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translated text for `key`, or an empty string.
    ///
    /// The key is trimmed and matched case-insensitively. Misses, blank keys
    /// and lookups before loading completes all return `""`.
    #[must_use]
    pub fn get_value(&self, key: &str) -> String {
        if key.trim().is_empty() {
            tracing::warn!("Invalid key name");
            return String::new();
        }

        let table = self.inner.table.read();
        if table.is_empty() {
            tracing::warn!(key, "Translations have not been loaded yet");
            return String::new();
        }

        table.get(key).map(str::to_string).unwrap_or_default()
    }

    /// Whether a resource has been loaded into this holder.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner.loaded.load(Ordering::Acquire)
    }

    /// Number of translations held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.table.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current table.
    #[must_use]
    pub fn snapshot(&self) -> EntryTable {
        self.inner.table.read().clone()
    }

    /// Flattens `node` into the table, keeping existing entries.
    pub(crate) fn absorb(&self, node: &TranslationNode, separator: &str) -> usize {
        let mut table = self.inner.table.write();
        flatten_into(&mut table, None, node, separator)
    }

    /// Records the cascade outcome.
    pub(crate) fn set_loaded(&self, loaded: bool) {
        self.inner.loaded.store(loaded, Ordering::Release);
    }
}
