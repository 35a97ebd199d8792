//! Flat translation lookup table.

use std::collections::HashMap;

/// Flat map from normalized key to translated text.
///
/// Keys are stored lower-cased, whitespace included; lookups trim first. Insertion never replaces a
/// non-empty value, so the earliest resource loaded in a cascade wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryTable {
    /// Lowercased key to translated text.
    entries: HashMap<String, String>,
}

impl EntryTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key` unless a non-empty value is already present.
    ///
    /// Returns the number of entries written (`1` or `0`).
    pub fn insert(&mut self, key: &str, value: &str) -> usize {
        let key = key.to_lowercase();
        match self.entries.get(&key) {
            Some(existing) if !existing.is_empty() => 0,
            _ => {
                self.entries.insert(key, value.to_string());
                1
            }
        }
    }

    /// Looks up a key case-insensitively, ignoring surrounding whitespace.
    ///
    /// Empty stored values are reported as missing.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.trim().to_lowercase())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
