//! The key/value table.

use std::collections::HashMap;

/// Mapping from key to value; the source of truth for the engine.
///
/// The table itself knows nothing about transactions. Undo recording is the
/// job of [`Storage`](crate::Storage), which calls these methods with the
/// prior value already captured.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Table {
    entries: HashMap<String, String>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.entries.insert(key, value)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Counts entries whose value equals `value` exactly.
    ///
    /// There is no index on values, so this scans every entry.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.entries.values().filter(|v| v.as_str() == value).count()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
