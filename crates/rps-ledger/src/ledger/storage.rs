//! Keyed contract storage.

use std::collections::HashMap;
use std::hash::Hash;

/// Committed key-value state of a contract
///
/// Calls never hold a copy of it: they read through their own pending
/// writes, and the ledger applies those writes only when the call succeeds.
#[derive(Debug)]
pub struct Storage<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for Storage<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> Storage<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Land the writes of a successful call
    pub(crate) fn apply(&mut self, writes: HashMap<K, V>) {
        self.entries.extend(writes);
    }
}
