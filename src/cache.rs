//! Process-lifetime memoization for fetch/derive operations.
//!
//! A [`Memo`] remembers successful results by argument key. Failures are not
//! stored, so a later call with the same arguments tries again. There is no
//! eviction and no TTL.

use ahash::AHashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entries: AHashMap<K, V>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entries: AHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: Eq + Hash, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, or the result of `compute` (stored only when `Ok`).
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(v) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(v.clone());
        }
        self.misses += 1;
        let v = compute()?;
        self.entries.insert(key, v.clone());
        Ok(v)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
