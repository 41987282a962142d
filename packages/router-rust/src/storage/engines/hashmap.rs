//! In-memory [`StorageEngine`] implementation backed by [`DashMap`].
//!
//! Provides concurrent read/write access without external locking.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::storage::engine::StorageEngine;

/// In-memory storage backed by [`DashMap`].
///
/// Writers lock a single shard, so operations on different keys rarely
/// contend. The entry count is tracked separately so that bounded inserts can
/// check capacity while holding only their own shard lock.
pub struct HashMapStorage<V> {
    entries: DashMap<String, V>,
    count: AtomicUsize,
}

impl<V> HashMapStorage<V> {
    /// Creates a new, empty `HashMapStorage`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            count: AtomicUsize::new(0),
        }
    }
}

impl<V> Default for HashMapStorage<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync + 'static> StorageEngine<V> for HashMapStorage<V> {
    fn put(&self, key: &str, value: V) -> Option<V> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut slot) => Some(slot.insert(value)),
            Entry::Vacant(slot) => {
                self.count.fetch_add(1, Ordering::AcqRel);
                slot.insert(value);
                None
            }
        }
    }

    fn put_bounded(&self, key: &str, value: V, max_entries: usize) -> Result<Option<V>, V> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut slot) => Ok(Some(slot.insert(value))),
            Entry::Vacant(slot) => {
                let reserved = self
                    .count
                    .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                        (n < max_entries).then_some(n + 1)
                    });
                if reserved.is_err() {
                    return Err(value);
                }
                slot.insert(value);
                Ok(None)
            }
        }
    }

    fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|v| v.clone())
    }

    fn remove(&self, key: &str) -> Option<V> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(slot) => {
                // Released while the shard lock is still held.
                self.count.fetch_sub(1, Ordering::AcqRel);
                Some(slot.remove())
            }
            Entry::Vacant(_) => None,
        }
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn len(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self) {
        self.entries.retain(|_, _| {
            self.count.fetch_sub(1, Ordering::AcqRel);
            false
        });
    }

    fn snapshot(&self) -> Vec<(String, V)> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
