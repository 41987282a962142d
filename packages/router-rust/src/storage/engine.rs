//! Low-level storage engine trait.
//!
//! Defines [`StorageEngine`], the innermost storage layer beneath
//! [`ConstrainedStore`](super::ConstrainedStore). Engines store already
//! validated values; type and key checks happen in the store.

/// Low-level typed key-value storage.
///
/// Implementations are in-memory. All operations are synchronous and each one
/// is atomic with respect to the key it touches.
///
/// Wrapped in `Arc<dyn StorageEngine<V>>` for sharing across threads.
pub trait StorageEngine<V>: Send + Sync + 'static {
    /// Insert or replace a value by key. Returns the previous value if any.
    fn put(&self, key: &str, value: V) -> Option<V>;

    /// Insert or replace a value, refusing to grow beyond `max_entries` keys.
    ///
    /// Replacing an existing key always succeeds.
    ///
    /// # Errors
    ///
    /// Hands `value` back if `key` is new and the engine already holds
    /// `max_entries` keys.
    fn put_bounded(&self, key: &str, value: V, max_entries: usize) -> Result<Option<V>, V>;

    /// Retrieve a value by key, or `None` if not present.
    fn get(&self, key: &str) -> Option<V>;

    /// Remove a value by key, returning the removed value.
    fn remove(&self, key: &str) -> Option<V>;

    /// Check if a key exists without returning the value.
    fn contains_key(&self, key: &str) -> bool;

    /// Return the number of entries.
    fn len(&self) -> usize;

    /// Check if the storage is empty.
    fn is_empty(&self) -> bool;

    /// Clear all entries. Takes `&self` for `Arc<dyn StorageEngine>` compatibility.
    fn clear(&self);

    /// Return a point-in-time copy of all entries, in no particular order.
    fn snapshot(&self) -> Vec<(String, V)>;
}
