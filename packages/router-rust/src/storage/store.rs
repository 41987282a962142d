//! Typed key-value store whose value domain is fixed at construction.

use std::fmt;
use std::sync::Arc;

use sourcegate_core::{BoundValue, Value};
use tracing::debug;

use super::config::StoreConfig;
use super::engine::StorageEngine;
use super::engines::HashMapStorage;

/// Errors returned by [`ConstrainedStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("type mismatch for key `{key}`: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("key not found: {key}")]
    NotFound { key: String },
    #[error("store keys must not be empty")]
    InvalidKey,
    #[error("store is full ({max} entries)")]
    CapacityExceeded { max: usize },
}

/// A string-keyed store bound to a single value type `V`.
///
/// Statically typed writes go through [`set`](Self::set); values arriving as
/// dynamic [`Value`]s go through [`set_value`](Self::set_value), which rejects
/// anything outside `V`'s domain. Every rejected write leaves the store exactly
/// as it was.
///
/// The store is `Send + Sync`; share it as `Arc<ConstrainedStore<V>>`.
pub struct ConstrainedStore<V: BoundValue> {
    engine: Arc<dyn StorageEngine<V>>,
    config: StoreConfig,
}

impl<V: BoundValue> ConstrainedStore<V> {
    /// Creates an empty, unbounded in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty in-memory store with the given limits.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_engine(Arc::new(HashMapStorage::new()), config)
    }

    /// Creates a store over an existing engine.
    #[must_use]
    pub fn with_engine(engine: Arc<dyn StorageEngine<V>>, config: StoreConfig) -> Self {
        Self { engine, config }
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Inserts or overwrites `key`, returning the previous value.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidKey` if `key` is empty
    /// - `StoreError::CapacityExceeded` if `key` is new and the store is full
    pub fn set(&self, key: &str, value: V) -> Result<Option<V>, StoreError> {
        validate_key(key)?;
        let previous = match self.config.max_entries {
            Some(max) => self
                .engine
                .put_bounded(key, value, max)
                .map_err(|_| StoreError::CapacityExceeded { max })?,
            None => self.engine.put(key, value),
        };
        debug!(key, replaced = previous.is_some(), "store write");
        Ok(previous)
    }

    /// Inserts or overwrites `key` with a dynamic value, checking it against `V`.
    ///
    /// # Errors
    ///
    /// - `StoreError::TypeMismatch` if `value` does not conform to `V`
    /// - any error from [`set`](Self::set)
    pub fn set_value(&self, key: &str, value: Value) -> Result<Option<V>, StoreError> {
        validate_key(key)?;
        let value = V::from_value(value).map_err(|rejected| {
            debug!(key, found = rejected.type_name(), expected = V::EXPECTED, "store write rejected");
            StoreError::TypeMismatch {
                key: key.to_string(),
                expected: V::EXPECTED,
                found: rejected.type_name(),
            }
        })?;
        self.set(key, value)
    }

    /// Returns the current value for `key`, or `None` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<V> {
        self.engine.get(key)
    }

    /// Like [`get`](Self::get), but reports absence as an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if `key` is absent.
    pub fn require(&self, key: &str) -> Result<V, StoreError> {
        self.get(key).ok_or_else(|| StoreError::NotFound {
            key: key.to_string(),
        })
    }

    /// Removes `key`. Returns whether it was present.
    pub fn delete(&self, key: &str) -> bool {
        let removed = self.engine.remove(key).is_some();
        if removed {
            debug!(key, "store delete");
        }
        removed
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.engine.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.engine.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    pub fn clear(&self) {
        self.engine.clear();
    }

    /// All keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.snapshot().into_iter().map(|(k, _)| k).collect()
    }

    /// Point-in-time copy of all entries, sorted by key.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, V)> {
        let mut entries = self.engine.snapshot();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl<V: BoundValue> Default for ConstrainedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: BoundValue> fmt::Debug for ConstrainedStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstrainedStore")
            .field("bound", &V::EXPECTED)
            .field("len", &self.len())
            .field("config", &self.config)
            .finish()
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sourcegate_core::Flag;

    use super::*;

    #[test]
    fn flags_accept_booleans_and_numbers() {
        let store = ConstrainedStore::<Flag>::new();
        store.set("id", Flag::Int(5)).unwrap();
        store.set("isOpen", Flag::Bool(true)).unwrap();

        assert_eq!(store.get("id"), Some(Flag::Int(5)));
        assert_eq!(store.get("isOpen"), Some(Flag::Bool(true)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn flags_reject_strings_without_mutating() {
        let store = ConstrainedStore::<Flag>::new();
        store.set("name", Flag::Bool(false)).unwrap();

        let err = store.set_value("name", Value::from("Max")).unwrap_err();
        assert_eq!(
            err,
            StoreError::TypeMismatch {
                key: "name".to_string(),
                expected: "boolean | number",
                found: "string",
            }
        );
        assert_eq!(store.get("name"), Some(Flag::Bool(false)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn number_store_rejects_string() {
        let store = ConstrainedStore::<f64>::new();
        let err = store.set_value("k", Value::from("a string")).unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { found: "string", .. }));
        assert!(store.is_empty());
        assert!(store.get("k").is_none());
    }

    #[test]
    fn set_value_accepts_conforming_values() {
        let store = ConstrainedStore::<Flag>::new();
        assert_eq!(store.set_value("id", Value::Int(5)), Ok(None));
        assert_eq!(
            store.set_value("id", Value::Bool(true)),
            Ok(Some(Flag::Int(5)))
        );
        assert_eq!(store.get("id"), Some(Flag::Bool(true)));
    }

    #[test]
    fn get_missing_key_is_none() {
        let store = ConstrainedStore::<String>::new();
        assert!(store.get("absent").is_none());
        assert_eq!(
            store.require("absent"),
            Err(StoreError::NotFound {
                key: "absent".to_string()
            })
        );
    }

    #[test]
    fn delete_reports_presence() {
        let store = ConstrainedStore::<String>::new();
        store.set("name", "BLA".to_string()).unwrap();

        assert!(!store.delete("other"));
        assert_eq!(store.len(), 1);

        assert!(store.delete("name"));
        assert!(store.get("name").is_none());
        assert!(!store.delete("name"));
    }

    #[test]
    fn empty_key_is_rejected() {
        let store = ConstrainedStore::<bool>::new();
        assert_eq!(store.set("", true), Err(StoreError::InvalidKey));
        assert_eq!(store.set_value("", Value::Bool(true)), Err(StoreError::InvalidKey));
        assert!(store.is_empty());
    }

    #[test]
    fn capacity_limits_new_keys_only() {
        let store = ConstrainedStore::<i64>::with_config(StoreConfig {
            max_entries: Some(2),
        });
        store.set("a", 1).unwrap();
        store.set("b", 2).unwrap();

        assert_eq!(
            store.set("c", 3),
            Err(StoreError::CapacityExceeded { max: 2 })
        );
        assert!(!store.contains_key("c"));

        assert_eq!(store.set("a", 10), Ok(Some(1)));
        assert_eq!(store.snapshot(), vec![("a".to_string(), 10), ("b".to_string(), 2)]);
    }

    #[test]
    fn keys_are_sorted() {
        let store = ConstrainedStore::<bool>::new();
        store.set("zeta", true).unwrap();
        store.set("alpha", false).unwrap();
        store.set("mid", true).unwrap();
        assert_eq!(store.keys(), vec!["alpha", "mid", "zeta"]);

        store.clear();
        assert!(store.keys().is_empty());
    }

    #[test]
    fn shared_across_threads() {
        let store = Arc::new(ConstrainedStore::<i64>::new());
        let handles: Vec<_> = (0..4_i64)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        store.set(&format!("{t}-{i}"), i).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 100);
    }

    proptest! {
        #[test]
        fn round_trip_for_conforming_values(key in "[a-z]{1,8}", n in any::<i64>(), b in any::<bool>()) {
            let ints = ConstrainedStore::<i64>::new();
            ints.set(&key, n).unwrap();
            prop_assert_eq!(ints.get(&key), Some(n));

            let flags = ConstrainedStore::<Flag>::new();
            flags.set(&key, Flag::Bool(b)).unwrap();
            prop_assert_eq!(flags.get(&key), Some(Flag::Bool(b)));
        }

        #[test]
        fn rejected_writes_leave_store_unchanged(key in "[a-z]{1,8}", n in any::<i64>(), s in ".*") {
            let store = ConstrainedStore::<i64>::new();
            store.set(&key, n).unwrap();
            let before = store.snapshot();

            prop_assert!(store.set_value(&key, Value::String(s)).is_err());
            prop_assert_eq!(store.snapshot(), before);
        }
    }
}
