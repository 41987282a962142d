//! Constrained merge utilities.
//!
//! [`merge`] and [`pair`] only exercise type-parameter constraints. The
//! interesting one is [`merge_objects`]: a shallow field union of two
//! record-shaped values where the second argument wins on key collisions.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::Value;

/// Errors from converting arbitrary data into a mergeable record.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("expected a record, found {found}")]
    NotARecord { found: &'static str },
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Pairs two values of the same type.
#[must_use]
pub fn merge<T>(a: T, b: T) -> (T, T) {
    (a, b)
}

/// Pairs two values of independent types.
#[must_use]
pub fn pair<T, U>(a: T, b: U) -> (T, U) {
    (a, b)
}

/// Record-shaped values that can be spread into a [`CombinedRecord`].
///
/// Implemented only for keyed collections, so scalars never type-check
/// as merge inputs.
pub trait Combinable {
    /// Consumes `self`, yielding its top-level fields.
    fn into_fields(self) -> BTreeMap<String, Value>;
}

/// The result of [`merge_objects`]: an ordered set of named fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinedRecord(BTreeMap<String, Value>);

impl CombinedRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Converts any serializable record (struct or map) into a `CombinedRecord`.
    ///
    /// # Errors
    ///
    /// Returns `MergeError::NotARecord` if `value` does not serialize to a JSON
    /// object, or `MergeError::Serialize` if serialization itself fails.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, MergeError> {
        match Value::from(serde_json::to_value(value)?) {
            Value::Map(fields) => Ok(Self(fields)),
            other => {
                debug!(found = other.type_name(), "value is not a record");
                Err(MergeError::NotARecord {
                    found: other.type_name(),
                })
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl Combinable for CombinedRecord {
    fn into_fields(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl Combinable for BTreeMap<String, Value> {
    fn into_fields(self) -> BTreeMap<String, Value> {
        self
    }
}

impl<S: std::hash::BuildHasher> Combinable for HashMap<String, Value, S> {
    fn into_fields(self) -> BTreeMap<String, Value> {
        self.into_iter().collect()
    }
}

impl Combinable for serde_json::Map<String, serde_json::Value> {
    fn into_fields(self) -> BTreeMap<String, Value> {
        self.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
    }
}

/// Shallow union of two records. On key collision `b`'s field wins.
#[must_use]
pub fn merge_objects<T: Combinable, U: Combinable>(a: T, b: U) -> CombinedRecord {
    let mut fields = a.into_fields();
    fields.extend(b.into_fields());
    CombinedRecord(fields)
}
