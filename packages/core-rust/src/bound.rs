//! Value bounds for constrained stores.
//!
//! A [`BoundValue`] is a concrete type a store can be fixed to. Statically
//! typed writes need nothing more than the type itself; dynamic writes go
//! through [`BoundValue::from_value`], which hands the rejected value back
//! so callers can report what they actually received.

use crate::types::{Flag, Value};

/// A type that can serve as the value bound of a constrained store.
pub trait BoundValue: Clone + Send + Sync + 'static {
    /// Human-readable name of the accepted value domain.
    const EXPECTED: &'static str;

    /// Converts a dynamic value, returning it unchanged if it does not conform.
    ///
    /// # Errors
    ///
    /// Returns the original `value` when it is outside this bound's domain.
    fn from_value(value: Value) -> Result<Self, Value>;

    /// Widens this value back into a dynamic [`Value`].
    fn into_value(self) -> Value;
}

impl BoundValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl BoundValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(other),
        }
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl BoundValue for f64 {
    const EXPECTED: &'static str = "number";

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(other),
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl BoundValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl BoundValue for Flag {
    const EXPECTED: &'static str = "boolean | number";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(Flag::Bool(b)),
            Value::Int(i) => Ok(Flag::Int(i)),
            Value::Float(f) => Ok(Flag::Float(f)),
            other => Err(other),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Flag::Bool(b) => Value::Bool(b),
            Flag::Int(i) => Value::Int(i),
            Flag::Float(f) => Value::Float(f),
        }
    }
}

/// The unconstrained bound: accepts every value.
impl BoundValue for Value {
    const EXPECTED: &'static str = "any";

    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }

    fn into_value(self) -> Value {
        self
    }
}
