use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Dynamic value used at untyped boundaries (CLI input, record merging,
/// runtime-checked store writes).
///
/// Serializes as plain JSON. Integers that fit in `i64` deserialize to
/// [`Value::Int`]; all other numbers become [`Value::Float`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// JSON null.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON integer (signed 64-bit).
    Int(i64),
    /// JSON floating-point (64-bit IEEE 754).
    Float(f64),
    /// JSON string (UTF-8).
    String(String),
    /// JSON array.
    Array(Vec<Value>),
    /// JSON object. `BTreeMap` keeps field order deterministic.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Short name of the variant, used in type mismatch reports.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "object",
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

/// A flag or setting: either a boolean or a number, never anything else.
///
/// Integers and floats stay distinct so `5` comes back as `5`, not `5.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag::Bool(value)
    }
}

impl From<i64> for Flag {
    fn from(value: i64) -> Self {
        Flag::Int(value)
    }
}

impl From<f64> for Flag {
    fn from(value: f64) -> Self {
        Flag::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_integers_stay_integers() {
        let v = Value::from(serde_json::json!(5));
        assert_eq!(v, Value::Int(5));
        let v = Value::from(serde_json::json!(32.2));
        assert_eq!(v, Value::Float(32.2));
    }

    #[test]
    fn json_objects_become_sorted_maps() {
        let v = Value::from(serde_json::json!({ "b": true, "a": "x" }));
        let Value::Map(fields) = v else {
            panic!("expected map");
        };
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(fields["b"], Value::Bool(true));
    }

    #[test]
    fn untagged_round_trip_through_json() {
        let v: Value = serde_json::from_str(r#"{"id":5,"isOpen":true,"tags":["a"]}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"id":5,"isOpen":true,"tags":["a"]}"#
        );
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::Map(BTreeMap::new()).type_name(), "object");
    }

    #[test]
    fn flag_deserializes_bool_or_number() {
        let f: Flag = serde_json::from_str("true").unwrap();
        assert_eq!(f, Flag::Bool(true));
        let f: Flag = serde_json::from_str("5").unwrap();
        assert_eq!(f, Flag::Int(5));
        let f: Flag = serde_json::from_str("2.5").unwrap();
        assert_eq!(f, Flag::Float(2.5));
        assert!(serde_json::from_str::<Flag>(r#""Max""#).is_err());
    }

    #[test]
    fn flag_integers_serialize_without_fraction() {
        assert_eq!(serde_json::to_string(&Flag::Int(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&Flag::Float(5.5)).unwrap(), "5.5");
    }
}
