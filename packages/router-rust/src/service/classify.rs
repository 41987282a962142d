//! Descriptor classification: converts raw tagged JSON into a typed `ResourceDescriptor`.

use serde_json::Value as Json;
use sourcegate_core::{ResourceDescriptor, ResourceKind};

use super::error::RouteError;

/// Field carrying the discriminant on the wire.
pub const KIND_FIELD: &str = "kind";

/// Reads the discriminant of a raw descriptor without narrowing it.
///
/// # Errors
///
/// - `RouteError::MalformedDescriptor` if `raw` is not an object or has no
///   string `kind` field
/// - `RouteError::UnknownVariant` if `kind` names no known resource kind
pub fn classify_kind(raw: &Json) -> Result<ResourceKind, RouteError> {
    let fields = raw
        .as_object()
        .ok_or_else(|| RouteError::MalformedDescriptor {
            reason: format!("expected an object, found {}", json_type(raw)),
        })?;

    let tag = match fields.get(KIND_FIELD) {
        Some(Json::String(tag)) => tag,
        Some(other) => {
            return Err(RouteError::MalformedDescriptor {
                reason: format!("`{KIND_FIELD}` must be a string, found {}", json_type(other)),
            })
        }
        None => {
            return Err(RouteError::MalformedDescriptor {
                reason: format!("missing `{KIND_FIELD}` field"),
            })
        }
    };

    Ok(tag.parse::<ResourceKind>()?)
}

/// Classifies a raw descriptor into a typed, narrowed `ResourceDescriptor`.
///
/// The tag is checked first so an unknown tag is always reported as
/// `UnknownVariant`, regardless of what other fields are present. Only then
/// are the fields validated against the shape the tag names.
///
/// # Errors
///
/// - `RouteError::UnknownVariant` for an unrecognized tag
/// - `RouteError::MalformedDescriptor` for a missing tag, missing or blank
///   fields, or fields belonging to another variant
pub fn classify(raw: Json) -> Result<ResourceDescriptor, RouteError> {
    let kind = classify_kind(&raw)?;
    let descriptor: ResourceDescriptor =
        serde_json::from_value(raw).map_err(|e| RouteError::MalformedDescriptor {
            reason: format!("invalid `{kind}` descriptor: {e}"),
        })?;
    debug_assert_eq!(descriptor.kind(), kind);
    Ok(descriptor)
}

fn json_type(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn classifies_file_descriptor() {
        let desc = classify(json!({ "kind": "file", "path": "some/path/to/file.csv" })).unwrap();
        assert_eq!(
            desc,
            ResourceDescriptor::file("some/path/to/file.csv").unwrap()
        );
    }

    #[test]
    fn classifies_database_descriptor() {
        let desc = classify(json!({ "kind": "db", "connectionUrl": "some-connection-url" })).unwrap();
        assert_eq!(
            desc,
            ResourceDescriptor::database("some-connection-url").unwrap()
        );
    }

    #[test]
    fn unknown_tag_wins_over_field_errors() {
        let err = classify(json!({ "kind": "ftp", "host": "example.org" })).unwrap_err();
        assert_eq!(
            err,
            RouteError::UnknownVariant {
                tag: "ftp".to_string()
            }
        );
    }

    #[test]
    fn missing_tag_is_malformed() {
        let err = classify(json!({ "path": "a.csv" })).unwrap_err();
        assert!(matches!(err, RouteError::MalformedDescriptor { .. }));
    }

    #[test]
    fn non_string_tag_is_malformed() {
        let err = classify(json!({ "kind": 7, "path": "a.csv" })).unwrap_err();
        assert!(matches!(err, RouteError::MalformedDescriptor { reason } if reason.contains("number")));
    }

    #[test]
    fn non_object_is_malformed() {
        let err = classify(json!(["file", "a.csv"])).unwrap_err();
        assert!(matches!(err, RouteError::MalformedDescriptor { .. }));
    }

    #[test]
    fn foreign_fields_are_malformed() {
        let err = classify(json!({ "kind": "db", "connectionUrl": "x", "path": "a.csv" })).unwrap_err();
        assert!(matches!(err, RouteError::MalformedDescriptor { reason } if reason.contains("`db`")));
    }

    #[test]
    fn missing_payload_is_malformed() {
        let err = classify(json!({ "kind": "file" })).unwrap_err();
        assert!(matches!(err, RouteError::MalformedDescriptor { .. }));
    }

    #[test]
    fn classify_kind_does_not_validate_fields() {
        let kind = classify_kind(&json!({ "kind": "file" })).unwrap();
        assert_eq!(kind, ResourceKind::File);
    }
}
