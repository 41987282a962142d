//! Access status attached to a narrowed resource source.

use serde::Serialize;

/// Whether a resource is currently open, and why not if it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessStatus {
    pub is_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AccessStatus {
    #[must_use]
    pub fn open() -> Self {
        Self {
            is_open: true,
            error_message: None,
        }
    }

    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            is_open: false,
            error_message: Some(message.into()),
        }
    }
}

/// A source together with its access status.
///
/// Both halves serialize flattened into one object, e.g.
/// `{"path": "a.csv", "isOpen": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Access<S> {
    #[serde(flatten)]
    pub source: S,
    #[serde(flatten)]
    pub status: AccessStatus,
}

impl<S> Access<S> {
    #[must_use]
    pub fn new(source: S, status: AccessStatus) -> Self {
        Self { source, status }
    }
}
