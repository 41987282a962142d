//! Resource descriptors: the tagged shapes a router discriminates on.
//!
//! A [`ResourceDescriptor`] is a closed sum type. The `kind` tag on the wire
//! (`"file"` or `"db"`) selects exactly one payload shape, and each payload
//! rejects fields that belong to another shape.
//!
//! # Wire format
//!
//! ```json
//! { "kind": "file", "path": "some/path/to/file.csv" }
//! { "kind": "db", "connectionUrl": "postgres://localhost/app" }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::frozen::FrozenList;

/// Errors raised while constructing descriptors or parsing tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("unknown resource variant: {tag}")]
    UnknownVariant { tag: String },
    #[error("malformed descriptor: {reason}")]
    Malformed { reason: String },
}

// ---------------------------------------------------------------------------
// NonEmptyString
// ---------------------------------------------------------------------------

/// A string that is guaranteed to contain at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Validates and wraps `value`.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::Malformed` if `value` is empty or only whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, DescriptorError> {
        let value = value.into();
        if value.trim().is_empty() {
            debug!(len = value.len(), "rejected blank descriptor field");
            return Err(DescriptorError::Malformed {
                reason: "expected a non-empty string".to_string(),
            });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// ResourceKind
// ---------------------------------------------------------------------------

/// Discriminant for [`ResourceDescriptor`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// File-backed resource, tag `"file"`.
    #[serde(rename = "file")]
    File,
    /// Database-backed resource, tag `"db"`.
    #[serde(rename = "db")]
    Database,
}

impl ResourceKind {
    /// Every kind a descriptor can carry.
    pub const ALL: [ResourceKind; 2] = [ResourceKind::File, ResourceKind::Database];

    /// The wire tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::File => "file",
            ResourceKind::Database => "db",
        }
    }

    /// Read-only list of all known wire tags.
    #[must_use]
    pub fn tags() -> FrozenList<&'static str> {
        Self::ALL.iter().map(|kind| kind.as_str()).collect()
    }
}

impl FromStr for ResourceKind {
    type Err = DescriptorError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| DescriptorError::UnknownVariant {
                tag: tag.to_string(),
            })
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Narrowed payloads
// ---------------------------------------------------------------------------

/// Payload of a `"file"` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSource {
    pub path: NonEmptyString,
}

impl FileSource {
    /// # Errors
    ///
    /// Returns `DescriptorError::Malformed` if `path` is blank.
    pub fn new(path: impl Into<String>) -> Result<Self, DescriptorError> {
        Ok(Self {
            path: NonEmptyString::new(path)?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }
}

/// Payload of a `"db"` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DatabaseSource {
    pub connection_url: NonEmptyString,
}

impl DatabaseSource {
    /// # Errors
    ///
    /// Returns `DescriptorError::Malformed` if `connection_url` is blank.
    pub fn new(connection_url: impl Into<String>) -> Result<Self, DescriptorError> {
        Ok(Self {
            connection_url: NonEmptyString::new(connection_url)?,
        })
    }

    #[must_use]
    pub fn connection_url(&self) -> &str {
        self.connection_url.as_str()
    }
}

// ---------------------------------------------------------------------------
// ResourceDescriptor
// ---------------------------------------------------------------------------

/// A resource to be loaded, tagged by `kind`.
///
/// Descriptors are immutable once built. Each variant owns only its own
/// payload, so a handler receiving a [`FileSource`] cannot observe database
/// fields and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ResourceDescriptor {
    #[serde(rename = "file")]
    File(FileSource),
    #[serde(rename = "db")]
    Database(DatabaseSource),
}

impl ResourceDescriptor {
    /// Builds a `"file"` descriptor.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::Malformed` if `path` is blank.
    pub fn file(path: impl Into<String>) -> Result<Self, DescriptorError> {
        FileSource::new(path).map(Self::File)
    }

    /// Builds a `"db"` descriptor.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::Malformed` if `connection_url` is blank.
    pub fn database(connection_url: impl Into<String>) -> Result<Self, DescriptorError> {
        DatabaseSource::new(connection_url).map(Self::Database)
    }

    /// The discriminant of this descriptor.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            ResourceDescriptor::File(_) => ResourceKind::File,
            ResourceDescriptor::Database(_) => ResourceKind::Database,
        }
    }

    /// Returns `true` if this descriptor's tag equals `tag`.
    ///
    /// Uses [`kind`](Self::kind), the same discrimination routers match on.
    #[must_use]
    pub fn is_variant(&self, tag: &str) -> bool {
        self.kind().as_str() == tag
    }
}
