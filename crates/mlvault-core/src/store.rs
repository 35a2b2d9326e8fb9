//! The object-store boundary.
//!
//! This is the sole wire-level contract mlvault has with remote storage:
//! bucket name plus object key plus byte payload, with reads surfacing the
//! store-reported metadata (integrity tag, last-modified). Each operation is
//! one blocking round trip with no retry, no caching and no atomicity
//! across calls.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results of store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Categories of store-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StoreErrorKind {
    /// The object does not exist.
    NotFound,
    /// The caller is not allowed to access the object.
    PermissionDenied,
    /// Network, auth or store-side failure.
    Transport,
}

/// A structured error raised at the object-store boundary.
#[derive(Debug, Error)]
#[error("{kind:?}{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct StoreError {
    /// The kind of failure.
    pub kind: StoreErrorKind,
    /// Optional human-readable context.
    pub message: Option<String>,
    /// Optional underlying error.
    #[source]
    pub source: Option<BoxedError>,
}

impl StoreError {
    /// Creates a new error with the given kind.
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Creates a new not found error.
    pub fn not_found() -> Self {
        Self::new(StoreErrorKind::NotFound)
    }

    /// Creates a new permission denied error.
    pub fn permission_denied() -> Self {
        Self::new(StoreErrorKind::PermissionDenied)
    }

    /// Creates a new transport error.
    pub fn transport() -> Self {
        Self::new(StoreErrorKind::Transport)
    }

    /// Adds a message to this error.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }
}

/// Identifies the exact object an artifact was read from or written to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreLocation {
    /// Bucket or container name.
    pub bucket: String,
    /// Object key within the bucket.
    pub key: String,
}

impl StoreLocation {
    /// Creates a new location.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Store-reported metadata for one object version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Object size in bytes.
    pub size: u64,
    /// Integrity tag computed by the store for this exact object version.
    ///
    /// Whatever token the store provides (e.g. an S3 entity tag) is carried
    /// verbatim and never recomputed locally. Not every backend reports one.
    pub etag: Option<String>,
    /// Last modification time, when the store reports it.
    pub last_modified: Option<jiff::Timestamp>,
}

/// Boundary trait implemented by storage backends.
///
/// Implementations hold no shared mutable state across calls and are safe
/// to invoke concurrently from independent call sites. They make no
/// atomicity guarantee across a "list then read" pair.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// The bucket or container this store addresses.
    fn bucket(&self) -> &str;

    /// Reads the full payload of an object.
    async fn read(&self, key: &str) -> StoreResult<Bytes>;

    /// Writes an object, silently replacing any existing object at `key`.
    async fn write(&self, key: &str, data: Bytes) -> StoreResult<()>;

    /// Returns the store-reported metadata for an object.
    async fn stat(&self, key: &str) -> StoreResult<ObjectMeta>;

    /// Lists the keys of all objects under `prefix`.
    async fn list(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Returns the location of `key` within this store's bucket.
    fn location(&self, key: &str) -> StoreLocation {
        StoreLocation::new(self.bucket(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = StoreLocation::new("datasets-bucket", "prices/p_2021-07-10T07:42:23.csv");
        assert_eq!(
            loc.to_string(),
            "datasets-bucket/prices/p_2021-07-10T07:42:23.csv"
        );
    }

    #[test]
    fn test_store_error_carries_kind_and_message() {
        let err = StoreError::not_found().with_message("no such key");
        assert_eq!(err.kind(), StoreErrorKind::NotFound);
        assert_eq!(err.to_string(), "NotFound: no such key");
    }

    #[test]
    fn test_error_kind_snake_case_names() {
        assert_eq!(StoreErrorKind::PermissionDenied.as_ref(), "permission_denied");
    }
}
