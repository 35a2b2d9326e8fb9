//! Mock object store for testing.
//!
//! [`MemoryStore`] keeps objects in process memory and fabricates the
//! metadata a real store would report: an integrity tag (hex SHA-256 of the
//! stored bytes, standing in for an S3-style entity tag) and a last-modified
//! instant. It implements [`ObjectStore`] so artifact code can be exercised
//! without network access.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! mlvault-core = { version = "...", features = ["test-utils"] }
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use jiff::Timestamp;
use sha2::{Digest, Sha256};

use crate::store::{ObjectMeta, ObjectStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    etag: String,
    last_modified: Timestamp,
}

/// In-memory [`ObjectStore`] implementation.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use mlvault_core::mock::MemoryStore;
/// use mlvault_core::store::ObjectStore;
///
/// # async fn demo() -> mlvault_core::store::StoreResult<()> {
/// let store = MemoryStore::new("test-bucket");
/// store.write("prefix/object", Bytes::from_static(b"payload")).await?;
/// assert_eq!(store.read("prefix/object").await?, Bytes::from_static(b"payload"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    bucket: String,
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryStore {
    /// Creates an empty store addressing the given bucket name.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when no objects are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredObject>> {
        self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn read(&self, key: &str) -> StoreResult<Bytes> {
        self.lock()
            .get(key)
            .map(|o| o.data.clone())
            .ok_or_else(|| StoreError::not_found().with_message(key.to_owned()))
    }

    async fn write(&self, key: &str, data: Bytes) -> StoreResult<()> {
        let etag = hex::encode(Sha256::digest(&data));
        self.lock().insert(
            key.to_owned(),
            StoredObject {
                data,
                etag,
                last_modified: Timestamp::now(),
            },
        );
        Ok(())
    }

    async fn stat(&self, key: &str) -> StoreResult<ObjectMeta> {
        self.lock()
            .get(key)
            .map(|o| ObjectMeta {
                size: o.data.len() as u64,
                etag: Some(o.etag.clone()),
                last_modified: Some(o.last_modified),
            })
            .ok_or_else(|| StoreError::not_found().with_message(key.to_owned()))
    }

    async fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .lock()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreErrorKind;

    #[tokio::test]
    async fn test_write_then_read() {
        let store = MemoryStore::new("bucket");
        store.write("a/b", Bytes::from_static(b"data")).await.unwrap();
        assert_eq!(store.read("a/b").await.unwrap(), Bytes::from_static(b"data"));
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let store = MemoryStore::new("bucket");
        let err = store.read("missing").await.unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_stat_reports_etag_for_exact_bytes() {
        let store = MemoryStore::new("bucket");
        store.write("k", Bytes::from_static(b"v1")).await.unwrap();
        let first = store.stat("k").await.unwrap().etag;
        store.write("k", Bytes::from_static(b"v2")).await.unwrap();
        let second = store.stat("k").await.unwrap().etag;
        assert!(first.is_some());
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_list_filters_by_prefix_and_sorts() {
        let store = MemoryStore::new("bucket");
        for key in ["models/m_b", "models/m_a", "datasets/d"] {
            store.write(key, Bytes::from_static(b"x")).await.unwrap();
        }
        assert_eq!(
            store.list("models/").await.unwrap(),
            vec!["models/m_a".to_owned(), "models/m_b".to_owned()],
        );
    }

    #[tokio::test]
    async fn test_write_overwrites_silently() {
        let store = MemoryStore::new("bucket");
        store.write("k", Bytes::from_static(b"old")).await.unwrap();
        store.write("k", Bytes::from_static(b"new")).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.read("k").await.unwrap(), Bytes::from_static(b"new"));
    }
}
