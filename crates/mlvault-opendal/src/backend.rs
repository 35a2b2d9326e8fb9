//! Storage backend implementation.

use async_trait::async_trait;
use bytes::Bytes;
use mlvault_core::store::{ObjectMeta, ObjectStore, StoreResult};
use opendal::Operator;
#[cfg(any(feature = "s3", feature = "azblob", feature = "memory"))]
use opendal::services;

use crate::TRACING_TARGET;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

/// Object storage backend for one bucket or container, wrapping an OpenDAL
/// operator.
#[derive(Clone)]
pub struct ObjectStoreBackend {
    operator: Operator,
    config: StorageConfig,
}

impl ObjectStoreBackend {
    /// Creates a new storage backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns an initialization error when the configured backend's cargo
    /// feature is disabled or the operator cannot be built.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let operator = Self::create_operator(&config)?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = config.backend_name(),
            bucket = %config.bucket(),
            "Storage backend initialized"
        );

        Ok(Self { operator, config })
    }

    /// Returns the configuration for this backend.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Reads the full payload of an object.
    pub async fn read_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            "Reading object"
        );

        let data = self.operator.read(key).await?.to_vec();

        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            size = data.len(),
            "Object read complete"
        );

        Ok(data)
    }

    /// Writes an object, replacing any existing object at `key`.
    pub async fn write_object(&self, key: &str, data: Bytes) -> StorageResult<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            size = data.len(),
            "Writing object"
        );

        self.operator.write(key, data).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            "Object write complete"
        );

        Ok(())
    }

    /// Gets the store-reported metadata for an object.
    pub async fn stat_object(&self, key: &str) -> StorageResult<ObjectMeta> {
        let meta = self.operator.stat(key).await?;

        // Convert chrono DateTime to jiff Timestamp
        let last_modified = meta
            .last_modified()
            .and_then(|dt| jiff::Timestamp::from_second(dt.timestamp()).ok());

        Ok(ObjectMeta {
            size: meta.content_length(),
            etag: meta.etag().map(|s| s.to_string()),
            last_modified,
        })
    }

    /// Lists the keys of all objects under `prefix`.
    pub async fn list_objects(&self, prefix: &str) -> StorageResult<Vec<String>> {
        use futures::TryStreamExt;

        let entries: Vec<_> = self.operator.lister(prefix).await?.try_collect().await?;

        Ok(entries.into_iter().map(|e| e.path().to_string()).collect())
    }

    /// Creates an OpenDAL operator based on configuration.
    #[allow(unreachable_patterns, unused_variables)]
    fn create_operator(config: &StorageConfig) -> StorageResult<Operator> {
        match config {
            #[cfg(feature = "s3")]
            StorageConfig::S3(s3) => {
                let mut builder = services::S3::default().bucket(&s3.bucket).region(&s3.region);

                if let Some(ref endpoint) = s3.endpoint {
                    builder = builder.endpoint(endpoint);
                }

                if let Some(ref access_key_id) = s3.access_key_id {
                    builder = builder.access_key_id(access_key_id);
                }

                if let Some(ref secret_access_key) = s3.secret_access_key {
                    builder = builder.secret_access_key(secret_access_key);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(feature = "azblob")]
            StorageConfig::AzureBlob(azblob) => {
                let mut builder = services::Azblob::default()
                    .container(&azblob.container)
                    .account_name(&azblob.account_name);

                if let Some(ref account_key) = azblob.account_key {
                    builder = builder.account_key(account_key);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(feature = "memory")]
            StorageConfig::Memory(_) => Operator::new(services::Memory::default())
                .map(|op| op.finish())
                .map_err(|e| StorageError::init(e.to_string())),

            // Reached when the variant's cargo feature is disabled.
            _ => Err(StorageError::init(format!(
                "backend {:?} is not supported with current features",
                config.backend_name()
            ))),
        }
    }
}

#[async_trait]
impl ObjectStore for ObjectStoreBackend {
    fn bucket(&self) -> &str {
        self.config.bucket()
    }

    async fn read(&self, key: &str) -> StoreResult<Bytes> {
        let data = self.read_object(key).await?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, key: &str, data: Bytes) -> StoreResult<()> {
        self.write_object(key, data).await?;
        Ok(())
    }

    async fn stat(&self, key: &str) -> StoreResult<ObjectMeta> {
        Ok(self.stat_object(key).await?)
    }

    async fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(self.list_objects(prefix).await?)
    }
}

impl std::fmt::Debug for ObjectStoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreBackend")
            .field("backend", &self.config.backend_name())
            .field("bucket", &self.config.bucket())
            .finish()
    }
}
