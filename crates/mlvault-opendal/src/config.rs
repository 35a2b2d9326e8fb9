//! Storage configuration types.

use serde::{Deserialize, Serialize};

// Re-export configs from backend modules
pub use crate::azblob::AzureBlobConfig;
pub use crate::memory::MemoryConfig;
pub use crate::s3::S3Config;

/// Storage backend configuration.
///
/// Constructing a backend from a variant whose cargo feature is disabled
/// fails at [`ObjectStoreBackend::new`](crate::ObjectStoreBackend::new)
/// with an initialization error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum StorageConfig {
    /// Amazon S3 compatible storage.
    S3(S3Config),
    /// Azure Blob Storage.
    AzureBlob(AzureBlobConfig),
    /// In-memory storage for tests and local development.
    Memory(MemoryConfig),
}

impl StorageConfig {
    /// Returns the backend name as a static string.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::S3(_) => "s3",
            Self::AzureBlob(_) => "azblob",
            Self::Memory(_) => "memory",
        }
    }

    /// Returns the bucket or container this configuration addresses.
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3(config) => &config.bucket,
            Self::AzureBlob(config) => &config.container,
            Self::Memory(config) => &config.name,
        }
    }
}
