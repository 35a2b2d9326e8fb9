//! Prelude module for convenient imports.

pub use crate::backend::ObjectStoreBackend;
pub use crate::config::{AzureBlobConfig, MemoryConfig, S3Config, StorageConfig};
pub use crate::error::{StorageError, StorageResult};
