//! Azure Blob Storage backend support.

mod config;

pub use config::AzureBlobConfig;
