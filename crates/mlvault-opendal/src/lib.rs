#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! OpenDAL-backed object storage for the mlvault artifact layer.
//!
//! [`ObjectStoreBackend`] wraps an [`opendal::Operator`] for one bucket or
//! container and implements [`mlvault_core::store::ObjectStore`], the sole
//! wire-level contract the artifact crates depend on. Every call is a
//! single round trip; no retry, backoff or caching happens here.

mod backend;
mod config;
mod error;

mod azblob;
mod memory;
mod s3;

#[doc(hidden)]
pub mod prelude;

pub use backend::ObjectStoreBackend;
pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};

/// Tracing target for storage operations.
pub const TRACING_TARGET: &str = "mlvault_opendal";
