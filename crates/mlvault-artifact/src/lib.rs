#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Versioned dataset and model artifacts over object storage.
//!
//! Artifacts are addressed by timestamped object keys (see
//! [`mlvault_core::version`]) so that "latest" resolves by key order alone.
//! Dataset artifacts are immutable snapshots of tabular data stamped with
//! the store-reported integrity tag; model artifacts are write-once wrappers
//! around a trained model, carrying a locally computed content hash and a
//! lineage link to the exact dataset version they were trained on.
//!
//! Everything here is fail-fast: one blocking round trip per store call,
//! no retries, no caching, no recovery. Retry policy belongs to callers.

mod dataset;
mod error;
pub mod model;
pub mod resolve;

#[doc(hidden)]
pub mod prelude;

pub use dataset::{DatasetArtifact, DatasetRef};
pub use error::{ArtifactError, ArtifactResult};

/// Tracing target for artifact operations.
pub const TRACING_TARGET: &str = "mlvault_artifact";
