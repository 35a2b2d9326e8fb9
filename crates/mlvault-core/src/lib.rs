#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Core types for the mlvault versioned artifact store.
//!
//! This crate provides the foundational pieces shared by all mlvault crates:
//! - Sortable version stamps and the timestamped object key scheme
//! - A column-major tabular frame with CSV and columnar binary codecs
//! - Locally computed SHA-256 content hashes
//! - The [`store::ObjectStore`] boundary trait implemented by backends
//! - Process-wide tracing initialization

pub mod frame;
pub mod hash;
pub mod store;
pub mod telemetry;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

#[doc(hidden)]
pub mod prelude;
