//! In-memory backend support.

mod config;

pub use config::MemoryConfig;
