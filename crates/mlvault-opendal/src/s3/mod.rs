//! Amazon S3 backend support.

mod config;

pub use config::S3Config;
