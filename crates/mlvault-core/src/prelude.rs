//! Convenient re-exports for common use.

pub use crate::frame::{Column, Frame, FrameError, FrameFormat, Value};
pub use crate::hash::ContentHash;
pub use crate::store::{ObjectMeta, ObjectStore, StoreError, StoreErrorKind, StoreLocation, StoreResult};
pub use crate::version::{VersionStamp, build_key, parse_key};
