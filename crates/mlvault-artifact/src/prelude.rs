//! Convenient re-exports for common use.

pub use crate::dataset::{DatasetArtifact, DatasetRef};
pub use crate::error::{ArtifactError, ArtifactResult};
pub use crate::model::{ModelArtifact, ModelCodec, ModelManifest, SerdeJson};
pub use crate::resolve::{latest_version, list_versions};
