//! Artifact error types.

use mlvault_core::frame::FrameError;
use mlvault_core::store::StoreError;

use crate::model::CodecError;

/// Result type for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Errors raised by the artifact layer.
///
/// All variants surface synchronously to the caller; the layer performs no
/// retry, fallback or partial-write recovery.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// The prefix holds no parsable versioned artifacts. Raised identically
    /// for an empty prefix and a prefix containing only foreign keys.
    #[error("no versioned artifacts under {prefix:?}")]
    NoVersions {
        /// The prefix that was searched.
        prefix: String,
    },

    /// A payload was present but failed to parse or failed an integrity
    /// check.
    #[error("artifact payload invalid: {0}")]
    Format(String),

    /// The object store reported a failure (network, auth, store-side).
    #[error(transparent)]
    Transport(#[from] StoreError),

    /// The model object could not be serialized or deserialized by the
    /// active codec.
    #[error("model codec failed: {0}")]
    Codec(#[from] CodecError),
}

impl ArtifactError {
    /// Creates a new format error.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}

impl From<FrameError> for ArtifactError {
    fn from(err: FrameError) -> Self {
        Self::Format(err.to_string())
    }
}
