//! Model artifacts and their serialization codecs.

mod artifact;
mod codec;
mod manifest;

pub use artifact::{MODEL_EXTENSION, ModelArtifact, code_revision_from_env};
pub use codec::{CodecError, ModelCodec, SerdeJson};
pub use manifest::ModelManifest;
