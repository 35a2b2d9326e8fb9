//! Model artifacts.

use std::collections::BTreeMap;

use bytes::Bytes;
use mlvault_core::hash::ContentHash;
use mlvault_core::store::{ObjectStore, StoreErrorKind, StoreLocation};
use mlvault_core::version::{VersionStamp, build_key};

use crate::TRACING_TARGET;
use crate::dataset::{DatasetArtifact, DatasetRef};
use crate::error::{ArtifactError, ArtifactResult};
use crate::model::codec::ModelCodec;
use crate::model::manifest::ModelManifest;
use crate::resolve::latest_version;

/// File extension of model payload objects.
pub const MODEL_EXTENSION: &str = "bin";

/// Reads the pipeline code revision from the `GIT_COMMIT_HASH` environment
/// variable, falling back to `"NA"` when unset.
#[must_use]
pub fn code_revision_from_env() -> String {
    std::env::var("GIT_COMMIT_HASH").unwrap_or_else(|_| "NA".to_owned())
}

/// A write-once wrapper around a trained model.
///
/// Carries the lineage link to the exact dataset version the model was
/// trained on, the code revision that produced it, and free-form metadata.
/// Uploading never updates in place: every upload creates a new versioned
/// object (plus its manifest sidecar) under the target prefix.
pub struct ModelArtifact<M: ModelCodec> {
    name: String,
    model: M,
    created_at: VersionStamp,
    training_dataset: DatasetRef,
    code_revision: String,
    extra: BTreeMap<String, serde_json::Value>,
}

impl<M: ModelCodec> ModelArtifact<M> {
    /// Wraps a freshly trained model.
    ///
    /// `created_at` is captured now; the lineage reference is derived from
    /// `training_dataset`; `code_revision` is injected by the caller (see
    /// [`code_revision_from_env`]), never computed here.
    pub fn new(
        name: impl Into<String>,
        model: M,
        training_dataset: &DatasetArtifact,
        code_revision: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model,
            created_at: VersionStamp::now(),
            training_dataset: training_dataset.lineage_ref(),
            code_revision: code_revision.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Adds a free-form metadata tag, replacing any existing value.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Logical model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the wrapped model.
    ///
    /// The content hash is recomputed on demand, so mutating the model
    /// never leaves a stale hash behind.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consumes the artifact, returning the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// When this artifact was constructed (not uploaded).
    #[must_use]
    pub fn created_at(&self) -> VersionStamp {
        self.created_at
    }

    /// Lineage reference to the training dataset version.
    #[must_use]
    pub fn training_dataset(&self) -> &DatasetRef {
        &self.training_dataset
    }

    /// The injected pipeline code revision.
    #[must_use]
    pub fn code_revision(&self) -> &str {
        &self.code_revision
    }

    /// Free-form metadata tags.
    #[must_use]
    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }

    /// Serializes the model with its codec.
    pub fn to_bytes(&self) -> ArtifactResult<Vec<u8>> {
        Ok(self.model.to_bytes()?)
    }

    /// Computes the content hash over the serialized model.
    ///
    /// Recomputed on every call; never cached across model mutation.
    pub fn content_hash(&self) -> ArtifactResult<ContentHash> {
        Ok(ContentHash::of(self.to_bytes()?))
    }

    /// Uploads the model payload and its manifest sidecar as a new version
    /// under `prefix`, keyed by `created_at`.
    ///
    /// Two uploads of same-named models created within the same second
    /// collide on one key and the second silently replaces the first; keys
    /// carry second resolution by design. No retry, no post-upload
    /// verification.
    ///
    /// # Errors
    ///
    /// [`ArtifactError::Codec`] when the model cannot be serialized,
    /// [`ArtifactError::Transport`] when either upload fails.
    pub async fn upload<S>(&self, store: &S, prefix: &str) -> ArtifactResult<StoreLocation>
    where
        S: ObjectStore + ?Sized,
    {
        let payload = self.to_bytes()?;
        let content_hash = ContentHash::of(&payload);
        let key = build_key(prefix, &self.name, self.created_at, MODEL_EXTENSION);

        let manifest = ModelManifest {
            name: self.name.clone(),
            content_hash,
            training_dataset_bucket: self.training_dataset.location.bucket.clone(),
            training_dataset_key: self.training_dataset.location.key.clone(),
            training_dataset_hash: self.training_dataset.etag.clone(),
            code_revision: self.code_revision.clone(),
            extra: self.extra.clone(),
        };
        let manifest_bytes = serde_json::to_vec(&manifest)
            .map_err(|e| ArtifactError::format(format!("manifest encoding failed: {e}")))?;

        store.write(&key, Bytes::from(payload)).await?;
        store
            .write(&ModelManifest::key_for(&key), Bytes::from(manifest_bytes))
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            key = %key,
            name = %self.name,
            code_revision = %self.code_revision,
            "Model artifact uploaded"
        );

        Ok(store.location(&key))
    }

    /// Downloads the latest model version under `prefix`, rebuilding the
    /// model through `M`'s codec and all metadata from the manifest
    /// sidecar.
    ///
    /// The payload's recomputed hash must match the manifest; a mismatch is
    /// a format error, as is a missing or unreadable manifest.
    ///
    /// # Errors
    ///
    /// [`ArtifactError::NoVersions`] when no parsable version exists,
    /// [`ArtifactError::Format`] on manifest or integrity failures,
    /// [`ArtifactError::Codec`] when the payload cannot be deserialized,
    /// [`ArtifactError::Transport`] for store-level failures.
    pub async fn read_latest<S>(store: &S, prefix: &str) -> ArtifactResult<Self>
    where
        S: ObjectStore + ?Sized,
    {
        let (key, created_at) = latest_version(store, prefix, MODEL_EXTENSION).await?;
        let payload = store.read(&key).await?;

        // A payload whose sidecar is missing is a malformed artifact (e.g. a
        // partial upload), not a transient store failure.
        let manifest_key = ModelManifest::key_for(&key);
        let manifest_bytes = match store.read(&manifest_key).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == StoreErrorKind::NotFound => {
                return Err(ArtifactError::format(format!(
                    "payload {key} has no manifest sidecar at {manifest_key}"
                )));
            }
            Err(err) => return Err(err.into()),
        };

        let manifest: ModelManifest = serde_json::from_slice(&manifest_bytes)
            .map_err(|e| ArtifactError::format(format!("manifest failed to parse: {e}")))?;

        let actual = ContentHash::of(&payload);
        if actual != manifest.content_hash {
            return Err(ArtifactError::format(format!(
                "payload hash {actual} does not match manifest hash {} for {key}",
                manifest.content_hash,
            )));
        }

        let model = M::from_bytes(&payload)?;

        tracing::info!(
            target: TRACING_TARGET,
            key = %key,
            name = %manifest.name,
            "Model artifact read"
        );

        Ok(Self {
            name: manifest.name,
            model,
            created_at,
            training_dataset: DatasetRef {
                location: StoreLocation::new(
                    manifest.training_dataset_bucket,
                    manifest.training_dataset_key,
                ),
                etag: manifest.training_dataset_hash,
            },
            code_revision: manifest.code_revision,
            extra: manifest.extra,
        })
    }
}

impl<M: ModelCodec + std::fmt::Debug> std::fmt::Debug for ModelArtifact<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("created_at", &self.created_at)
            .field("training_dataset", &self.training_dataset)
            .field("code_revision", &self.code_revision)
            .field("extra", &self.extra)
            .finish()
    }
}
