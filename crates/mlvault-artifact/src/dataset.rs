//! Dataset artifacts.

use bytes::Bytes;
use mlvault_core::frame::{Frame, FrameFormat};
use mlvault_core::store::{ObjectStore, StoreLocation};
use mlvault_core::version::{VersionStamp, build_key};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET;
use crate::error::ArtifactResult;
use crate::resolve::latest_version;

/// An immutable snapshot of tabular data read from, or about to be written
/// to, object storage.
///
/// `created_at` comes from the object key, never from the wall clock at
/// read time, and `etag` is the integrity tag the store reported for that
/// exact object version. Both are authoritative only for `location`; there
/// is no mutation API and no re-validation after construction. Backends
/// that report no integrity tag yield an empty `etag`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetArtifact {
    frame: Frame,
    created_at: VersionStamp,
    location: StoreLocation,
    etag: String,
}

/// A weak lineage reference to one dataset artifact version.
///
/// Plain values only: the referenced object may be deleted or overwritten
/// out-of-band without affecting holders of the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    /// Where the dataset version was stored.
    pub location: StoreLocation,
    /// The store-reported integrity tag it carried when read.
    pub etag: String,
}

impl DatasetArtifact {
    /// Downloads and parses the latest dataset under `prefix`.
    ///
    /// Resolution and download are two separate round trips; a version
    /// published between them is invisible to this call.
    ///
    /// # Errors
    ///
    /// [`ArtifactError::NoVersions`](crate::ArtifactError::NoVersions) when
    /// no parsable version exists,
    /// [`ArtifactError::Format`](crate::ArtifactError::Format) when the
    /// payload fails to parse, and
    /// [`ArtifactError::Transport`](crate::ArtifactError::Transport) for
    /// store-level failures.
    pub async fn read_latest<S>(
        store: &S,
        prefix: &str,
        format: FrameFormat,
    ) -> ArtifactResult<Self>
    where
        S: ObjectStore + ?Sized,
    {
        let (key, created_at) = latest_version(store, prefix, format.extension()).await?;
        let meta = store.stat(&key).await?;
        let payload = store.read(&key).await?;
        let frame = Frame::decode(format, &payload)?;

        tracing::info!(
            target: TRACING_TARGET,
            key = %key,
            rows = frame.num_rows(),
            "Dataset artifact read"
        );

        Ok(Self {
            frame,
            created_at,
            location: store.location(&key),
            etag: meta.etag.unwrap_or_default(),
        })
    }

    /// Serializes `frame` and uploads it as a new dataset version stamped
    /// with the current time.
    ///
    /// Keys carry second resolution, so two writes to the same prefix and
    /// format within one second collide and the second silently replaces
    /// the first. This mirrors the store's own overwrite semantics and is
    /// not corrected here.
    pub async fn write<S>(
        store: &S,
        prefix: &str,
        base_name: &str,
        frame: &Frame,
        format: FrameFormat,
    ) -> ArtifactResult<StoreLocation>
    where
        S: ObjectStore + ?Sized,
    {
        Self::write_at(store, prefix, base_name, frame, format, VersionStamp::now()).await
    }

    /// Like [`write`](Self::write), but stamps the version with a
    /// caller-supplied reference time instead of the current clock.
    pub async fn write_at<S>(
        store: &S,
        prefix: &str,
        base_name: &str,
        frame: &Frame,
        format: FrameFormat,
        stamp: VersionStamp,
    ) -> ArtifactResult<StoreLocation>
    where
        S: ObjectStore + ?Sized,
    {
        let payload = frame.encode(format)?;
        let key = build_key(prefix, base_name, stamp, format.extension());
        store.write(&key, Bytes::from(payload)).await?;

        tracing::info!(
            target: TRACING_TARGET,
            key = %key,
            rows = frame.num_rows(),
            "Dataset artifact written"
        );

        Ok(store.location(&key))
    }

    /// The tabular payload.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Consumes the artifact, returning the payload.
    ///
    /// Takes `self` so a mutated frame can no longer masquerade as the
    /// hashed artifact it was read as.
    #[must_use]
    pub fn into_frame(self) -> Frame {
        self.frame
    }

    /// When this version was created, as embedded in its key.
    #[must_use]
    pub fn created_at(&self) -> VersionStamp {
        self.created_at
    }

    /// The exact object this artifact was read from.
    #[must_use]
    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// The store-reported integrity tag for that object version.
    #[must_use]
    pub fn etag(&self) -> &str {
        &self.etag
    }

    /// Derives the weak lineage reference a model artifact records.
    #[must_use]
    pub fn lineage_ref(&self) -> DatasetRef {
        DatasetRef {
            location: self.location.clone(),
            etag: self.etag.clone(),
        }
    }
}
