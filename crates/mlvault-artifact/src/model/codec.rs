//! The model serialization capability.
//!
//! [`ModelCodec`] is the one designed extension point of the artifact
//! layer: any trained-model wrapper that can turn itself into bytes and
//! back can be stored, without inheriting from anything. [`SerdeJson`] is
//! the default general-purpose strategy; model types with native buffers
//! or external serialization formats implement [`ModelCodec`] directly.

use std::ops::{Deref, DerefMut};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error from a model codec.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CodecError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CodecError {
    /// Creates a new codec error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Adds the underlying error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// Capability to serialize a model object to bytes and rebuild it.
///
/// Implementations must be deterministic: serializing an unchanged model
/// twice yields byte-identical payloads, which the artifact layer relies on
/// for stable content hashes.
pub trait ModelCodec: Sized + Send + Sync {
    /// Converts the model to its byte payload.
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError>;

    /// Rebuilds the model from a byte payload.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError>;
}

/// Default serialization strategy: serde-derived JSON.
///
/// Wraps any `T: Serialize + DeserializeOwned`. Struct field order makes
/// the output deterministic; models whose state contains hash maps should
/// prefer ordered maps or a custom [`ModelCodec`] impl.
///
/// # Example
///
/// ```
/// use mlvault_artifact::model::{ModelCodec, SerdeJson};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Linear {
///     weights: Vec<f64>,
///     bias: f64,
/// }
///
/// let model = SerdeJson(Linear { weights: vec![0.4, 1.1], bias: -0.2 });
/// let bytes = model.to_bytes().unwrap();
/// let back = SerdeJson::<Linear>::from_bytes(&bytes).unwrap();
/// assert_eq!(back.0, model.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SerdeJson<T>(pub T);

impl<T> SerdeJson<T> {
    /// Consumes the wrapper, returning the model.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for SerdeJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for SerdeJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> ModelCodec for SerdeJson<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(&self.0)
            .map_err(|e| CodecError::new("model is not JSON-serializable").with_source(e))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(bytes)
            .map(Self)
            .map_err(|e| CodecError::new("payload is not a JSON model").with_source(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stub {
        threshold: f64,
        classes: Vec<String>,
    }

    fn stub() -> SerdeJson<Stub> {
        SerdeJson(Stub {
            threshold: 0.5,
            classes: vec!["ham".into(), "spam".into()],
        })
    }

    #[test]
    fn test_serde_json_round_trip() {
        let bytes = stub().to_bytes().unwrap();
        let back = SerdeJson::<Stub>::from_bytes(&bytes).unwrap();
        assert_eq!(back.0, stub().0);
    }

    #[test]
    fn test_serde_json_is_deterministic() {
        assert_eq!(stub().to_bytes().unwrap(), stub().to_bytes().unwrap());
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let err = SerdeJson::<Stub>::from_bytes(b"not json").unwrap_err();
        assert!(err.to_string().contains("JSON"));
    }
}
