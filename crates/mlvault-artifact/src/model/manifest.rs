//! The manifest sidecar stored next to each model payload.

use std::collections::BTreeMap;

use mlvault_core::hash::ContentHash;
use serde::{Deserialize, Serialize};

/// Lineage and identity metadata uploaded alongside a model payload.
///
/// Serialized as a JSON object; field order is fixed and the extra map is
/// ordered, so equal manifests encode to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Logical model name (not enforced unique).
    pub name: String,
    /// Locally computed hash of the payload object, as uploaded.
    pub content_hash: ContentHash,
    /// Bucket of the training dataset version.
    pub training_dataset_bucket: String,
    /// Object key of the training dataset version.
    pub training_dataset_key: String,
    /// Store-reported integrity tag of the training dataset version.
    pub training_dataset_hash: String,
    /// Identifier of the pipeline code revision that produced the model.
    pub code_revision: String,
    /// Free-form tags.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ModelManifest {
    /// Key of the manifest object for a given payload key.
    #[must_use]
    pub fn key_for(payload_key: &str) -> String {
        format!("{payload_key}.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> ModelManifest {
        ModelManifest {
            name: "classifier".into(),
            content_hash: ContentHash::of(b"payload"),
            training_dataset_bucket: "b".into(),
            training_dataset_key: "datasets/d1.csv".into(),
            training_dataset_hash: "759ecc".into(),
            code_revision: "abc123".into(),
            extra: BTreeMap::from([("stage".into(), serde_json::json!("staging"))]),
        }
    }

    #[test]
    fn test_manifest_json_field_names() {
        let json: serde_json::Value =
            serde_json::from_slice(&serde_json::to_vec(&manifest()).unwrap()).unwrap();
        assert_eq!(json["training_dataset_key"], "datasets/d1.csv");
        assert_eq!(json["training_dataset_hash"], "759ecc");
        assert_eq!(json["code_revision"], "abc123");
        assert_eq!(json["stage"], "staging");
    }

    #[test]
    fn test_manifest_round_trip() {
        let bytes = serde_json::to_vec(&manifest()).unwrap();
        let back: ModelManifest = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, manifest());
    }

    #[test]
    fn test_manifest_key_sits_next_to_payload() {
        assert_eq!(
            ModelManifest::key_for("models/m_2021-07-10T07:42:23.bin"),
            "models/m_2021-07-10T07:42:23.bin.json",
        );
    }
}
