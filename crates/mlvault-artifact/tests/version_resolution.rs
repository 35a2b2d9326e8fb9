//! Version listing and latest-key resolution against an in-memory store.

use bytes::Bytes;
use mlvault_artifact::resolve::{latest_version, list_versions};
use mlvault_artifact::ArtifactError;
use mlvault_core::mock::MemoryStore;
use mlvault_core::store::ObjectStore;
use mlvault_core::version::VersionStamp;

async fn seed(store: &MemoryStore, keys: &[&str]) {
    for key in keys {
        store
            .write(key, Bytes::from_static(b"payload"))
            .await
            .expect("seed write");
    }
}

fn stamp(s: &str) -> VersionStamp {
    s.parse().expect("valid stamp")
}

#[tokio::test]
async fn latest_picks_maximum_stamp() {
    let store = MemoryStore::new("bucket");
    seed(
        &store,
        &[
            "datasets/prices_2021-07-10T07:42:23.csv",
            "datasets/prices_2021-07-11T07:45:12.csv",
            "datasets/prices_2021-07-12T07:41:02.csv",
        ],
    )
    .await;

    let (key, when) = latest_version(&store, "datasets/", "csv").await.unwrap();
    assert_eq!(key, "datasets/prices_2021-07-12T07:41:02.csv");
    assert_eq!(when, stamp("2021-07-12T07:41:02"));
}

#[tokio::test]
async fn malformed_keys_are_skipped_not_errors() {
    let store = MemoryStore::new("bucket");
    seed(
        &store,
        &[
            "datasets/prices_2021-07-10T07:42:23.csv",
            "datasets/readme.txt",
            "datasets/prices_not-a-stamp.csv",
            "datasets/prices_2021-07-09.csv",
        ],
    )
    .await;

    let versions = list_versions(&store, "datasets/", "csv").await.unwrap();
    assert_eq!(versions.len(), 1);

    let (key, _) = latest_version(&store, "datasets/", "csv").await.unwrap();
    assert_eq!(key, "datasets/prices_2021-07-10T07:42:23.csv");
}

#[tokio::test]
async fn empty_prefix_and_all_malformed_prefix_fail_identically() {
    let store = MemoryStore::new("bucket");
    seed(&store, &["junk/readme.txt", "junk/notes_today.txt"]).await;

    let empty = latest_version(&store, "nothing/", "csv").await.unwrap_err();
    let malformed = latest_version(&store, "junk/", "csv").await.unwrap_err();

    assert!(matches!(empty, ArtifactError::NoVersions { ref prefix } if prefix == "nothing/"));
    assert!(matches!(malformed, ArtifactError::NoVersions { ref prefix } if prefix == "junk/"));
}

#[tokio::test]
async fn extension_filter_excludes_sidecars_and_other_formats() {
    let store = MemoryStore::new("bucket");
    seed(
        &store,
        &[
            "models/m_2021-07-10T07:42:23.bin",
            "models/m_2021-07-10T07:42:23.bin.json",
            "models/m_2021-07-11T09:00:00.csv",
        ],
    )
    .await;

    let versions = list_versions(&store, "models/", "bin").await.unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].0, "models/m_2021-07-10T07:42:23.bin");
}

#[tokio::test]
async fn stamp_ties_break_by_key_order() {
    let store = MemoryStore::new("bucket");
    seed(
        &store,
        &[
            "datasets/alpha_2021-07-10T07:42:23.csv",
            "datasets/beta_2021-07-10T07:42:23.csv",
        ],
    )
    .await;

    let (key, _) = latest_version(&store, "datasets/", "csv").await.unwrap();
    assert_eq!(key, "datasets/beta_2021-07-10T07:42:23.csv");
}

#[tokio::test]
async fn unnormalized_prefix_lists_same_entries() {
    let store = MemoryStore::new("bucket");
    seed(&store, &["datasets/prices_2021-07-10T07:42:23.csv"]).await;

    let with_slash = list_versions(&store, "datasets/", "csv").await.unwrap();
    let without_slash = list_versions(&store, "datasets", "csv").await.unwrap();
    assert_eq!(with_slash, without_slash);
}
