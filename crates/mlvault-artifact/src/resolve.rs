//! Version resolution over a key prefix.
//!
//! Listing is the only way "latest" is determined: keys are parsed for
//! their embedded stamp, foreign keys are skipped, and the maximum stamp
//! wins. There is no atomicity between resolving the latest key and reading
//! it; a version published in between is invisible to that read
//! (last-observed-version semantics).

use mlvault_core::store::ObjectStore;
use mlvault_core::version::{VersionStamp, normalize_prefix, parse_key};

use crate::TRACING_TARGET;
use crate::error::{ArtifactError, ArtifactResult};

/// Lists all versioned artifacts under `prefix` with the given extension.
///
/// Objects whose key does not embed a well-formed stamp, or whose extension
/// differs, are skipped silently; they are not an error. Results are pairs
/// of full object key and parsed stamp, in unspecified order.
///
/// # Errors
///
/// Returns [`ArtifactError::Transport`] when the store-level listing fails.
pub async fn list_versions<S>(
    store: &S,
    prefix: &str,
    extension: &str,
) -> ArtifactResult<Vec<(String, VersionStamp)>>
where
    S: ObjectStore + ?Sized,
{
    let prefix = normalize_prefix(prefix);
    let keys = store.list(&prefix).await?;
    let total = keys.len();

    let versions: Vec<(String, VersionStamp)> = keys
        .into_iter()
        .filter_map(|key| {
            let parsed = parse_key(&key)?;
            parsed
                .extension
                .eq_ignore_ascii_case(extension)
                .then_some((key, parsed.stamp))
        })
        .collect();

    tracing::debug!(
        target: TRACING_TARGET,
        prefix = %prefix,
        extension = %extension,
        listed = total,
        parsable = versions.len(),
        "Listed artifact versions"
    );

    Ok(versions)
}

/// Resolves the latest versioned artifact under `prefix`.
///
/// The entry with the maximum stamp wins; stamp ties are broken by key
/// string order, deterministically.
///
/// # Errors
///
/// Returns [`ArtifactError::NoVersions`] when the prefix yields zero
/// parsable entries, which covers both an empty prefix and one holding only
/// foreign keys.
pub async fn latest_version<S>(
    store: &S,
    prefix: &str,
    extension: &str,
) -> ArtifactResult<(String, VersionStamp)>
where
    S: ObjectStore + ?Sized,
{
    list_versions(store, prefix, extension)
        .await?
        .into_iter()
        .max_by(|(key_a, stamp_a), (key_b, stamp_b)| {
            stamp_a.cmp(stamp_b).then_with(|| key_a.cmp(key_b))
        })
        .ok_or_else(|| ArtifactError::NoVersions {
            prefix: normalize_prefix(prefix),
        })
}
