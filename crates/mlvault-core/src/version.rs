//! Version stamps and the timestamped object key scheme.
//!
//! Every artifact version is addressed by a key of the form
//! `<prefix>/<base_name>_<stamp>.<extension>`, where the stamp is a
//! fixed-width, zero-padded, second-resolution UTC datetime
//! (`YYYY-MM-DDTHH:MM:SS`). Fixed width makes lexicographic key order equal
//! to chronological order, which is what "latest version" resolution relies
//! on.

use std::fmt;
use std::str::FromStr;

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The `strftime` format of the stamp embedded in object keys.
///
/// 19 characters, zero padded, no timezone suffix. Stamps are always
/// captured and compared in UTC.
pub const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Width in bytes of a formatted [`VersionStamp`].
pub const STAMP_WIDTH: usize = 19;

/// Errors from parsing version stamps.
#[derive(Debug, Error)]
pub enum VersionStampError {
    /// The input is not a `YYYY-MM-DDTHH:MM:SS` datetime.
    #[error("invalid version stamp {input:?}: {source}")]
    Parse {
        /// The rejected input.
        input: String,
        /// Underlying parse error.
        #[source]
        source: jiff::Error,
    },
}

/// A second-resolution UTC datetime identifying one artifact version.
///
/// String order of the canonical form equals chronological order, so stamps
/// can be compared either way.
///
/// # Example
///
/// ```
/// use mlvault_core::version::VersionStamp;
///
/// let older: VersionStamp = "2021-07-10T07:42:23".parse().unwrap();
/// let newer: VersionStamp = "2021-07-12T07:41:02".parse().unwrap();
///
/// assert!(older < newer);
/// assert_eq!(older.to_string(), "2021-07-10T07:42:23");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionStamp(DateTime);

impl VersionStamp {
    /// Captures the current UTC wall-clock time, truncated to seconds.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Zoned::now().with_time_zone(TimeZone::UTC).datetime())
    }

    /// Creates a stamp from a civil datetime, truncating sub-second
    /// precision.
    #[must_use]
    pub fn from_datetime(dt: DateTime) -> Self {
        let truncated = dt.with().subsec_nanosecond(0).build().unwrap_or(dt);
        Self(truncated)
    }

    /// Creates a stamp from an instant, interpreted in UTC.
    #[must_use]
    pub fn from_timestamp(ts: Timestamp) -> Self {
        Self::from_datetime(TimeZone::UTC.to_datetime(ts))
    }

    /// Returns the underlying civil datetime.
    #[must_use]
    pub fn as_datetime(&self) -> DateTime {
        self.0
    }
}

impl fmt::Display for VersionStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime(STAMP_FORMAT))
    }
}

impl FromStr for VersionStamp {
    type Err = VersionStampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt = DateTime::strptime(STAMP_FORMAT, s).map_err(|source| {
            VersionStampError::Parse {
                input: s.to_owned(),
                source,
            }
        })?;
        Ok(Self(dt))
    }
}

impl Serialize for VersionStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionStamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The version-bearing parts recovered from an object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    /// The embedded version stamp.
    pub stamp: VersionStamp,
    /// The file extension, without the leading dot.
    pub extension: String,
}

/// Normalizes a key prefix so it is either empty or ends with `/`.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix.to_owned()
    } else {
        format!("{prefix}/")
    }
}

/// Builds the object key for one artifact version.
///
/// Deterministic, and strictly monotonic in `stamp` under string comparison
/// for a fixed prefix, base name and extension.
///
/// # Example
///
/// ```
/// use mlvault_core::version::{VersionStamp, build_key};
///
/// let stamp: VersionStamp = "2021-07-10T07:42:23".parse().unwrap();
/// let key = build_key("datasets", "prices", stamp, "csv");
///
/// assert_eq!(key, "datasets/prices_2021-07-10T07:42:23.csv");
/// ```
#[must_use]
pub fn build_key(prefix: &str, base_name: &str, stamp: VersionStamp, extension: &str) -> String {
    format!("{}{base_name}_{stamp}.{extension}", normalize_prefix(prefix))
}

/// Recovers the version stamp and extension from an object key.
///
/// Returns `None` for keys that do not end in `_<stamp>.<extension>` with a
/// well-formed fixed-width stamp. Callers listing a prefix treat such keys
/// as foreign objects and skip them.
#[must_use]
pub fn parse_key(key: &str) -> Option<ParsedKey> {
    let (stem, extension) = key.rsplit_once('.')?;
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    if stem.len() <= STAMP_WIDTH || !stem.is_char_boundary(stem.len() - STAMP_WIDTH) {
        return None;
    }
    let (head, stamp_str) = stem.split_at(stem.len() - STAMP_WIDTH);
    if !head.ends_with('_') {
        return None;
    }
    let stamp = stamp_str.parse().ok()?;
    Some(ParsedKey {
        stamp,
        extension: extension.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(s: &str) -> VersionStamp {
        s.parse().expect("valid stamp")
    }

    #[test]
    fn test_stamp_display_is_fixed_width() {
        let s = stamp("0999-01-02T03:04:05");
        assert_eq!(s.to_string().len(), STAMP_WIDTH);
        assert_eq!(s.to_string(), "0999-01-02T03:04:05");
    }

    #[test]
    fn test_stamp_string_order_matches_chronology() {
        let earlier = stamp("2021-07-10T07:42:23");
        let later = stamp("2021-07-10T07:42:24");
        assert!(earlier < later);
        assert!(earlier.to_string() < later.to_string());
    }

    #[test]
    fn test_build_key_is_monotonic_in_stamp() {
        let t1 = stamp("2021-07-10T07:42:23");
        let t2 = stamp("2021-07-11T07:45:12");
        let k1 = build_key("datasets", "prices", t1, "csv");
        let k2 = build_key("datasets", "prices", t2, "csv");
        assert!(k1 < k2);
    }

    #[test]
    fn test_build_key_normalizes_prefix() {
        let t = stamp("2021-07-10T07:42:23");
        assert_eq!(
            build_key("datasets/", "prices", t, "csv"),
            build_key("datasets", "prices", t, "csv"),
        );
        assert_eq!(
            build_key("", "prices", t, "csv"),
            "prices_2021-07-10T07:42:23.csv",
        );
    }

    #[test]
    fn test_parse_key_round_trips_build_key() {
        let t = stamp("2021-07-12T07:41:02");
        let key = build_key("models", "classifier", t, "bin");
        let parsed = parse_key(&key).expect("parsable key");
        assert_eq!(parsed.stamp, t);
        assert_eq!(parsed.extension, "bin");
    }

    #[test]
    fn test_parse_key_rejects_malformed_keys() {
        for key in [
            "datasets/prices.csv",
            "datasets/prices_2021-07-10.csv",
            "datasets/prices_2021-07-10T07:42.csv",
            "datasets/prices_2021-13-10T07:42:23.csv",
            "datasets/prices_2021-07-10T07:42:23",
            "datasets/prices_2021-07-10T07:42:23.",
            "datasets/prices2021-07-10T07:42:23.csv",
            "",
        ] {
            assert!(parse_key(key).is_none(), "expected rejection: {key:?}");
        }
    }

    #[test]
    fn test_parse_key_handles_multibyte_stems() {
        // Must not panic on a non-ASCII stem shorter than the stamp width.
        assert!(parse_key("é.csv").is_none());
    }

    #[test]
    fn test_stamp_serde_uses_canonical_string() {
        let t = stamp("2021-07-10T07:42:23");
        let json = serde_json::to_string(&t).expect("serialize");
        assert_eq!(json, "\"2021-07-10T07:42:23\"");
        let back: VersionStamp = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, t);
    }
}
