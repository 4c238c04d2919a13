//! Stored object naming.
//!
//! An uploaded file is addressed by `<unixMillis>_<sanitizedName>`, where every
//! maximal whitespace run of the original name becomes a single `_`. That one
//! string is enough to recover the display name and to build every URL.
//!
//! Uniqueness rests entirely on the millisecond timestamp: two files with the
//! same sanitized name derived in the same millisecond share a stored name,
//! and the hosting API rejects the later write.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Replace each maximal run of whitespace with a single underscore.
pub fn sanitize_file_name(name: &str) -> String {
    WHITESPACE_RUN.replace_all(name, "_").into_owned()
}

/// Identifier under which an uploaded file is kept in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredObjectName(String);

impl StoredObjectName {
    /// Derive the stored name for `original_name` uploaded at `at`.
    pub fn derive(original_name: &str, at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}_{}",
            at.timestamp_millis(),
            sanitize_file_name(original_name)
        ))
    }

    /// Derive the stored name using the current time.
    pub fn derive_now(original_name: &str) -> Self {
        Self::derive(original_name, Utc::now())
    }

    /// Wrap an existing stored name (e.g. one read from a share URL).
    ///
    /// No validation happens here; malformed names still resolve, just to an
    /// empty display name or no timestamp.
    pub fn parse(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Millisecond timestamp encoded in the first `_`-delimited segment.
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0
            .split('_')
            .next()
            .and_then(|segment| segment.parse::<i64>().ok())
            .filter(|millis| *millis >= 0)
    }

    /// Display name: everything after the first `_`.
    pub fn display_name(&self) -> String {
        crate::links::resolve_display_name(&self.0)
    }
}

impl fmt::Display for StoredObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoredObjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
