//! Route key type - normalized lookup key for content records.
//!
//! - Internal representation: always normalized (lowercase, no extension)
//! - Browser boundary: decode percent-encoding on input

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Normalized route key (internal representation)
///
/// Invariants:
/// - Always starts with `/`
/// - Lowercase, lexically cleaned (no `.`, `..` or doubled separators)
/// - No trailing file extension, no trailing `/index` segment
/// - `normalize` is idempotent: re-normalizing a key returns it unchanged
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey(Arc<str>);

impl RouteKey {
    /// Normalize an arbitrary file-system-relative path into a route key.
    ///
    /// `/Guides/Foo.json` -> `/guides/foo`, `/Index.yml` -> `/`
    pub fn normalize(path: &str) -> Self {
        let mut cleaned = lexical_clean(path);
        cleaned.make_ascii_lowercase();

        // Strip the extension of the final segment, if any
        let segment_start = cleaned.rfind('/').map_or(0, |i| i + 1);
        if let Some(dot) = cleaned[segment_start..].rfind('.')
            && dot > 0
        {
            cleaned.truncate(segment_start + dot);
        }

        if let Some(stripped) = cleaned.strip_suffix("/index") {
            cleaned.truncate(stripped.len());
        }

        if cleaned.is_empty() {
            cleaned.push('/');
        }

        Self(Arc::from(cleaned))
    }

    /// Create from browser URL (decode percent-encoding, strip query/fragment).
    pub fn from_browser(encoded: &str) -> Self {
        use percent_encoding::percent_decode_str;
        let path = encoded.split(['?', '#']).next().unwrap_or(encoded);
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());
        Self::normalize(&decoded)
    }

    /// Get the route key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment of the route (`/lib/player` -> `player`, `/` -> `/`).
    ///
    /// Module names are derived from this, never from file contents.
    pub fn final_segment(&self) -> &str {
        match self.0.rfind('/') {
            Some(i) if i + 1 < self.0.len() => &self.0[i + 1..],
            _ => &self.0,
        }
    }
}

/// Lexically clean a rooted path: resolve `.` and `..` segments and
/// collapse repeated separators, without touching the file system.
fn lexical_clean(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut out = String::with_capacity(path.len());
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for RouteKey {
    fn default() -> Self {
        Self(Arc::from("/"))
    }
}

impl AsRef<str> for RouteKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RouteKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteKey {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl PartialEq<str> for RouteKey {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for RouteKey {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for RouteKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RouteKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::normalize(&s))
    }
}
