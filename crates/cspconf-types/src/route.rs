use crate::ids::{DEFAULT_KEY, KEY_SEPARATOR, ROUTE_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical dotted route key used to select a policy.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always lower case
/// - segments joined with `.`
/// - `*` is the wildcard segment
///
/// A route identifier such as `:Admin:Products:detail` becomes `admin.products.detail`. The
/// segment list is kept as parsed, so a segment containing `.` still counts as one level.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct RouteKey {
    key: String,
    segments: Vec<String>,
}

impl RouteKey {
    /// Normalize an already dotted key (as written in config).
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let normalized = s.as_ref().trim().to_lowercase();
        Self::from_segments(normalized.split(KEY_SEPARATOR))
    }

    /// Build a key from a `:`-delimited route identifier.
    pub fn from_route(route: &str) -> Self {
        Self::from_segments(split_route(route))
    }

    /// Build a key from a `:`-delimited presenter path plus a trailing action segment.
    pub fn from_parts(presenter: &str, action: &str) -> Self {
        let mut segments = split_route(presenter);
        segments.push(action.to_string());
        Self::from_segments(segments)
    }

    /// Build a key from raw segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .collect();
        let key = segments.join(&KEY_SEPARATOR.to_string());
        Self { key, segments }
    }

    /// The fully wildcarded key with `count` segments (`*.*` for two).
    pub fn wildcard(count: usize) -> Self {
        Self::from_segments(std::iter::repeat_n(DEFAULT_KEY, count.max(1)))
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn segments(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }

    pub fn is_wildcard(&self) -> bool {
        self.segments.iter().all(|s| s == DEFAULT_KEY)
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl From<&str> for RouteKey {
    fn from(value: &str) -> Self {
        RouteKey::new(value)
    }
}

impl From<String> for RouteKey {
    fn from(value: String) -> Self {
        RouteKey::new(value)
    }
}

impl From<RouteKey> for String {
    fn from(value: RouteKey) -> Self {
        value.key
    }
}

fn split_route(route: &str) -> Vec<String> {
    route
        .trim()
        .trim_matches(ROUTE_SEPARATOR)
        .split(ROUTE_SEPARATOR)
        .map(str::to_string)
        .collect()
}
