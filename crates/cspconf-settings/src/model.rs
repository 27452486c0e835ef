use schemars::JsonSchema;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// `csp.toml` schema v1: policies keyed by dotted route keys, `*` as the wildcard segment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CspConfigV1 {
    /// Optional schema string for tooling (`cspconf.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Deprecated: also emit `child-src` as `frame-src` for CSP level 1 browsers.
    #[serde(default)]
    pub support_legacy_browsers: bool,

    /// Named partial directive sets callers can add to a header.
    #[serde(default)]
    #[schemars(with = "BTreeMap<String, BTreeMap<String, SourceList>>")]
    pub snippets: BTreeMap<String, DirectivesConfig>,

    /// Route key -> directives for `Content-Security-Policy`.
    #[schemars(with = "BTreeMap<String, BTreeMap<String, SourceList>>")]
    pub policies: BTreeMap<String, DirectivesConfig>,

    /// Route key -> directives for `Content-Security-Policy-Report-Only`.
    #[serde(default)]
    #[schemars(with = "BTreeMap<String, BTreeMap<String, SourceList>>")]
    pub policies_report_only: BTreeMap<String, DirectivesConfig>,
}

/// A directive value: one source, or a list of sources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SourceList {
    One(String),
    Many(Vec<String>),
}

impl SourceList {
    /// Normalize to a token list. A bare string is one opaque token; an empty one is no token.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            SourceList::One(s) if s.is_empty() => Vec::new(),
            SourceList::One(s) => vec![s],
            SourceList::Many(v) => v,
        }
    }
}

/// Directive name -> sources, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectivesConfig(pub Vec<(String, SourceList)>);

impl DirectivesConfig {
    pub fn iter(&self) -> impl Iterator<Item = &(String, SourceList)> {
        self.0.iter()
    }
}

impl IntoIterator for DirectivesConfig {
    type Item = (String, SourceList);
    type IntoIter = std::vec::IntoIter<(String, SourceList)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for DirectivesConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, sources) in &self.0 {
            map.serialize_entry(name, sources)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DirectivesConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DirectivesVisitor;

        impl<'de> Visitor<'de> for DirectivesVisitor {
            type Value = DirectivesConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of directive names to a source or list of sources")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, SourceList>()? {
                    entries.push(entry);
                }
                Ok(DirectivesConfig(entries))
            }
        }

        deserializer.deserialize_map(DirectivesVisitor)
    }
}
