use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which policy table a header is computed from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Enforce,
    ReportOnly,
}

impl PolicyKind {
    pub fn header_name(self) -> &'static str {
        match self {
            PolicyKind::Enforce => ids::HEADER_CSP,
            PolicyKind::ReportOnly => ids::HEADER_CSP_REPORT_ONLY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Enforce => "enforce",
            PolicyKind::ReportOnly => "report_only",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_match_the_wire_names() {
        assert_eq!(PolicyKind::Enforce.header_name(), "Content-Security-Policy");
        assert_eq!(
            PolicyKind::ReportOnly.header_name(),
            "Content-Security-Policy-Report-Only"
        );
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&PolicyKind::ReportOnly).unwrap();
        assert_eq!(json, "\"report_only\"");
    }
}
