//! Configuration errors raised while resolving a policy.

use cspconf_types::PolicyKind;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no {kind} policy matches route '{route}' (tried down to '{key}')")]
    NoMatchingPolicy {
        kind: PolicyKind,
        route: String,
        key: String,
    },

    #[error("policy '{key}' extends unknown policy '{parent}'")]
    MissingParent { key: String, parent: String },

    #[error("policy inheritance cycle: {}", chain.join(" -> "))]
    InheritanceCycle { chain: Vec<String> },

    #[error("unknown snippet '{name}'")]
    MissingSnippet { name: String },
}
