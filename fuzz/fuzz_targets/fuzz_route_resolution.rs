//! Fuzz target for route key resolution against arbitrary policy tables.
//!
//! Goal: resolution should **never panic**, even with inheritance cycles, missing parents or
//! unknown snippets. Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_route_resolution
//! ```

#![no_main]

use arbitrary::Arbitrary;
use cspconf_domain::{DirectiveSet, FixedNonce, PolicyConfig, PolicyEntry};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct PolicyInput {
    key: String,
    extends: Option<String>,
    directives: Vec<(String, Vec<String>)>,
}

#[derive(Arbitrary, Debug)]
struct ResolutionInput {
    policies: Vec<PolicyInput>,
    snippets: Vec<(String, Vec<(String, Vec<String>)>)>,
    active: Vec<String>,
    route: String,
    nonce: String,
    legacy: bool,
}

fn directive_set(directives: Vec<(String, Vec<String>)>) -> DirectiveSet {
    directives
        .into_iter()
        .fold(DirectiveSet::new(), |set, (name, sources)| set.with(&name, sources))
}

fuzz_target!(|input: ResolutionInput| {
    if input.policies.len() > 32 || input.snippets.len() > 16 || input.active.len() > 16 {
        return;
    }

    let mut config = PolicyConfig::new();
    config.set_policy(input.policies.into_iter().map(|p| {
        let mut entry = PolicyEntry::new(directive_set(p.directives));
        if let Some(parent) = p.extends {
            entry = entry.extending(parent);
        }
        (p.key, entry)
    }));
    config.set_snippets(
        input
            .snippets
            .into_iter()
            .map(|(name, directives)| (name, directive_set(directives))),
    );
    #[allow(deprecated)]
    config.set_support_legacy_browsers(input.legacy);

    let _ = config.validate();

    let nonce = FixedNonce::new(input.nonce);
    let mut resolver = config.resolver().with_nonce(&nonce);
    for name in input.active {
        resolver.add_snippet(name);
    }
    let _ = resolver.header(&input.route);
    let _ = resolver.header_report_only(&input.route);
});
