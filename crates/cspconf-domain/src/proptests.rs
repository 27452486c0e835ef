//! Property-based tests for the resolution engine.
//!
//! These tests use proptest to verify invariants around:
//! - key resolution always landing on a configured key
//! - snippet activation order
//! - rendering determinism and nonce substitution

use crate::model::{DirectiveSet, PolicyEntry};
use crate::nonce::FixedNonce;
use crate::policy::PolicyConfig;
use crate::test_support::{directives, entry};
use cspconf_types::{PolicyKind, RouteKey};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Route segments as they appear in presenter paths and action names.
fn arb_segment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,7}").unwrap()
}

fn arb_route() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_segment(), 1..5)
}

fn arb_directive_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("default-src".to_string()),
        Just("script-src".to_string()),
        Just("style-src".to_string()),
        Just("img-src".to_string()),
        Just("connect-src".to_string()),
        Just("upgrade-insecure-requests".to_string()),
    ]
}

fn arb_source() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("'self'".to_string()),
        Just("'none'".to_string()),
        Just("'nonce'".to_string()),
        Just("'unsafe-inline'".to_string()),
        prop::string::string_regex("https://[a-z]{1,8}\\.example").unwrap(),
    ]
}

fn arb_directive_set() -> impl Strategy<Value = DirectiveSet> {
    prop::collection::vec(
        (arb_directive_name(), prop::collection::vec(arb_source(), 0..4)),
        0..6,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .fold(DirectiveSet::new(), |set, (name, sources)| {
                set.with(&name, sources)
            })
    })
}

/// A partial wildcarding of a route: some suffix of segments replaced by `*`.
fn wildcard_suffix(route: &[String], keep: usize) -> String {
    route
        .iter()
        .enumerate()
        .map(|(i, s)| if i < keep { s.to_lowercase() } else { "*".to_string() })
        .collect::<Vec<_>>()
        .join(".")
}

proptest! {
    /// With a catch-all entry configured, every route resolves to a configured key.
    #[test]
    fn resolved_key_always_exists(
        route in arb_route(),
        keep in 0usize..5,
        set in arb_directive_set(),
    ) {
        let mut config = PolicyConfig::new();
        config.set_policy([
            (RouteKey::wildcard(route.len()).to_string(), PolicyEntry::new(set.clone())),
            (wildcard_suffix(&route, keep.min(route.len())), PolicyEntry::new(set)),
        ]);

        let resolution = config
            .resolver()
            .resolve(PolicyKind::Enforce, &route.join(":"))
            .unwrap();
        prop_assert!(config.table(PolicyKind::Enforce).contains_key(&resolution.key));
    }

    /// The most specific configured wildcarding is the one picked.
    #[test]
    fn most_specific_key_wins(route in arb_route(), keep in 0usize..5) {
        let keep = keep.min(route.len());
        let mut config = PolicyConfig::new();
        config.set_policy([
            (RouteKey::wildcard(route.len()).to_string(), entry(&[])),
            (wildcard_suffix(&route, keep), entry(&[])),
        ]);

        let resolution = config
            .resolver()
            .resolve(PolicyKind::Enforce, &route.join(":"))
            .unwrap();
        prop_assert_eq!(resolution.key, wildcard_suffix(&route, keep));
    }

    /// Shared directive tokens follow activation order: base, then A, then B.
    #[test]
    fn snippet_tokens_follow_activation_order(
        base in prop::collection::vec(arb_source(), 0..3),
        a in prop::collection::vec(arb_source(), 1..3),
        b in prop::collection::vec(arb_source(), 1..3),
    ) {
        let mut config = PolicyConfig::new();
        config
            .set_policy([("*", PolicyEntry::new(DirectiveSet::new().with("script-src", base.clone())))])
            .set_snippets([
                ("a", DirectiveSet::new().with("script-src", a.clone())),
                ("b", DirectiveSet::new().with("script-src", b.clone())),
            ]);

        let mut resolver = config.resolver();
        resolver.add_snippet("a").add_snippet("b");
        let resolution = resolver.resolve(PolicyKind::Enforce, "home").unwrap();

        let expected: Vec<String> = base.into_iter().chain(a).chain(b).collect();
        prop_assert_eq!(&resolution.directives.get("script-src").unwrap().sources, &expected);
    }

    /// Rendering twice with the same nonce and session yields identical bytes.
    #[test]
    fn rendering_is_deterministic(set in arb_directive_set(), nonce in "[A-Za-z0-9+/]{8,24}") {
        let mut config = PolicyConfig::new();
        config.set_policy([("*", PolicyEntry::new(set))]);
        let nonce = FixedNonce::new(nonce);
        let resolver = config.resolver().with_nonce(&nonce);

        prop_assert_eq!(resolver.header("home").unwrap(), resolver.header("home").unwrap());
    }

    /// The placeholder never survives rendering when a nonce source is attached, and the
    /// output never carries separators at its edges.
    #[test]
    fn rendered_output_is_well_formed(set in arb_directive_set()) {
        let mut config = PolicyConfig::new();
        config.set_policy([("*", PolicyEntry::new(set.clone()))]);
        let nonce = FixedNonce::new("abc");
        let header = config.resolver().with_nonce(&nonce).header("home").unwrap();

        prop_assert!(!header.contains("'nonce'"));
        prop_assert!(!header.ends_with(';'));
        prop_assert!(!header.starts_with(' '));
        prop_assert!(!header.ends_with(' '));
        prop_assert_eq!(header.split("; ").filter(|s| !s.is_empty()).count(), set.len());
        if set.iter().any(|d| d.sources.iter().any(|s| s == "'nonce'")) {
            prop_assert!(header.contains("'nonce-abc'"));
        }
    }
}

#[test]
fn wildcard_fallback_example() {
    let mut config = PolicyConfig::new();
    config.set_policy([("*.*", entry(&[("default-src", &["'self'"])]))]);
    assert_eq!(
        config.resolver().header("admin:delete").unwrap(),
        "default-src 'self'"
    );
}

#[test]
fn inheritance_example() {
    let mut config = PolicyConfig::new();
    config.set_policy([
        ("a", entry(&[("script-src", &["x"])]).extending("b")),
        ("b", entry(&[("script-src", &["y"]), ("style-src", &["z"])])),
    ]);
    let header = config.resolver().header("a").unwrap();
    assert_eq!(header, "script-src y x; style-src z");
}

#[test]
fn snippet_directive_is_added_when_base_lacks_it() {
    let mut config = PolicyConfig::new();
    config
        .set_policy([("*", entry(&[("default-src", &["'none'"])]))])
        .set_snippets([("fonts", directives(&[("font-src", &["https://fonts.example"])]))]);
    let mut resolver = config.resolver();
    resolver.add_snippet("fonts");
    assert_eq!(
        resolver.header("home").unwrap(),
        "default-src 'none'; font-src https://fonts.example"
    );
}
