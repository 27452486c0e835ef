//! Per-response nonce generation.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use cspconf_domain::NonceSource;
use rand::RngCore;

/// Random bytes per nonce (128 bits).
const NONCE_BYTES: usize = 16;

/// Generate a fresh nonce: random bytes, base64 encoded.
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Nonce source that draws a fresh value from [`generate_nonce`] on every call.
///
/// The renderer asks once per header, so each header gets its own nonce. Use a
/// [`FixedNonce`](cspconf_domain::FixedNonce) when several headers must share one.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn nonce(&self) -> String {
        generate_nonce()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cspconf_domain::{DirectiveSet, PolicyConfig, PolicyEntry};

    #[test]
    fn nonces_are_base64_of_sixteen_bytes() {
        let nonce = generate_nonce();
        assert_eq!(nonce.len(), 24);
        assert_eq!(STANDARD.decode(&nonce).unwrap().len(), NONCE_BYTES);
    }

    #[test]
    fn nonces_differ_between_calls() {
        assert_ne!(generate_nonce(), generate_nonce());
    }

    #[test]
    fn random_source_fills_every_placeholder_with_one_value() {
        let mut config = PolicyConfig::new();
        config.set_policy([(
            "*",
            PolicyEntry::new(
                DirectiveSet::new()
                    .with("script-src", vec!["'nonce'"])
                    .with("style-src", vec!["'nonce'"]),
            ),
        )]);
        let source = RandomNonce;
        let resolver = config.resolver().with_nonce(&source);

        let header = resolver.header("home").unwrap();
        let (script, style) = header.split_once("; ").unwrap();
        let nonce = script.strip_prefix("script-src ").unwrap();
        assert!(nonce.starts_with("'nonce-") && nonce.ends_with('\''));
        assert_eq!(style, format!("style-src {nonce}"));

        assert_ne!(resolver.header("home").unwrap(), header);
    }
}
