//! Route-aware Content-Security-Policy resolution.
//!
//! Policies are keyed by dotted route namespaces (`admin.products.*`), may extend one another
//! through `@extends`, and can be extended per request with named snippets. `'nonce'`
//! placeholders are filled from a [`NonceSource`] at render time.
//!
//! ```
//! use cspconf::{DirectiveSet, FixedNonce, PolicyConfig, PolicyEntry};
//!
//! let mut config = PolicyConfig::new();
//! config
//!     .set_policy([
//!         ("*.*", PolicyEntry::new(DirectiveSet::new().with("default-src", vec!["'none'"]))),
//!         (
//!             "products.detail",
//!             PolicyEntry::new(DirectiveSet::new().with("script-src", vec!["'self'", "'nonce'"])),
//!         ),
//!     ])
//!     .set_snippets([(
//!         "ga",
//!         DirectiveSet::new().with("img-src", vec!["https://www.google-analytics.com"]),
//!     )]);
//!
//! let nonce = FixedNonce::new("r4nd0m");
//! let mut resolver = config.resolver().with_nonce(&nonce);
//! resolver.add_snippet("ga");
//!
//! assert_eq!(
//!     resolver.header("Products:detail").unwrap(),
//!     "script-src 'self' 'nonce-r4nd0m'; img-src https://www.google-analytics.com"
//! );
//! assert_eq!(
//!     resolver.header("front:home").unwrap(),
//!     "default-src 'none'; img-src https://www.google-analytics.com"
//! );
//! ```

#![forbid(unsafe_code)]

pub use cspconf_domain::*;
pub use cspconf_types::{PolicyKind, RouteKey, ids};
