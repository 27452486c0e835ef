//! Pure Content-Security-Policy resolution (no IO).
//!
//! Input: policy, report-only and snippet tables constructed elsewhere, plus an optional nonce
//! source.
//! Output: the header value for a route, or a typed configuration error.

#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod nonce;
pub mod policy;

mod engine;
mod inherit;
mod key;
mod render;
mod snippets;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod test_support;

pub use engine::{PolicyResolver, Resolution};
pub use error::ResolveError;
pub use model::{Directive, DirectiveSet, PolicyEntry, PolicyTable, SnippetTable};
pub use nonce::{FixedNonce, NonceSource};
pub use policy::PolicyConfig;
