//! Use case orchestration for cspconf.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! and render layers. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod explain;
mod header;
mod load;
mod nonce;

pub use explain::{ExplainInput, run_explain, to_renderable};
pub use header::{HeaderInput, HeaderOutput, NonceMode, run_header};
pub use load::load_policy;
pub use nonce::{RandomNonce, generate_nonce};
