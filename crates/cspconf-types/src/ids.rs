//! Stable identifiers for reserved keys, markers, and header names.
//!
//! Route keys are dotted namespaces; `*` is the wildcard segment.

// Route keys
pub const DEFAULT_KEY: &str = "*";
pub const KEY_SEPARATOR: char = '.';
pub const ROUTE_SEPARATOR: char = ':';

// Reserved directive-set keys
pub const EXTENDS_KEY: &str = "@extends";
pub const OVERRIDE_MARKER: char = '!';

// Source tokens
pub const NONCE_PLACEHOLDER: &str = "'nonce'";

// Directives with special handling
pub const DIRECTIVE_CHILD_SRC: &str = "child-src";
pub const DIRECTIVE_FRAME_SRC: &str = "frame-src";

// Headers
pub const HEADER_CSP: &str = "Content-Security-Policy";
pub const HEADER_CSP_REPORT_ONLY: &str = "Content-Security-Policy-Report-Only";

/// Render a nonce value as a CSP source token.
pub fn nonce_source(value: &str) -> String {
    format!("'nonce-{value}'")
}
