//! Fuzz target for `csp.toml` parsing and loading.
//!
//! Goal: parsing, loading and resolving a header should **never panic** on any input.
//! Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use cspconf_settings::{Overrides, parse_config_toml, resolve_config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(cfg) = parse_config_toml(text) else {
        return;
    };
    let Ok(resolved) = resolve_config(cfg, Overrides::default()) else {
        return;
    };

    let resolver = resolved.policy.resolver();
    let _ = resolver.header("front:home");
    let _ = resolver.header_report_only("admin:products:edit");
});
