//! Config parsing and policy table loading.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{CspConfigV1, DirectivesConfig, SourceList};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `csp.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<CspConfigV1> {
    let cfg: CspConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Build the engine tables from a parsed config, applying overrides and validating inheritance.
pub fn resolve_config(cfg: CspConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
