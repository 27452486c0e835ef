use anyhow::Context;
use cspconf_domain::PolicyConfig;
use cspconf_settings::Overrides;

/// Parse config text and build validated engine tables.
pub fn load_policy(config_text: &str, overrides: Overrides) -> anyhow::Result<PolicyConfig> {
    let cfg = cspconf_settings::parse_config_toml(config_text).context("parse config")?;
    let resolved = cspconf_settings::resolve_config(cfg, overrides).context("resolve config")?;
    tracing::debug!(
        policies = resolved.policy.table(cspconf_types::PolicyKind::Enforce).len(),
        report_only = resolved.policy.table(cspconf_types::PolicyKind::ReportOnly).len(),
        snippets = resolved.policy.snippets().len(),
        "loaded policy config"
    );
    Ok(resolved.policy)
}
