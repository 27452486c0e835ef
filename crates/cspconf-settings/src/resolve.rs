use crate::model::{CspConfigV1, DirectivesConfig};
use anyhow::Context;
use cspconf_domain::{Directive, DirectiveSet, PolicyConfig, PolicyEntry};
use cspconf_types::ids;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub support_legacy_browsers: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub policy: PolicyConfig,
}

pub fn resolve_config(cfg: CspConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let mut policy = PolicyConfig::new();

    policy
        .set_policy(policy_entries(cfg.policies))
        .set_policy_report_only(policy_entries(cfg.policies_report_only))
        .set_snippets(
            cfg.snippets
                .into_iter()
                .map(|(name, directives)| {
                    let set = snippet_directives(&name, directives);
                    (name, set)
                }),
        );

    let legacy = overrides
        .support_legacy_browsers
        .unwrap_or(cfg.support_legacy_browsers);
    if legacy {
        tracing::warn!(
            "support_legacy_browsers is deprecated: it only helps browsers limited to CSP level 1; \
             add frame-src with the child-src sources to your policy instead"
        );
        #[allow(deprecated)]
        policy.set_support_legacy_browsers(true);
    }

    policy.validate().context("invalid policy inheritance")?;

    Ok(ResolvedConfig { policy })
}

fn policy_entries(
    policies: BTreeMap<String, DirectivesConfig>,
) -> impl Iterator<Item = (String, PolicyEntry)> {
    policies.into_iter().map(|(key, directives)| {
        let entry = policy_entry(&key, directives);
        (key, entry)
    })
}

fn policy_entry(key: &str, directives: DirectivesConfig) -> PolicyEntry {
    let mut entry = PolicyEntry::default();
    for (name, sources) in directives {
        if name == ids::EXTENDS_KEY {
            entry.extends = sources.into_vec();
            if entry.extends.len() > 1 {
                tracing::warn!(
                    policy = key,
                    parents = ?entry.extends,
                    "only the first @extends parent is merged; the rest are ignored"
                );
            }
        } else {
            entry.directives.insert(Directive::new(&name, sources.into_vec()));
        }
    }
    entry
}

fn snippet_directives(name: &str, directives: DirectivesConfig) -> DirectiveSet {
    let mut set = DirectiveSet::new();
    for (directive, sources) in directives {
        if directive == ids::EXTENDS_KEY {
            tracing::warn!(snippet = name, "snippets cannot extend other sets; @extends ignored");
            continue;
        }
        set.insert(Directive::new(&directive, sources.into_vec()));
    }
    set
}
