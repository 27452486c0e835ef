//! The `explain` use case: show how a route's policy was assembled.

use anyhow::Context;
use cspconf_domain::Resolution;
use cspconf_render::{RenderableDirective, RenderableResolution};
use cspconf_settings::Overrides;
use cspconf_types::PolicyKind;

use crate::load::load_policy;

#[derive(Clone, Debug)]
pub struct ExplainInput<'a> {
    pub config_text: &'a str,
    pub overrides: Overrides,
    pub route: &'a str,
    pub snippets: Vec<String>,
    pub kind: PolicyKind,
}

/// Resolve a route without a nonce source; `'nonce'` placeholders stay visible.
pub fn run_explain(input: ExplainInput<'_>) -> anyhow::Result<RenderableResolution> {
    let policy = load_policy(input.config_text, input.overrides.clone())?;

    let mut resolver = policy.resolver();
    for snippet in &input.snippets {
        resolver.add_snippet(snippet.clone());
    }

    let resolution = resolver
        .resolve(input.kind, input.route)
        .with_context(|| format!("resolve {} policy for route '{}'", input.kind, input.route))?;
    let header = resolver.render(&resolution);
    Ok(to_renderable(&resolution, header))
}

pub fn to_renderable(resolution: &Resolution, header: String) -> RenderableResolution {
    RenderableResolution {
        kind: resolution.kind,
        route: resolution.route.clone(),
        key: resolution.key.clone(),
        chain: resolution.chain.clone(),
        snippets: resolution.snippets.clone(),
        directives: resolution
            .directives
            .iter()
            .map(|d| RenderableDirective {
                name: d.name.clone(),
                sources: d.sources.clone(),
                replace: d.replace,
            })
            .collect(),
        header,
    }
}
