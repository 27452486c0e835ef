//! The `header` use case: compute header values for one route.

use anyhow::Context;
use cspconf_domain::{FixedNonce, NonceSource};
use cspconf_render::RenderableHeader;
use cspconf_settings::Overrides;
use cspconf_types::PolicyKind;

use crate::load::load_policy;
use crate::nonce::RandomNonce;

/// Where the nonce for `'nonce'` placeholders comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NonceMode {
    /// Generate a fresh random nonce for this computation.
    #[default]
    Random,
    /// Use a caller-supplied value.
    Fixed(String),
    /// Leave `'nonce'` placeholders untouched.
    Disabled,
}

/// Input for the header use case.
#[derive(Clone, Debug)]
pub struct HeaderInput<'a> {
    /// Config file contents.
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// `Module:Presenter:action` route identifier.
    pub route: &'a str,
    /// Snippets to activate, in order.
    pub snippets: Vec<String>,
    /// Only compute the report-only header.
    pub report_only: bool,
    pub nonce: NonceMode,
}

/// Output from the header use case.
#[derive(Clone, Debug)]
pub struct HeaderOutput {
    pub headers: Vec<RenderableHeader>,
    /// The nonce shared by all headers, unless disabled.
    pub nonce: Option<String>,
}

/// Compute the enforcing header (plus the report-only one when configured), or only the
/// report-only header. All headers share one nonce.
pub fn run_header(input: HeaderInput<'_>) -> anyhow::Result<HeaderOutput> {
    let policy = load_policy(input.config_text, input.overrides.clone())?;

    let nonce = match &input.nonce {
        // One draw shared by every header of this computation.
        NonceMode::Random => Some(FixedNonce::new(RandomNonce.nonce())),
        NonceMode::Fixed(value) => Some(FixedNonce::new(value.clone())),
        NonceMode::Disabled => None,
    };

    let mut resolver = policy.resolver();
    if let Some(nonce) = &nonce {
        resolver = resolver.with_nonce(nonce);
    }
    for snippet in &input.snippets {
        resolver.add_snippet(snippet.clone());
    }

    let kinds = if input.report_only {
        vec![PolicyKind::ReportOnly]
    } else if policy.has_report_only() {
        vec![PolicyKind::Enforce, PolicyKind::ReportOnly]
    } else {
        vec![PolicyKind::Enforce]
    };

    let mut headers = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let resolution = resolver
            .resolve(kind, input.route)
            .with_context(|| format!("resolve {kind} policy for route '{}'", input.route))?;
        tracing::debug!(
            route = input.route,
            kind = %kind,
            key = %resolution.key,
            chain = ?resolution.chain,
            "resolved policy"
        );
        headers.push(RenderableHeader {
            kind,
            value: resolver.render(&resolution),
        });
    }

    Ok(HeaderOutput {
        headers,
        nonce: nonce.map(|n| n.as_str().to_string()),
    })
}
