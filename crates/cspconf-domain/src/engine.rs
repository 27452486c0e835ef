use crate::error::ResolveError;
use crate::inherit;
use crate::key;
use crate::model::DirectiveSet;
use crate::nonce::NonceSource;
use crate::policy::PolicyConfig;
use crate::render;
use crate::snippets;
use cspconf_types::{PolicyKind, RouteKey};
use std::fmt;

/// Everything that went into a header, before nonce substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub kind: PolicyKind,
    /// Route as requested by the caller.
    pub route: String,
    /// Configured key the route resolved to.
    pub key: String,
    /// Inheritance chain walked, starting with `key`.
    pub chain: Vec<String>,
    /// Snippets overlaid, in activation order.
    pub snippets: Vec<String>,
    pub directives: DirectiveSet,
}

/// Per-request view over a [`PolicyConfig`].
///
/// Owns the active-snippet list, which only grows until [`PolicyResolver::reset_snippets`] is
/// called. Create one per request; do not share it between concurrent requests.
pub struct PolicyResolver<'a> {
    config: &'a PolicyConfig,
    nonce: Option<&'a dyn NonceSource>,
    snippets: Vec<String>,
}

impl<'a> PolicyResolver<'a> {
    pub fn new(config: &'a PolicyConfig) -> Self {
        Self {
            config,
            nonce: None,
            snippets: Vec::new(),
        }
    }

    pub fn with_nonce(mut self, nonce: &'a dyn NonceSource) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Activate a snippet for every header computed from now on.
    pub fn add_snippet<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.snippets.push(name.into());
        self
    }

    pub fn active_snippets(&self) -> &[String] {
        &self.snippets
    }

    pub fn reset_snippets(&mut self) {
        self.snippets.clear();
    }

    /// `Content-Security-Policy` value for a `Module:Presenter:action` route.
    pub fn header(&self, route: &str) -> Result<String, ResolveError> {
        self.header_of(PolicyKind::Enforce, route, &RouteKey::from_route(route))
    }

    /// `Content-Security-Policy-Report-Only` value for a `Module:Presenter:action` route.
    pub fn header_report_only(&self, route: &str) -> Result<String, ResolveError> {
        self.header_of(PolicyKind::ReportOnly, route, &RouteKey::from_route(route))
    }

    /// Like [`header`](Self::header), with the presenter path and action given separately.
    pub fn header_for(&self, presenter: &str, action: &str) -> Result<String, ResolveError> {
        let route = format!("{presenter}:{action}");
        self.header_of(
            PolicyKind::Enforce,
            &route,
            &RouteKey::from_parts(presenter, action),
        )
    }

    pub fn header_report_only_for(
        &self,
        presenter: &str,
        action: &str,
    ) -> Result<String, ResolveError> {
        let route = format!("{presenter}:{action}");
        self.header_of(
            PolicyKind::ReportOnly,
            &route,
            &RouteKey::from_parts(presenter, action),
        )
    }

    /// Resolve a route to its final directive set without rendering it.
    pub fn resolve(&self, kind: PolicyKind, route: &str) -> Result<Resolution, ResolveError> {
        self.resolve_key(kind, route, &RouteKey::from_route(route))
    }

    /// Render a resolution, substituting this resolver's nonce.
    pub fn render(&self, resolution: &Resolution) -> String {
        render::render_directives(
            &resolution.directives,
            self.nonce,
            self.config.supports_legacy_browsers(),
        )
    }

    fn header_of(
        &self,
        kind: PolicyKind,
        route: &str,
        key: &RouteKey,
    ) -> Result<String, ResolveError> {
        let resolution = self.resolve_key(kind, route, key)?;
        Ok(self.render(&resolution))
    }

    fn resolve_key(
        &self,
        kind: PolicyKind,
        route: &str,
        route_key: &RouteKey,
    ) -> Result<Resolution, ResolveError> {
        let table = self.config.table(kind);
        let key = key::find_config_key(table, route_key);
        let Some(entry) = table.get(&key) else {
            return Err(ResolveError::NoMatchingPolicy {
                kind,
                route: route.to_string(),
                key,
            });
        };

        let inherited = inherit::resolve_entry(table, &key, entry)?;
        let mut directives = inherited.directives;
        snippets::inject(&mut directives, self.config.snippets(), &self.snippets)?;

        Ok(Resolution {
            kind,
            route: route.to_string(),
            key,
            chain: inherited.chain,
            snippets: self.snippets.clone(),
            directives,
        })
    }
}

impl fmt::Debug for PolicyResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyResolver")
            .field("config", &self.config)
            .field("has_nonce", &self.nonce.is_some())
            .field("snippets", &self.snippets)
            .finish()
    }
}
