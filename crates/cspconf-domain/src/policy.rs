use crate::engine::PolicyResolver;
use crate::error::ResolveError;
use crate::inherit;
use crate::model::{DirectiveSet, PolicyEntry, PolicyTable, SnippetTable};
use cspconf_types::{PolicyKind, RouteKey, ids};

/// Policy, report-only and snippet tables plus engine options.
///
/// Populated once through the additive setters, then shared read-only. Per-request state lives
/// in [`PolicyResolver`].
#[derive(Clone, Debug, Default)]
pub struct PolicyConfig {
    policy: PolicyTable,
    report_only: PolicyTable,
    snippets: SnippetTable,
    support_legacy_browsers: bool,
}

impl PolicyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add policies; an existing key is overwritten.
    pub fn set_policy<I, K>(&mut self, policies: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, PolicyEntry)>,
        K: AsRef<str>,
    {
        insert_policies(&mut self.policy, policies);
        self
    }

    /// Add report-only policies; an existing key is overwritten.
    pub fn set_policy_report_only<I, K>(&mut self, policies: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, PolicyEntry)>,
        K: AsRef<str>,
    {
        insert_policies(&mut self.report_only, policies);
        self
    }

    /// Add snippets; an existing name is overwritten.
    pub fn set_snippets<I, K>(&mut self, snippets: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, DirectiveSet)>,
        K: Into<String>,
    {
        for (name, directives) in snippets {
            self.snippets.insert(name.into(), directives);
        }
        self
    }

    /// Also emit `child-src` as `frame-src` for browsers that only understand CSP level 1.
    #[deprecated(note = "only CSP1 browsers need this; list frame-src explicitly instead")]
    pub fn set_support_legacy_browsers(&mut self, enabled: bool) -> &mut Self {
        self.support_legacy_browsers = enabled;
        self
    }

    pub fn supports_legacy_browsers(&self) -> bool {
        self.support_legacy_browsers
    }

    /// The wildcard segment a catch-all policy key is built from.
    pub fn default_key(&self) -> &'static str {
        ids::DEFAULT_KEY
    }

    /// The catch-all key a route falls back to (`*.*` for `products:detail`).
    ///
    /// Register a policy under this key to give every route of that depth a fallback.
    pub fn default_key_for(&self, route: &str) -> String {
        let levels = RouteKey::from_route(route).segments().len();
        RouteKey::wildcard(levels).to_string()
    }

    pub fn table(&self, kind: PolicyKind) -> &PolicyTable {
        match kind {
            PolicyKind::Enforce => &self.policy,
            PolicyKind::ReportOnly => &self.report_only,
        }
    }

    pub fn snippets(&self) -> &SnippetTable {
        &self.snippets
    }

    pub fn has_report_only(&self) -> bool {
        !self.report_only.is_empty()
    }

    /// Start a per-request resolver over these tables.
    pub fn resolver(&self) -> PolicyResolver<'_> {
        PolicyResolver::new(self)
    }

    /// Walk every inheritance chain in both tables and report the first broken one.
    pub fn validate(&self) -> Result<(), ResolveError> {
        for kind in [PolicyKind::Enforce, PolicyKind::ReportOnly] {
            let table = self.table(kind);
            for (key, entry) in table {
                inherit::resolve_entry(table, key, entry)?;
            }
        }
        Ok(())
    }
}

fn insert_policies<I, K>(table: &mut PolicyTable, policies: I)
where
    I: IntoIterator<Item = (K, PolicyEntry)>,
    K: AsRef<str>,
{
    for (key, mut entry) in policies {
        entry.extends = entry.extends.iter().map(|k| k.to_lowercase()).collect();
        table.insert(key.as_ref().to_lowercase(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{directives, entry};

    #[test]
    fn later_set_policy_calls_overwrite_same_key() {
        let mut config = PolicyConfig::new();
        config.set_policy([("*.*", entry(&[("default-src", &["'none'"])]))]);
        config.set_policy([("*.*", entry(&[("default-src", &["'self'"])]))]);

        let stored = &config.table(PolicyKind::Enforce)["*.*"];
        assert_eq!(
            stored.directives.get("default-src").unwrap().sources,
            vec!["'self'"]
        );
    }

    #[test]
    fn keys_and_parents_are_lowercased_on_insert() {
        let mut config = PolicyConfig::new();
        config.set_policy([(
            "Admin.Detail",
            entry(&[("img-src", &["'self'"])]).extending("Admin.*"),
        )]);

        let stored = &config.table(PolicyKind::Enforce)["admin.detail"];
        assert_eq!(stored.parent(), Some("admin.*"));
    }

    #[test]
    fn snippets_are_additive() {
        let mut config = PolicyConfig::new();
        config.set_snippets([("ga", directives(&[("img-src", &["https://ga.example"])]))]);
        config.set_snippets([("maps", directives(&[("img-src", &["https://maps.example"])]))]);
        assert_eq!(config.snippets().len(), 2);
    }

    #[test]
    fn validate_reports_missing_parent() {
        let mut config = PolicyConfig::new();
        config.set_policy_report_only([("*.*", entry(&[]).extending("nope.*"))]);

        assert_eq!(
            config.validate(),
            Err(ResolveError::MissingParent {
                key: "*.*".to_string(),
                parent: "nope.*".to_string(),
            })
        );
    }

    #[test]
    fn validate_reports_cycles() {
        let mut config = PolicyConfig::new();
        config.set_policy([
            ("a.*", entry(&[]).extending("b.*")),
            ("b.*", entry(&[]).extending("a.*")),
        ]);

        assert!(matches!(
            config.validate(),
            Err(ResolveError::InheritanceCycle { .. })
        ));
    }

    #[test]
    fn default_key_is_the_wildcard_segment() {
        assert_eq!(PolicyConfig::new().default_key(), "*");
    }

    #[test]
    fn default_key_for_matches_route_depth() {
        let config = PolicyConfig::new();
        assert_eq!(config.default_key_for("products:detail"), "*.*");
        assert_eq!(config.default_key_for(":Admin:Products:edit"), "*.*.*");
        assert_eq!(config.default_key_for("home"), "*");
        assert_eq!(config.default_key_for("front.v2:home"), "*.*");
    }

    #[test]
    fn policy_under_default_key_for_catches_the_route() {
        let mut config = PolicyConfig::new();
        let fallback = config.default_key_for("products:detail");
        config.set_policy([(fallback, entry(&[("default-src", &["'self'"])]))]);

        assert_eq!(
            config.resolver().header("orders:list").unwrap(),
            "default-src 'self'"
        );
    }
}
