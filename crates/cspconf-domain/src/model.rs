use cspconf_types::ids::OVERRIDE_MARKER;
use std::collections::BTreeMap;

/// Route key -> policy entry. Keys are lowercased dotted route keys.
pub type PolicyTable = BTreeMap<String, PolicyEntry>;

/// Snippet name -> flat directive set.
pub type SnippetTable = BTreeMap<String, DirectiveSet>;

/// One configured policy: its own directives plus the keys it inherits from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyEntry {
    /// `@extends` parent keys. Only the first one is merged.
    pub extends: Vec<String>,
    pub directives: DirectiveSet,
}

impl PolicyEntry {
    pub fn new(directives: DirectiveSet) -> Self {
        Self {
            extends: Vec::new(),
            directives,
        }
    }

    pub fn extending<S: AsRef<str>>(mut self, parent: S) -> Self {
        self.extends.push(parent.as_ref().to_lowercase());
        self
    }

    pub fn parent(&self) -> Option<&str> {
        self.extends.first().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    /// Directive name with any override marker stripped.
    pub name: String,
    pub sources: Vec<String>,
    /// Set when the configured name carried the override marker.
    pub replace: bool,
}

impl Directive {
    /// Parse a configured directive name, stripping a single leading override marker.
    pub fn new<S: Into<String>>(raw_name: &str, sources: Vec<S>) -> Self {
        let (name, replace) = match raw_name.strip_prefix(OVERRIDE_MARKER) {
            Some(stripped) => (stripped, true),
            None => (raw_name, false),
        };
        Self {
            name: name.to_string(),
            sources: sources.into_iter().map(Into::into).collect(),
            replace,
        }
    }
}

/// Insertion-ordered directive map with unique names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    directives: Vec<Directive>,
}

impl DirectiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a configured (possibly marked) directive.
    pub fn with<S: Into<String>>(mut self, raw_name: &str, sources: Vec<S>) -> Self {
        self.insert(Directive::new(raw_name, sources));
        self
    }

    /// Insert a directive; an existing entry with the same name is replaced in place.
    pub fn insert(&mut self, directive: Directive) {
        match self.get_mut(&directive.name) {
            Some(existing) => *existing = directive,
            None => self.directives.push(directive),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Directive> {
        self.directives.iter_mut().find(|d| d.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.directives.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl FromIterator<Directive> for DirectiveSet {
    fn from_iter<T: IntoIterator<Item = Directive>>(iter: T) -> Self {
        let mut set = DirectiveSet::new();
        for directive in iter {
            set.insert(directive);
        }
        set
    }
}

impl<'a> IntoIterator for &'a DirectiveSet {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}
