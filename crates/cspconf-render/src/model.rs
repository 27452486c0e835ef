use cspconf_types::PolicyKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableHeader {
    pub kind: PolicyKind,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableDirective {
    pub name: String,
    pub sources: Vec<String>,
    pub replace: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableResolution {
    pub kind: PolicyKind,
    pub route: String,
    pub key: String,
    pub chain: Vec<String>,
    pub snippets: Vec<String>,
    pub directives: Vec<RenderableDirective>,
    /// Final header value, nonce substituted.
    pub header: String,
}
