use crate::model::DirectiveSet;
use crate::nonce::NonceSource;
use cspconf_types::ids;

/// Render a resolved directive set as a header value.
///
/// `'nonce'` tokens are replaced with a single nonce fetched lazily from `nonce`; without a
/// source the placeholder passes through unchanged.
pub(crate) fn render_directives(
    directives: &DirectiveSet,
    nonce: Option<&dyn NonceSource>,
    support_legacy_browsers: bool,
) -> String {
    let mut nonce_value: Option<String> = None;
    let mut rendered = RenderedDirectives::default();

    for directive in directives {
        let sources: Vec<String> = directive
            .sources
            .iter()
            .map(|source| match nonce {
                Some(provider) if source == ids::NONCE_PLACEHOLDER => {
                    let value = nonce_value.get_or_insert_with(|| provider.nonce());
                    ids::nonce_source(value)
                }
                _ => source.clone(),
            })
            .collect();

        rendered.upsert(&directive.name, render_directive(&directive.name, &sources));
        if support_legacy_browsers && directive.name == ids::DIRECTIVE_CHILD_SRC {
            rendered.upsert(
                ids::DIRECTIVE_FRAME_SRC,
                render_directive(ids::DIRECTIVE_FRAME_SRC, &sources),
            );
        }
    }

    rendered.join()
}

fn render_directive(name: &str, sources: &[String]) -> String {
    format!("{} {}", name, sources.join(" ")).trim().to_string()
}

/// Directive name -> rendered text, in first-insertion order.
#[derive(Default)]
struct RenderedDirectives(Vec<(String, String)>);

impl RenderedDirectives {
    fn upsert(&mut self, name: &str, text: String) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = text,
            None => self.0.push((name.to_string(), text)),
        }
    }

    fn join(self) -> String {
        self.0
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
