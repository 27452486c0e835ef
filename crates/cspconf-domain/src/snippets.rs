use crate::error::ResolveError;
use crate::model::{DirectiveSet, SnippetTable};

/// Overlay active snippets onto a resolved directive set, in activation order.
///
/// Tokens for an existing directive are appended; a directive marked with the override marker
/// keeps its tokens and ignores snippet contributions.
pub(crate) fn inject(
    base: &mut DirectiveSet,
    snippets: &SnippetTable,
    active: &[String],
) -> Result<(), ResolveError> {
    for name in active {
        let snippet = snippets
            .get(name)
            .ok_or_else(|| ResolveError::MissingSnippet { name: name.clone() })?;
        for directive in snippet {
            match base.get_mut(&directive.name) {
                Some(existing) if existing.replace => {}
                Some(existing) => existing.sources.extend(directive.sources.iter().cloned()),
                None => base.insert(directive.clone()),
            }
        }
    }
    Ok(())
}
