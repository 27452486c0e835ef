use crate::error::ResolveError;
use crate::model::{DirectiveSet, PolicyEntry, PolicyTable};

/// A policy with its `@extends` chain folded in.
#[derive(Clone, Debug)]
pub(crate) struct Inherited {
    pub directives: DirectiveSet,
    /// Keys walked, starting with the resolved key itself.
    pub chain: Vec<String>,
}

/// Fold the inheritance chain of `entry` (stored under `key`) into one directive set.
///
/// Only the first parent of each `@extends` list is followed.
pub(crate) fn resolve_entry(
    table: &PolicyTable,
    key: &str,
    entry: &PolicyEntry,
) -> Result<Inherited, ResolveError> {
    let mut chain = vec![key.to_string()];
    let mut directives = entry.directives.clone();
    let mut next = entry.parent();

    while let Some(parent_key) = next {
        if chain.iter().any(|k| k == parent_key) {
            chain.push(parent_key.to_string());
            return Err(ResolveError::InheritanceCycle { chain });
        }
        let Some(parent) = table.get(parent_key) else {
            return Err(ResolveError::MissingParent {
                key: chain.last().cloned().unwrap_or_default(),
                parent: parent_key.to_string(),
            });
        };
        chain.push(parent_key.to_string());
        directives = merge(&directives, &parent.directives);
        next = parent.parent();
    }

    Ok(Inherited { directives, chain })
}

/// Merge a child directive set over its parent.
///
/// Parent order comes first; directives only the child defines follow. Shared directives
/// concatenate parent tokens then child tokens, unless the child carries the override marker.
pub(crate) fn merge(child: &DirectiveSet, parent: &DirectiveSet) -> DirectiveSet {
    let mut merged = parent.clone();
    for directive in child {
        match merged.get_mut(&directive.name) {
            Some(existing) => {
                if directive.replace {
                    existing.sources = directive.sources.clone();
                } else {
                    existing.sources.extend(directive.sources.iter().cloned());
                }
                existing.replace |= directive.replace;
            }
            None => merged.insert(directive.clone()),
        }
    }
    merged
}
