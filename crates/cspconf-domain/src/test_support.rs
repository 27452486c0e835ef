use crate::model::{DirectiveSet, PolicyEntry, PolicyTable};

pub fn directives(spec: &[(&str, &[&str])]) -> DirectiveSet {
    spec.iter()
        .fold(DirectiveSet::new(), |set, (name, sources)| {
            set.with(name, sources.to_vec())
        })
}

pub fn entry(spec: &[(&str, &[&str])]) -> PolicyEntry {
    PolicyEntry::new(directives(spec))
}

pub fn table(entries: Vec<(&str, PolicyEntry)>) -> PolicyTable {
    entries
        .into_iter()
        .map(|(key, entry)| (key.to_string(), entry))
        .collect()
}
