use crate::model::PolicyTable;
use cspconf_types::{RouteKey, ids};

/// Find the most specific configured key for a route.
///
/// Walks from the rightmost segment leftwards, replacing each segment with the wildcard until a
/// configured key matches. Returns the fully wildcarded key when nothing matched; the caller
/// decides whether that key exists.
pub(crate) fn find_config_key(table: &PolicyTable, route: &RouteKey) -> String {
    let mut parts: Vec<&str> = route.segments();
    for i in (0..parts.len()).rev() {
        let candidate = join(&parts);
        if table.contains_key(&candidate) {
            return candidate;
        }
        parts[i] = ids::DEFAULT_KEY;
    }
    join(&parts)
}

fn join(parts: &[&str]) -> String {
    parts.join(&ids::KEY_SEPARATOR.to_string())
}
