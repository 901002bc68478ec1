//! Dotted namespace path utilities.
//!
//! Namespaces are dotted paths (`App.Billing.Invoice`). A leading
//! separator marks an absolute path (`.App.User` is anchored at the root
//! and never re-qualified against an enclosing namespace). These helpers
//! back the namespace resolver and the coupling predicates used by
//! downstream readers.

use smol_str::SmolStr;

/// Namespace segment separator.
pub const SEPARATOR: char = '.';

/// True if the name carries the absolute-path marker (a leading
/// separator).
pub fn is_absolute(name: &str) -> bool {
    name.starts_with(SEPARATOR)
}

/// Split a dotted path into its segments. Empty input yields no segments.
pub fn split_namespace(path: &str) -> Vec<SmolStr> {
    path.trim_start_matches(SEPARATOR)
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(SmolStr::from)
        .collect()
}

/// Join an enclosing namespace and a simple name into a qualified name.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{SEPARATOR}{name}")
    }
}

/// Resolve a name against an enclosing namespace.
///
/// Absolute names (leading separator) pass through with the marker
/// stripped; the marker is syntax, not part of the canonical name.
/// Everything else is qualified under the enclosing namespace, which may
/// be empty for top-level definitions.
pub fn resolve_name(name: &str, enclosing: &str) -> String {
    if is_absolute(name) {
        name.trim_start_matches(SEPARATOR).to_string()
    } else {
        qualify(enclosing, name)
    }
}

/// The final segment of a qualified name.
pub fn simple_name(fqname: &str) -> SmolStr {
    fqname
        .rsplit(SEPARATOR)
        .next()
        .map(SmolStr::from)
        .unwrap_or_default()
}

/// Nesting depth of a qualified name (number of segments).
pub fn namespace_depth(fqname: &str) -> usize {
    split_namespace(fqname).len()
}

/// Longest shared namespace prefix of two qualified names, as segments.
pub fn common_prefix(a: &str, b: &str) -> Vec<SmolStr> {
    split_namespace(a)
        .into_iter()
        .zip(split_namespace(b))
        .take_while(|(left, right)| left == right)
        .map(|(left, _)| left)
        .collect()
}

/// True if `inner` is nested (at any depth) inside the namespace `outer`.
pub fn is_nested_within(inner: &str, outer: &str) -> bool {
    if outer.is_empty() {
        return !inner.is_empty();
    }
    inner
        .strip_prefix(outer)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}
