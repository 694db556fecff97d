//! Dotted-path helpers.
//!
//! Paths are plain `a.b.C` strings. The empty string is the root (and the
//! default package).

pub const SEPARATOR: char = '.';

pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// A path is valid when it is empty or has no empty segments.
pub fn is_valid(path: &str) -> bool {
    path.is_empty() || path.split(SEPARATOR).all(|s| !s.trim().is_empty())
}

pub fn is_single_segment(name: &str) -> bool {
    !name.is_empty() && !name.contains(SEPARATOR)
}

pub fn first_segment(name: &str) -> &str {
    name.split(SEPARATOR).next().unwrap_or(name)
}

pub fn last_segment(name: &str) -> &str {
    name.rsplit(SEPARATOR).next().unwrap_or(name)
}

/// `join("p", "Foo") == "p.Foo"`, `join("", "Foo") == "Foo"`.
pub fn join(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (_, true) => prefix.to_string(),
        _ => format!("{}{}{}", prefix, SEPARATOR, name),
    }
}

/// Split into (parent path, last segment). `split_last("Foo") == ("", "Foo")`.
pub fn split_last(path: &str) -> (&str, &str) {
    match path.rfind(SEPARATOR) {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => ("", path),
    }
}

/// Replace the first segment of `name` by `replacement`.
///
/// Used to merge a reference with a single import:
/// `replace_first_segment("Map.Entry", "java.util.Map") == "java.util.Map.Entry"`.
pub fn replace_first_segment(name: &str, replacement: &str) -> String {
    match name.find(SEPARATOR) {
        Some(pos) => format!("{}{}", replacement, &name[pos..]),
        None => replacement.to_string(),
    }
}
