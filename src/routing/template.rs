//! Path template helpers.
//!
//! Templates use `{name}` placeholders, the same syntax the host router
//! matches on, so templates are only normalized here and never parsed into
//! matchers.

/// Normalize a path template: leading `/`, no trailing `/`, no empty segments.
///
/// `contacts//{id}/` becomes `/contacts/{id}`; an empty template becomes `/`.
pub fn normalize_path(path: &str) -> String {
    let joined = segments(path).collect::<Vec<_>>().join("/");
    format!("/{joined}")
}

/// Non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Placeholder name if `segment` is `{name}`.
pub fn placeholder(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}

/// Placeholder names of a template, in order.
pub fn placeholders(path: &str) -> Vec<&str> {
    segments(path).filter_map(placeholder).collect()
}

/// Uppercase the first character.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character.
pub fn lower_capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
