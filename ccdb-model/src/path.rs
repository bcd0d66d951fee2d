//! Path helpers for directory and table full paths
//!
//! Segments are joined with a single separator. Names containing the
//! separator are not escaped; path reconstruction is undefined for them.

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// Join a parent path and a child name with a single separator.
///
/// Duplicate separators at the joint are collapsed and an empty name
/// yields the parent unchanged, so no trailing separator is ever
/// produced. An empty parent is the empty-name root segment: combining
/// it still inserts the separator ("" + "top" is "/top").
pub fn combine(parent: &str, name: &str) -> String {
    if name.is_empty() {
        return parent.to_string();
    }
    format!(
        "{}{}{}",
        parent.trim_end_matches(PATH_SEPARATOR),
        PATH_SEPARATOR,
        name.trim_start_matches(PATH_SEPARATOR)
    )
}

/// Prefix a single leading separator if the path has none.
pub fn make_absolute(path: &str) -> String {
    if path.starts_with(PATH_SEPARATOR) {
        path.to_string()
    } else {
        format!("{}{}", PATH_SEPARATOR, path)
    }
}

// ============================================================================
// TESTS
// ============================================================================
