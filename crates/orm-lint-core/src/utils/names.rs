//! Helpers for backslash-separated qualified names.

/// Namespace separator.
pub const SEPARATOR: char = '\\';

/// Normalizes a written name: drops whitespace and any leading separator.
///
/// # Examples
///
/// ```
/// use orm_lint_core::utils::names::normalize;
///
/// assert_eq!(normalize("\\Doctrine\\ORM\\Mapping\\Id"), "Doctrine\\ORM\\Mapping\\Id");
/// assert_eq!(normalize(" dump "), "dump");
/// ```
#[must_use]
pub fn normalize(name: &str) -> String {
    let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    compact.trim_start_matches(SEPARATOR).to_string()
}

/// Returns `true` if the written name starts with a separator.
#[must_use]
pub fn is_fully_qualified(name: &str) -> bool {
    name.trim_start().starts_with(SEPARATOR)
}

/// Extracts the last segment of a qualified name.
///
/// # Examples
///
/// ```
/// use orm_lint_core::utils::short_name;
///
/// assert_eq!(short_name("Doctrine\\ORM\\Mapping\\Column"), "Column");
/// assert_eq!(short_name("Column"), "Column");
/// ```
#[must_use]
pub fn short_name(name: &str) -> &str {
    name.rsplit(SEPARATOR).next().unwrap_or(name)
}

/// Splits a name into its first segment and the remainder, if any.
#[must_use]
pub fn split_first(name: &str) -> (&str, Option<&str>) {
    match name.split_once(SEPARATOR) {
        Some((first, rest)) => (first, Some(rest)),
        None => (name, None),
    }
}

/// Joins a namespace prefix and a name; an empty prefix yields the name.
#[must_use]
pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{name}")
    }
}
