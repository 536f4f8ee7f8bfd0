//! Namespace and `use` import tracking for attribute name resolution.
//!
//! Follows PHP's rules for class names: a leading `\` is fully qualified,
//! `namespace\Foo` is relative to the current namespace, and anything else
//! is resolved through the imports by its first segment (case-insensitively)
//! before falling back to the current namespace.

use orm_lint_core::utils::names::{is_fully_qualified, join, normalize, short_name, split_first};
use std::collections::HashMap;

const RELATIVE_PREFIX: &str = "namespace\\";

/// Active namespace and class imports at a point in a file.
#[derive(Debug, Clone, Default)]
pub struct NameContext {
    namespace: String,
    /// Lowercased alias to fully qualified target.
    imports: HashMap<String, String>,
}

impl NameContext {
    /// Creates a context for the global namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh context for the given namespace.
    #[must_use]
    pub fn in_namespace(namespace: &str) -> Self {
        Self {
            namespace: normalize(namespace),
            imports: HashMap::new(),
        }
    }

    /// Switches to a new namespace, dropping all imports.
    pub fn enter_namespace(&mut self, namespace: &str) {
        *self = Self::in_namespace(namespace);
    }

    /// Returns the current namespace, empty for the global one.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Imports `target`, under `alias` or its last segment.
    pub fn import(&mut self, target: &str, alias: Option<&str>) {
        let target = normalize(target);
        let alias = alias.map_or_else(|| short_name(&target).to_string(), str::to_string);
        self.imports.insert(alias.to_lowercase(), target);
    }

    /// Records every class import of a `use ...;` statement.
    pub fn add_use_declaration(&mut self, text: &str) {
        for (target, alias) in parse_use_declaration(text) {
            self.import(&target, alias.as_deref());
        }
    }

    /// Resolves a written class name to its fully qualified form.
    #[must_use]
    pub fn resolve(&self, written: &str) -> String {
        let compact: String = written.chars().filter(|c| !c.is_whitespace()).collect();

        if is_fully_qualified(&compact) {
            return normalize(&compact);
        }

        let relative = compact
            .get(..RELATIVE_PREFIX.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(RELATIVE_PREFIX));
        if relative {
            return join(&self.namespace, &compact[RELATIVE_PREFIX.len()..]);
        }

        let (first, rest) = split_first(&compact);
        match (self.imports.get(&first.to_lowercase()), rest) {
            (Some(target), Some(rest)) => join(target, rest),
            (Some(target), None) => target.clone(),
            (None, _) => join(&self.namespace, &compact),
        }
    }
}

/// Extracts `(target, alias)` pairs from a `use` statement's text.
///
/// Function and constant imports are skipped, including those inside
/// mixed group uses.
#[must_use]
pub fn parse_use_declaration(text: &str) -> Vec<(String, Option<String>)> {
    let body = text.trim().trim_end_matches(';').trim();
    let Some(body) = strip_keyword(body, "use") else {
        return Vec::new();
    };
    if is_non_class_import(body) {
        return Vec::new();
    }

    match body.split_once('{') {
        Some((prefix, items)) => {
            let prefix = normalize(prefix.trim().trim_end_matches('\\'));
            items
                .trim_end()
                .trim_end_matches('}')
                .split(',')
                .filter_map(parse_clause)
                .map(|(name, alias)| (join(&prefix, &name), alias))
                .collect()
        }
        None => body.split(',').filter_map(parse_clause).collect(),
    }
}

/// Parses `Name` or `Name as Alias`.
fn parse_clause(clause: &str) -> Option<(String, Option<String>)> {
    let clause = clause.trim();
    if clause.is_empty() || is_non_class_import(clause) {
        return None;
    }

    let parts: Vec<&str> = clause.split_whitespace().collect();
    match parts.as_slice() {
        [name] => Some((normalize(name), None)),
        [name, keyword, alias] if keyword.eq_ignore_ascii_case("as") => {
            Some((normalize(name), Some((*alias).to_string())))
        }
        _ => None,
    }
}

fn is_non_class_import(text: &str) -> bool {
    strip_keyword(text, "function").is_some() || strip_keyword(text, "const").is_some()
}

/// Strips a leading keyword followed by whitespace.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &text[keyword.len()..];
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}
