//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::model::Span;
use crate::types::Location;

/// Scope provided to rules alongside the node being evaluated.
///
/// Rules only read from the scope; it is never mutated during evaluation.
#[derive(Debug, Clone)]
pub struct AnalysisScope<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> AnalysisScope<'a> {
    /// Creates a new scope for a file under `root`.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Builds a diagnostic location for a node span in this file.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        Location::from_span(self.relative_path.clone(), span)
    }
}
