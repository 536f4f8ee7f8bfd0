//! Parser extension point.
//!
//! `SourceParser` is how a language front-end plugs into the analyzer.
//! Implement it to lower raw source text into a [`SourceFile`].

use crate::model::SourceFile;

/// Errors produced while lowering source text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded.
    #[error("failed to load grammar: {0}")]
    Language(String),

    /// The parser produced no tree.
    #[error("parser produced no syntax tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (1-indexed).
        column: usize,
    },
}

/// Trait for language-specific parsers.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"php"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, without the dot (e.g., `&["php"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Lowers source text into declarations and calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed.
    fn parse(&self, source: &str) -> Result<SourceFile, ParseError>;
}

/// Type alias for boxed parser trait objects.
pub type ParserBox = Box<dyn SourceParser>;
