//! # orm-lint-core
//!
//! Core framework for linting ORM mapping declarations.
//!
//! This crate provides the foundational traits and types for building
//! mapping linters. It includes:
//!
//! - a language-agnostic [declaration model](model) (classes, properties,
//!   methods, attributes, calls)
//! - [attribute metadata extraction](utils::attributes) and
//!   [entity classification](entity)
//! - [`Rule`] trait for per-node rules
//! - [`SourceParser`] trait for language front-ends
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Diagnostic`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use orm_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(PhpParser::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for diagnostic in &result.diagnostics {
//!     println!("{diagnostic}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
pub mod entity;
pub mod model;
mod parser;
mod rule;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::AnalysisScope;
pub use entity::is_entity;
pub use model::{AstNode, NodeKind, SourceFile};
pub use parser::{ParseError, ParserBox, SourceParser};
pub use rule::{Rule, RuleBox};
pub use types::{Diagnostic, DiagnosticReport, LintResult, Location, Suggestion};
