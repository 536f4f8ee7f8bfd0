//! # orm-lint-php
//!
//! Tree-sitter based PHP front-end for orm-lint.
//!
//! [`PhpParser`] implements [`SourceParser`](orm_lint_core::SourceParser):
//! it lowers a PHP file into the class declarations and free function calls
//! the rules inspect, resolving attribute names against the file's
//! `namespace` and `use` statements.
//!
//! ```ignore
//! use orm_lint_core::SourceParser;
//! use orm_lint_php::PhpParser;
//!
//! let file = PhpParser::new().parse("<?php\ndump($x);\n")?;
//! assert_eq!(file.calls().count(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod literal;
pub mod names;
mod php;

pub use names::NameContext;
pub use php::PhpParser;
