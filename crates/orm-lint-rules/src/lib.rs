//! # orm-lint-rules
//!
//! Built-in lint rules for Doctrine ORM entities.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | ORM001 | `nullable-column` | Requires explicit `nullable` on columns, forbids it on primary keys |
//! | ORM002 | `primary-key-strategy` | Requires the `IDENTITY` generation strategy on primary keys |
//! | ORM003 | `setter-return-type` | Requires entity setters to return `static` |
//! | ORM004 | `preferred-column-type` | Prefers `text` over `string` column types |
//! | ORM005 | `forbidden-call` | Forbids `dump()`, `var_dump()` and similar calls |
//!
//! ## Usage
//!
//! ```ignore
//! use orm_lint_core::Analyzer;
//! use orm_lint_php::PhpParser;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(PhpParser::new())
//!     .rules(orm_lint_rules::all_rules())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod forbidden_call;
pub mod nullable_column;
pub mod preferred_column_type;
pub mod primary_key_strategy;
mod registry;
pub mod setter_return_type;

#[cfg(test)]
mod test_support;

pub use forbidden_call::{ForbiddenCall, DEFAULT_FUNCTIONS};
pub use nullable_column::NullableColumn;
pub use preferred_column_type::PreferredColumnType;
pub use primary_key_strategy::PrimaryKeyStrategy;
pub use registry::{all_rules, rule_by_name, rules_from_config, RULE_NAMES};
pub use setter_return_type::SetterReturnType;

/// Re-export core types for convenience.
pub use orm_lint_core::{Diagnostic, Rule, RuleBox};
