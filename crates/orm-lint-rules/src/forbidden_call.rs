//! Rule forbidding calls to debugging functions.
//!
//! # Detected Patterns
//!
//! - `dump($x)`, `\dd($x)` and any other listed free function
//!
//! Method calls, static calls and calls through a variable (`$fn()`) are
//! never reported. Names are compared exactly after the front-end strips a
//! leading `\`.
//!
//! # Configuration
//!
//! ```toml
//! [rules.forbidden-call]
//! functions = ["dump", "dd", "var_dump"]
//! ```

use orm_lint_core::model::CallTarget;
use orm_lint_core::utils::names::normalize;
use orm_lint_core::{
    AnalysisScope, AstNode, Diagnostic, NodeKind, Rule, RuleConfig, Suggestion,
};
use tracing::debug;

/// Rule code for forbidden-call.
pub const CODE: &str = "ORM005";

/// Rule name for forbidden-call.
pub const NAME: &str = "forbidden-call";

/// Functions forbidden when no list is configured.
pub const DEFAULT_FUNCTIONS: &[&str] = &[
    "dump",
    "dd",
    "var_dump",
    "print_r",
    "var_export",
    "debug_zval_dump",
    "debug_print_backtrace",
];

/// Flags calls to a configurable list of free functions.
#[derive(Debug, Clone)]
pub struct ForbiddenCall {
    functions: Vec<String>,
}

impl Default for ForbiddenCall {
    fn default() -> Self {
        Self::new(DEFAULT_FUNCTIONS.iter().copied())
    }
}

impl ForbiddenCall {
    /// Creates a rule forbidding the given function names.
    ///
    /// Names are normalized like callees (`\dump` becomes `dump`).
    /// Duplicates are dropped, first occurrence wins.
    #[must_use]
    pub fn new<I, S>(functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for function in functions {
            let function = normalize(function.as_ref());
            if !function.is_empty() && !unique.contains(&function) {
                unique.push(function);
            }
        }
        Self { functions: unique }
    }

    /// Builds the rule from its `[rules.forbidden-call]` table.
    ///
    /// A missing table or a missing `functions` key falls back to
    /// [`DEFAULT_FUNCTIONS`].
    #[must_use]
    pub fn from_config(config: Option<&RuleConfig>) -> Self {
        match config.and_then(|c| c.get_str_array("functions")) {
            Some(functions) => {
                debug!(count = functions.len(), "Using configured forbidden functions");
                Self::new(functions)
            }
            None => Self::default(),
        }
    }

    /// Returns the forbidden function names in configured order.
    #[must_use]
    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    fn is_forbidden(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f == name)
    }
}

impl Rule for ForbiddenCall {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids calls to debugging functions such as dump() and var_dump()"
    }

    fn trigger_kind(&self) -> NodeKind {
        NodeKind::FreeFunctionCall
    }

    fn evaluate(&self, node: AstNode<'_>, scope: &AnalysisScope<'_>) -> Vec<Diagnostic> {
        let AstNode::Call(call) = node else {
            return Vec::new();
        };
        let CallTarget::Named(name) = &call.target else {
            return Vec::new();
        };
        if !self.is_forbidden(name) {
            return Vec::new();
        }

        vec![Diagnostic::new(
            CODE,
            NAME,
            scope.location(call.span),
            format!("Calling {name}() function is forbidden."),
        )
        .with_suggestion(Suggestion::new("Remove the debugging call"))]
    }
}
