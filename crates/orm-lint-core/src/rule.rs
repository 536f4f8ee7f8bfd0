//! Rule trait for defining lint rules.

use crate::context::AnalysisScope;
use crate::model::{AstNode, NodeKind};
use crate::types::Diagnostic;

/// A lint rule evaluated against one node of a lowered source file.
///
/// Rules declare the node kind they observe; the analyzer only hands them
/// nodes of that kind. Evaluation is pure: the same node and scope always
/// produce the same diagnostics, in the same order.
///
/// # Example
///
/// ```ignore
/// use orm_lint_core::{AnalysisScope, AstNode, Diagnostic, NodeKind, Rule};
///
/// pub struct NoAnonymousCalls;
///
/// impl Rule for NoAnonymousCalls {
///     fn name(&self) -> &'static str { "no-anonymous-calls" }
///     fn code(&self) -> &'static str { "ORM100" }
///     fn trigger_kind(&self) -> NodeKind { NodeKind::FreeFunctionCall }
///
///     fn evaluate(&self, node: AstNode<'_>, scope: &AnalysisScope<'_>) -> Vec<Diagnostic> {
///         let AstNode::Call(call) = node else { return Vec::new() };
///         // ...
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "nullable-column").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "ORM001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the kind of node this rule wants to observe.
    fn trigger_kind(&self) -> NodeKind;

    /// Evaluates a single node and returns any diagnostics found.
    ///
    /// Nodes of an unexpected kind, or with metadata the rule cannot
    /// interpret, yield no diagnostics.
    fn evaluate(&self, node: AstNode<'_>, scope: &AnalysisScope<'_>) -> Vec<Diagnostic>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FunctionCall, Span};
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }
        fn trigger_kind(&self) -> NodeKind {
            NodeKind::FreeFunctionCall
        }

        fn evaluate(&self, node: AstNode<'_>, scope: &AnalysisScope<'_>) -> Vec<Diagnostic> {
            let AstNode::Call(call) = node else {
                return Vec::new();
            };
            vec![Diagnostic::new(
                self.code(),
                self.name(),
                scope.location(call.span),
                "Test diagnostic",
            )]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.trigger_kind(), NodeKind::FreeFunctionCall);
    }

    #[test]
    fn test_rule_evaluate() {
        let scope = AnalysisScope::new(Path::new("a.php"), "", Path::new("."));
        let call = FunctionCall::named("dump", Span::line(7));
        let diagnostics = TestRule.evaluate(AstNode::Call(&call), &scope);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line(), 7);
    }
}
