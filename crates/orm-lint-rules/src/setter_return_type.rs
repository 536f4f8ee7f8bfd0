//! Rule requiring entity setters to return `static`.
//!
//! Any method whose name starts with `set` counts as a setter. The match is
//! a plain prefix test, so `settings()` or `setup()` are setters too.

use orm_lint_core::{
    is_entity, AnalysisScope, AstNode, Diagnostic, NodeKind, Rule, Suggestion,
};

/// Rule code for setter-return-type.
pub const CODE: &str = "ORM003";

/// Rule name for setter-return-type.
pub const NAME: &str = "setter-return-type";

const SETTER_PREFIX: &str = "set";
const EXPECTED_RETURN_TYPE: &str = "static";

/// Requires `static` as the declared return type of entity setters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetterReturnType;

impl SetterReturnType {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SetterReturnType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires entity setters to declare a `static` return type"
    }

    fn trigger_kind(&self) -> NodeKind {
        NodeKind::ClassDeclaration
    }

    fn evaluate(&self, node: AstNode<'_>, scope: &AnalysisScope<'_>) -> Vec<Diagnostic> {
        let AstNode::Class(class) = node else {
            return Vec::new();
        };
        if !is_entity(class) {
            return Vec::new();
        }

        class
            .methods
            .iter()
            .filter(|method| method.name.starts_with(SETTER_PREFIX))
            .filter(|method| method.return_type.as_deref().map(str::trim) != Some(EXPECTED_RETURN_TYPE))
            .map(|method| {
                Diagnostic::new(
                    CODE,
                    NAME,
                    scope.location(method.span),
                    format!(
                        "Setter method {}::{}() in Doctrine entity should have a return type of \"static\".",
                        class.name, method.name
                    ),
                )
                .with_suggestion(Suggestion::new("Declare `: static` and return `$this`"))
            })
            .collect()
    }
}
