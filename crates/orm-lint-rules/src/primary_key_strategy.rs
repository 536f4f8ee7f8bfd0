//! Rule requiring `IDENTITY` key generation on entity primary keys.
//!
//! # Detected Patterns
//!
//! - `#[ORM\Id]` without `#[ORM\GeneratedValue(strategy: ...)]`
//! - `#[ORM\GeneratedValue(strategy: ...)]` with any literal other than
//!   `IDENTITY`
//!
//! The two checks are independent. A strategy whose value cannot be read
//! statically (e.g. a class constant) counts as present but is never
//! reported as wrong.

use orm_lint_core::entity::{GENERATED_VALUE, ID};
use orm_lint_core::model::{ArgValue, PropertyDeclaration};
use orm_lint_core::utils::{extract, has_attr};
use orm_lint_core::{
    is_entity, AnalysisScope, AstNode, Diagnostic, NodeKind, Rule, Suggestion,
};

/// Rule code for primary-key-strategy.
pub const CODE: &str = "ORM002";

/// Rule name for primary-key-strategy.
pub const NAME: &str = "primary-key-strategy";

/// The only accepted generation strategy token.
const IDENTITY: &str = "IDENTITY";

/// Requires an explicit `IDENTITY` generation strategy on primary keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryKeyStrategy;

impl PrimaryKeyStrategy {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn strategies(property: &PropertyDeclaration) -> Vec<&ArgValue> {
    extract(&property.attribute_groups)
        .filter(|attr| attr.is(GENERATED_VALUE))
        .flat_map(|attr| attr.named_ignore_case("strategy"))
        .collect()
}

fn is_identity(value: &ArgValue) -> bool {
    match value {
        ArgValue::Literal(lit) => lit.text() == Some(IDENTITY),
        ArgValue::Unresolved => true,
    }
}

impl Rule for PrimaryKeyStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires primary keys to use the IDENTITY generation strategy"
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

        let mut diagnostics = Vec::new();

        for property in &class.properties {
            let is_primary_key = has_attr(&property.attribute_groups, ID);
            let strategies = strategies(property);
            let not_identity = strategies.iter().any(|value| !is_identity(value));

            for name in &property.names {
                if is_primary_key && strategies.is_empty() {
                    diagnostics.push(
                        Diagnostic::new(
                            CODE,
                            NAME,
                            scope.location(property.span),
                            format!(
                                "Primary key ${name} in class {} does not have a generation strategy defined.",
                                class.name
                            ),
                        )
                        .with_suggestion(Suggestion::new(
                            "Add `#[ORM\\GeneratedValue(strategy: 'IDENTITY')]`",
                        )),
                    );
                }

                if not_identity {
                    diagnostics.push(
                        Diagnostic::new(
                            CODE,
                            NAME,
                            scope.location(property.span),
                            format!(
                                "Primary key ${name} in class {} has a generation strategy that is not \"IDENTITY\".",
                                class.name
                            ),
                        )
                        .with_suggestion(Suggestion::new("Use `strategy: 'IDENTITY'`")),
                    );
                }
            }
        }

        diagnostics
    }
}
