//! Rule preferring `text` over `string` column types.
//!
//! Only a literal string passed as the `type:` argument of
//! `#[ORM\Column]` is inspected. Constants such as `Types::STRING` cannot
//! be resolved and are skipped.

use orm_lint_core::entity::COLUMN;
use orm_lint_core::model::{Literal, PropertyDeclaration};
use orm_lint_core::utils::extract;
use orm_lint_core::{
    is_entity, AnalysisScope, AstNode, Diagnostic, NodeKind, Rule, Suggestion,
};

/// Rule code for preferred-column-type.
pub const CODE: &str = "ORM004";

/// Rule name for preferred-column-type.
pub const NAME: &str = "preferred-column-type";

/// Flags `type: 'string'` columns and recommends `text`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferredColumnType;

impl PreferredColumnType {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Number of `type: 'string'` arguments across all column attributes.
fn string_type_args(property: &PropertyDeclaration) -> usize {
    extract(&property.attribute_groups)
        .filter(|attr| attr.is(COLUMN))
        .flat_map(|attr| attr.named_ignore_case("type"))
        .filter(|value| {
            matches!(
                value.as_literal(),
                Some(Literal::Str(s)) if s.to_lowercase() == "string"
            )
        })
        .count()
}

impl Rule for PreferredColumnType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Prefers the `text` column type over `string`"
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
            let hits = string_type_args(property);

            for name in &property.names {
                for _ in 0..hits {
                    diagnostics.push(
                        Diagnostic::new(
                            CODE,
                            NAME,
                            scope.location(property.span),
                            format!(
                                "Field `{name}` in class `{}` should use \"text\" type instead of \"string\".",
                                class.name
                            ),
                        )
                        .with_suggestion(Suggestion::new("Use `type: 'text'`")),
                    );
                }
            }
        }

        diagnostics
    }
}
