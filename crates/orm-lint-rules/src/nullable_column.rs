//! Rule requiring explicit nullability on mapped columns.
//!
//! # Rationale
//!
//! Doctrine defaults `nullable` to `false`, which silently disagrees with a
//! nullable PHP type more often than not. Spelling it out on every column
//! keeps the mapping and the schema honest. Primary keys are the exception:
//! they can never be nullable, so stating it there is noise.
//!
//! # Detected Patterns
//!
//! - `#[ORM\Column]` / `#[ORM\JoinColumn]` without a `nullable:` argument
//!   on a non-key property
//! - `#[ORM\Id]` property whose column mapping passes `nullable:`

use orm_lint_core::entity::{COLUMN, ID, JOIN_COLUMN};
use orm_lint_core::model::PropertyDeclaration;
use orm_lint_core::utils::{extract, has_any_attr, has_attr};
use orm_lint_core::{
    is_entity, AnalysisScope, AstNode, Diagnostic, NodeKind, Rule, Suggestion,
};

/// Rule code for nullable-column.
pub const CODE: &str = "ORM001";

/// Rule name for nullable-column.
pub const NAME: &str = "nullable-column";

const COLUMN_ATTRS: &[&str] = &[COLUMN, JOIN_COLUMN];

/// Requires `nullable` on every non-key column and forbids it on keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullableColumn;

impl NullableColumn {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Mapping facts about one property statement.
struct Nullability {
    is_primary_key: bool,
    is_column: bool,
    has_nullable: bool,
}

impl Nullability {
    fn of(property: &PropertyDeclaration) -> Self {
        let groups = &property.attribute_groups;
        Self {
            is_primary_key: has_attr(groups, ID),
            is_column: has_any_attr(groups, COLUMN_ATTRS),
            has_nullable: extract(groups)
                .filter(|attr| COLUMN_ATTRS.contains(&attr.name))
                .any(|attr| attr.has_named("nullable")),
        }
    }
}

impl Rule for NullableColumn {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires explicit `nullable` on columns, forbids it on primary keys"
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
            let facts = Nullability::of(property);

            for name in &property.names {
                if facts.is_primary_key && facts.has_nullable {
                    diagnostics.push(
                        Diagnostic::new(
                            CODE,
                            NAME,
                            scope.location(property.span),
                            format!(
                                "Primary key ${name} in class {} should not have \"nullable\" explicitly defined.",
                                class.name
                            ),
                        )
                        .with_suggestion(Suggestion::new(
                            "Remove the `nullable` argument from the key's column mapping",
                        )),
                    );
                } else if !facts.is_primary_key && facts.is_column && !facts.has_nullable {
                    diagnostics.push(
                        Diagnostic::new(
                            CODE,
                            NAME,
                            scope.location(property.span),
                            format!(
                                "Property ${name} in class {} does not have \"nullable\" explicitly defined.",
                                class.name
                            ),
                        )
                        .with_suggestion(Suggestion::new(
                            "Add `nullable: false` (or `nullable: true`) to the column mapping",
                        )),
                    );
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use orm_lint_core::model::ArgValue;

    fn check(class: &orm_lint_core::model::ClassDeclaration) -> Vec<Diagnostic> {
        run(&NullableColumn::new(), class)
    }

    #[test]
    fn test_primary_key_with_nullable() {
        let class = entity("User").with_property(
            property("id", 12)
                .with_attribute(id())
                .with_attribute(column().with_arg(named("nullable", ArgValue::bool(true)))),
        );

        let diagnostics = check(&class);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Primary key $id in class User should not have \"nullable\" explicitly defined."
        );
        assert_eq!(diagnostics[0].line(), 12);
        assert_eq!(diagnostics[0].code, CODE);
    }

    #[test]
    fn test_column_without_nullable() {
        let class = entity("User").with_property(property("name", 15).with_attribute(column()));

        let diagnostics = check(&class);
        assert_eq!(
            messages(&diagnostics),
            vec!["Property $name in class User does not have \"nullable\" explicitly defined."]
        );
        assert!(diagnostics[0].suggestion.is_some());
    }

    #[test]
    fn test_explicit_nullable_false_passes() {
        let class = entity("User").with_property(
            property("name", 15)
                .with_attribute(column().with_arg(named("nullable", ArgValue::bool(false)))),
        );
        assert!(check(&class).is_empty());
    }

    #[test]
    fn test_unresolved_nullable_still_counts() {
        let class = entity("User").with_property(
            property("name", 15).with_attribute(column().with_arg(named("nullable", ArgValue::Unresolved))),
        );
        assert!(check(&class).is_empty());
    }

    #[test]
    fn test_join_column_without_nullable() {
        let class =
            entity("Order").with_property(property("customer", 20).with_attribute(join_column()));

        let diagnostics = check(&class);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("$customer in class Order"));
    }

    #[test]
    fn test_nullable_on_any_column_instance_is_enough() {
        let class = entity("Order").with_property(
            property("customer", 20)
                .with_attribute(join_column())
                .with_attribute(column().with_arg(named("nullable", ArgValue::bool(true)))),
        );
        assert!(check(&class).is_empty());
    }

    #[test]
    fn test_positional_or_miscased_nullable_does_not_count() {
        let class = entity("User").with_property(
            property("name", 15).with_attribute(
                column()
                    .with_arg(orm_lint_core::model::Argument::positional(ArgValue::bool(true)))
                    .with_arg(named("Nullable", ArgValue::bool(true))),
            ),
        );
        assert_eq!(check(&class).len(), 1);
    }

    #[test]
    fn test_primary_key_without_nullable_passes() {
        let class = entity("User")
            .with_property(property("id", 12).with_attribute(id()).with_attribute(column()));
        assert!(check(&class).is_empty());
    }

    #[test]
    fn test_unmapped_property_ignored() {
        let class = entity("User").with_property(property("cache", 30));
        assert!(check(&class).is_empty());
    }

    #[test]
    fn test_non_entity_ignored() {
        let class = plain_class("UserDto")
            .with_property(property("name", 15).with_attribute(column()))
            .with_property(
                property("id", 12)
                    .with_attribute(id())
                    .with_attribute(column().with_arg(named("nullable", ArgValue::bool(true)))),
            );
        assert!(check(&class).is_empty());
    }

    // Every name of a multi-name statement is reported, not only the first.
    #[test]
    fn test_multiple_names_per_statement() {
        let class = entity("Point").with_property(
            property("x", 9).with_name("y").with_attribute(column()),
        );

        let diagnostics = check(&class);
        assert_eq!(
            messages(&diagnostics),
            vec![
                "Property $x in class Point does not have \"nullable\" explicitly defined.",
                "Property $y in class Point does not have \"nullable\" explicitly defined.",
            ]
        );
    }

    #[test]
    fn test_declaration_order_and_idempotence() {
        let class = entity("User")
            .with_property(property("b", 20).with_attribute(column()))
            .with_property(property("a", 10).with_attribute(column()));

        let first = check(&class);
        let second = check(&class);
        assert_eq!(first, second);
        assert!(first[0].message.contains("$b"));
        assert!(first[1].message.contains("$a"));
    }
}
