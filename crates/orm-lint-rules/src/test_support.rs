//! Builders shared by the rule tests.

use orm_lint_core::entity::{COLUMN, ENTITY, GENERATED_VALUE, ID, JOIN_COLUMN};
use orm_lint_core::model::{
    ArgValue, Argument, AttributeInstance, ClassDeclaration, PropertyDeclaration, Span,
};
use orm_lint_core::{AnalysisScope, AstNode, Diagnostic, Rule};
use std::path::Path;

pub fn entity(name: &str) -> ClassDeclaration {
    ClassDeclaration::new(name, Span::line(8)).with_attribute(AttributeInstance::new(ENTITY))
}

pub fn plain_class(name: &str) -> ClassDeclaration {
    ClassDeclaration::new(name, Span::line(8))
}

pub fn property(name: &str, line: usize) -> PropertyDeclaration {
    PropertyDeclaration::new(name, Span::line(line))
}

pub fn id() -> AttributeInstance {
    AttributeInstance::new(ID)
}

pub fn column() -> AttributeInstance {
    AttributeInstance::new(COLUMN)
}

pub fn join_column() -> AttributeInstance {
    AttributeInstance::new(JOIN_COLUMN)
}

pub fn generated_value() -> AttributeInstance {
    AttributeInstance::new(GENERATED_VALUE)
}

pub fn named(name: &str, value: ArgValue) -> Argument {
    Argument::named(name, value)
}

pub fn run(rule: &dyn Rule, class: &ClassDeclaration) -> Vec<Diagnostic> {
    let scope = AnalysisScope::new(Path::new("src/Entity/User.php"), "", Path::new("."));
    rule.evaluate(AstNode::Class(class), &scope)
}

pub fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message.as_str()).collect()
}
