//! PHP front-end using Tree-sitter.

use orm_lint_core::model::{
    ArgValue, Argument, AttributeGroup, AttributeInstance, ClassDeclaration, FunctionCall,
    MethodDeclaration, Node, PropertyDeclaration, SourceFile, Span,
};
use orm_lint_core::utils::names::normalize;
use orm_lint_core::{ParseError, SourceParser};
use tracing::debug;
use tree_sitter::{Language, Node as TsNode, Parser};

use crate::literal::lower_value;
use crate::names::NameContext;

/// Lowers PHP source into class declarations and free function calls.
pub struct PhpParser {
    language: Language,
}

impl PhpParser {
    /// Creates a new PHP parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_php::LANGUAGE_PHP.into(),
        }
    }
}

impl Default for PhpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for PhpParser {
    fn language_id(&self) -> &'static str {
        "php"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["php"]
    }

    fn parse(&self, source: &str) -> Result<SourceFile, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language(e.to_string()))?;

        let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();

        if root.has_error() {
            let position = first_error(root).map_or((1, 1), |node| {
                let start = node.start_position();
                (start.row + 1, start.column + 1)
            });
            debug!(line = position.0, column = position.1, "PHP syntax error");
            return Err(ParseError::Syntax {
                line: position.0,
                column: position.1,
            });
        }

        let mut lowering = Lowering {
            src: source.as_bytes(),
            file: SourceFile::new(),
        };
        lowering.walk(root, &mut NameContext::new());

        debug!(nodes = lowering.file.nodes.len(), "Lowered PHP source");
        Ok(lowering.file)
    }
}

/// Finds the first error or missing node in document order.
fn first_error(node: TsNode<'_>) -> Option<TsNode<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

fn span(node: TsNode<'_>) -> Span {
    let start = node.start_position();
    Span::new(
        start.row + 1,
        start.column + 1,
        node.start_byte(),
        node.end_byte() - node.start_byte(),
    )
}

struct Lowering<'s> {
    src: &'s [u8],
    file: SourceFile,
}

impl<'s> Lowering<'s> {
    fn text(&self, node: TsNode<'_>) -> &'s str {
        node.utf8_text(self.src).unwrap_or("")
    }

    /// Pre-order walk; classes are pushed before the calls inside them.
    fn walk(&mut self, node: TsNode<'_>, names: &mut NameContext) {
        match node.kind() {
            "namespace_definition" => {
                let namespace = node
                    .child_by_field_name("name")
                    .map_or("", |n| self.text(n));
                match node.child_by_field_name("body") {
                    Some(body) => {
                        self.walk_children(body, &mut NameContext::in_namespace(namespace));
                    }
                    None => names.enter_namespace(namespace),
                }
                return;
            }
            "namespace_use_declaration" => {
                names.add_use_declaration(self.text(node));
                return;
            }
            "class_declaration" => self.lower_class(node, names),
            "function_call_expression" => self.lower_call(node),
            _ => {}
        }
        self.walk_children(node, names);
    }

    fn walk_children(&mut self, node: TsNode<'_>, names: &mut NameContext) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.walk(child, names);
        }
    }

    fn lower_class(&mut self, node: TsNode<'_>, names: &NameContext) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };

        let mut class = ClassDeclaration::new(self.text(name), span(node));
        class.attribute_groups = self.attributes(node, names);

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                match member.kind() {
                    "property_declaration" => {
                        class.properties.extend(self.lower_property(member, names));
                    }
                    "method_declaration" => class.methods.push(self.lower_method(member, names)),
                    _ => {}
                }
            }
        }

        self.file.nodes.push(Node::Class(class));
    }

    fn lower_property(
        &self,
        node: TsNode<'_>,
        names: &NameContext,
    ) -> Option<PropertyDeclaration> {
        let mut cursor = node.walk();
        let property_names: Vec<String> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "property_element")
            .filter_map(|element| self.property_name(element))
            .collect();

        if property_names.is_empty() {
            return None;
        }

        Some(PropertyDeclaration {
            names: property_names,
            attribute_groups: self.attributes(node, names),
            span: span(node),
        })
    }

    fn property_name(&self, element: TsNode<'_>) -> Option<String> {
        let mut cursor = element.walk();
        let variable = element
            .named_children(&mut cursor)
            .find(|child| child.kind() == "variable_name");
        variable.map(|v| self.text(v).trim_start_matches('$').to_string())
    }

    fn lower_method(&self, node: TsNode<'_>, names: &NameContext) -> MethodDeclaration {
        let name = node
            .child_by_field_name("name")
            .map_or("", |n| self.text(n));
        let return_type = node
            .child_by_field_name("return_type")
            .map(|n| self.text(n));

        let mut method = MethodDeclaration::new(name, return_type, span(node));
        method.attribute_groups = self.attributes(node, names);
        method
    }

    fn lower_call(&mut self, node: TsNode<'_>) {
        let call = match node.child_by_field_name("function") {
            Some(callee) if matches!(callee.kind(), "name" | "qualified_name") => {
                FunctionCall::named(normalize(self.text(callee)), span(node))
            }
            _ => FunctionCall::dynamic(span(node)),
        };
        self.file.nodes.push(Node::Call(call));
    }

    /// Collects the `#[...]` groups attached directly to `owner`.
    fn attributes(&self, owner: TsNode<'_>, names: &NameContext) -> Vec<AttributeGroup> {
        let mut groups = Vec::new();

        let mut cursor = owner.walk();
        for list in owner
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "attribute_list")
        {
            let mut list_cursor = list.walk();
            for group in list
                .named_children(&mut list_cursor)
                .filter(|child| child.kind() == "attribute_group")
            {
                let mut group_cursor = group.walk();
                let attributes = group
                    .named_children(&mut group_cursor)
                    .filter(|child| child.kind() == "attribute")
                    .map(|attribute| self.lower_attribute(attribute, names))
                    .collect();
                groups.push(AttributeGroup::new(attributes));
            }
        }

        groups
    }

    fn lower_attribute(&self, node: TsNode<'_>, names: &NameContext) -> AttributeInstance {
        let mut cursor = node.walk();
        let children: Vec<TsNode<'_>> = node.named_children(&mut cursor).collect();

        let name = children
            .iter()
            .find(|child| matches!(child.kind(), "name" | "qualified_name" | "relative_name"))
            .map_or_else(String::new, |n| names.resolve(self.text(*n)));

        let mut attribute = AttributeInstance::new(name);
        if let Some(arguments) = children.iter().find(|child| child.kind() == "arguments") {
            let mut args_cursor = arguments.walk();
            attribute.arguments = arguments
                .named_children(&mut args_cursor)
                .filter(|child| child.kind() == "argument")
                .map(|argument| self.lower_argument(argument))
                .collect();
        }
        attribute
    }

    fn lower_argument(&self, node: TsNode<'_>) -> Argument {
        let name_node = node.child_by_field_name("name");

        let mut cursor = node.walk();
        let value = node
            .named_children(&mut cursor)
            .filter(|child| Some(child.id()) != name_node.map(|n| n.id()))
            .last()
            .map_or(ArgValue::Unresolved, |v| lower_value(v, self.src));

        Argument {
            name: name_node.map(|n| self.text(n).to_string()),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orm_lint_core::model::{CallTarget, Literal};

    fn parse(src: &str) -> SourceFile {
        PhpParser::new().parse(src).unwrap()
    }

    fn only_class(src: &str) -> ClassDeclaration {
        let file = parse(src);
        let classes: Vec<_> = file.classes().cloned().collect();
        assert_eq!(classes.len(), 1);
        classes.into_iter().next().unwrap()
    }

    #[test]
    fn test_extensions() {
        let parser = PhpParser::new();
        assert_eq!(parser.language_id(), "php");
        assert_eq!(parser.extensions(), &["php"]);
    }

    #[test]
    fn test_class_attributes_resolved_through_alias() {
        let class = only_class(
            r"<?php
namespace App\Entity;

use Doctrine\ORM\Mapping as ORM;

#[ORM\Entity]
#[ORM\Table(name: 'users')]
class User
{
}
",
        );

        assert_eq!(class.name, "User");
        assert_eq!(class.span.line, 6);
        let names: Vec<&str> = class
            .attribute_groups
            .iter()
            .flat_map(|g| g.attributes.iter().map(|a| a.name.as_str()))
            .collect();
        assert_eq!(
            names,
            ["Doctrine\\ORM\\Mapping\\Entity", "Doctrine\\ORM\\Mapping\\Table"]
        );
    }

    #[test]
    fn test_unimported_attribute_resolves_into_namespace() {
        let class = only_class(
            r"<?php
namespace App\Entity;

#[Entity]
class User {}
",
        );
        assert_eq!(class.attribute_groups[0].attributes[0].name, "App\\Entity\\Entity");
    }

    #[test]
    fn test_fully_qualified_attribute() {
        let class = only_class(
            r"<?php
#[\Doctrine\ORM\Mapping\Entity]
class User {}
",
        );
        assert_eq!(
            class.attribute_groups[0].attributes[0].name,
            "Doctrine\\ORM\\Mapping\\Entity"
        );
    }

    #[test]
    fn test_group_holds_several_attributes() {
        let class = only_class(
            r"<?php
use Doctrine\ORM\Mapping as ORM;

#[ORM\Entity, ORM\HasLifecycleCallbacks]
class User {}
",
        );
        assert_eq!(class.attribute_groups.len(), 1);
        assert_eq!(class.attribute_groups[0].attributes.len(), 2);
    }

    #[test]
    fn test_property_arguments() {
        let class = only_class(
            r#"<?php
use Doctrine\ORM\Mapping as ORM;

#[ORM\Entity]
class User
{
    #[ORM\Column(type: 'string', length: 180, nullable: true, options: ['default' => ''])]
    private ?string $email = null;

    #[ORM\GeneratedValue(strategy: "IDENTITY")]
    #[ORM\Column(Types::INTEGER)]
    private int $id;
}
"#,
        );

        assert_eq!(class.properties.len(), 2);
        let email = &class.properties[0];
        assert_eq!(email.names, ["email"]);
        assert_eq!(email.span.line, 7);

        let args = &email.attribute_groups[0].attributes[0].arguments;
        assert_eq!(args.len(), 4);
        assert_eq!(args[0], Argument::named("type", ArgValue::str("string")));
        assert_eq!(
            args[1],
            Argument::named("length", ArgValue::Literal(Literal::Number("180".into())))
        );
        assert_eq!(args[2], Argument::named("nullable", ArgValue::bool(true)));
        assert_eq!(args[3], Argument::named("options", ArgValue::Unresolved));

        let id = &class.properties[1];
        let strategy = &id.attribute_groups[0].attributes[0].arguments[0];
        assert_eq!(*strategy, Argument::named("strategy", ArgValue::str("IDENTITY")));
        let column = &id.attribute_groups[1].attributes[0].arguments[0];
        assert_eq!(column.name, None);
        assert_eq!(column.value, ArgValue::Unresolved);
    }

    #[test]
    fn test_bare_name_and_null_values() {
        let class = only_class(
            r"<?php
#[Marker(strategy: IDENTITY, fallback: null)]
class User {}
",
        );
        let args = &class.attribute_groups[0].attributes[0].arguments;
        assert_eq!(args[0].value, ArgValue::ident("IDENTITY"));
        assert_eq!(args[1].value, ArgValue::Literal(Literal::Null));
    }

    #[test]
    fn test_interpolated_string_unresolved() {
        let class = only_class(
            r#"<?php
#[Marker(type: "prefix_{$suffix}")]
class User {}
"#,
        );
        assert_eq!(
            class.attribute_groups[0].attributes[0].arguments[0].value,
            ArgValue::Unresolved
        );
    }

    #[test]
    fn test_multi_name_property() {
        let class = only_class(
            r"<?php
class Point
{
    #[Column]
    public $x, $y;
}
",
        );
        assert_eq!(class.properties[0].names, ["x", "y"]);
    }

    #[test]
    fn test_methods_and_return_types() {
        let class = only_class(
            r"<?php
class User
{
    public function setName(string $name): static { return $this; }
    public function setEmail(string $email): void {}
    public function reset() {}
}
",
        );

        let methods: Vec<(&str, Option<&str>)> = class
            .methods
            .iter()
            .map(|m| (m.name.as_str(), m.return_type.as_deref()))
            .collect();
        assert_eq!(
            methods,
            [("setName", Some("static")), ("setEmail", Some("void")), ("reset", None)]
        );
        assert_eq!(class.methods[0].span.line, 4);
    }

    #[test]
    fn test_function_calls() {
        let file = parse(
            r"<?php
dump($a);
\dd($b);
$fn($c);
$obj->dump($d);
Foo::dump($e);
",
        );

        let targets: Vec<&CallTarget> = file.calls().map(|c| &c.target).collect();
        assert_eq!(
            targets,
            [
                &CallTarget::Named("dump".into()),
                &CallTarget::Named("dd".into()),
                &CallTarget::Dynamic,
            ]
        );
        assert_eq!(file.calls().next().map(|c| c.span.line), Some(2));
    }

    #[test]
    fn test_calls_inside_methods_follow_class() {
        let file = parse(
            r"<?php
class Controller
{
    public function index(): void
    {
        var_dump($this);
    }
}
",
        );

        assert!(matches!(file.nodes[0], Node::Class(_)));
        assert!(matches!(file.nodes[1], Node::Call(_)));
    }

    #[test]
    fn test_braced_namespaces_are_scoped() {
        let file = parse(
            r"<?php
namespace App\One {
    use Doctrine\ORM\Mapping as ORM;
    #[ORM\Entity]
    class A {}
}
namespace App\Two {
    #[ORM\Entity]
    class B {}
}
",
        );

        let names: Vec<String> = file
            .classes()
            .map(|c| c.attribute_groups[0].attributes[0].name.clone())
            .collect();
        assert_eq!(
            names,
            ["Doctrine\\ORM\\Mapping\\Entity", "App\\Two\\ORM\\Entity"]
        );
    }

    #[test]
    fn test_syntax_error() {
        let err = PhpParser::new()
            .parse("<?php\nclass User {\n    public function (\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }
}
