//! Language-agnostic declaration model consumed by rules.
//!
//! A [`SourceFile`] is what a [`SourceParser`](crate::SourceParser) lowers a
//! source file into: the class declarations and free function calls found in
//! it, in source order, each carrying the attribute metadata written at the
//! declaration site.

/// Position of a node in its source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset of the node start.
    pub offset: usize,
    /// Length of the node in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a span at the given line with column 1 and no byte range.
    #[must_use]
    pub fn line(line: usize) -> Self {
        Self {
            line,
            column: 1,
            offset: 0,
            length: 0,
        }
    }

    /// Creates a span with explicit values.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }
}

/// A literal value written directly at an attribute argument site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Quoted string without interpolation, unescaped.
    Str(String),
    /// Integer or float, in its source form.
    Number(String),
    /// `true` / `false`.
    Bool(bool),
    /// `null`.
    Null,
    /// Bare identifier or constant-like token (e.g. `IDENTITY`).
    Ident(String),
}

impl Literal {
    /// Returns the textual token for string and identifier literals.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Str(s) | Self::Ident(s) => Some(s),
            Self::Number(_) | Self::Bool(_) | Self::Null => None,
        }
    }
}

/// Value of an attribute argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Statically known literal.
    Literal(Literal),
    /// Any expression whose value is not known without evaluation
    /// (class constants, concatenations, interpolated strings, ...).
    Unresolved,
}

impl ArgValue {
    /// Shorthand for a string literal value.
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Literal(Literal::Str(value.into()))
    }

    /// Shorthand for an identifier literal value.
    #[must_use]
    pub fn ident(value: impl Into<String>) -> Self {
        Self::Literal(Literal::Ident(value.into()))
    }

    /// Shorthand for a boolean literal value.
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::Literal(Literal::Bool(value))
    }

    /// Returns the literal, if the value is resolved.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            Self::Unresolved => None,
        }
    }
}

/// One argument of an attribute instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Argument name for named arguments, `None` for positional ones.
    pub name: Option<String>,
    /// Argument value.
    pub value: ArgValue,
}

impl Argument {
    /// Creates a named argument.
    #[must_use]
    pub fn named(name: impl Into<String>, value: ArgValue) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }

    /// Creates a positional argument.
    #[must_use]
    pub fn positional(value: ArgValue) -> Self {
        Self { name: None, value }
    }
}

/// A single attribute, e.g. `#[ORM\Column(type: 'string')]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInstance {
    /// Fully qualified attribute name (`Doctrine\ORM\Mapping\Column`).
    pub name: String,
    /// Arguments in source order.
    pub arguments: Vec<Argument>,
}

impl AttributeInstance {
    /// Creates an attribute without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn with_arg(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// One `#[...]` group; a group may hold several attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeGroup {
    /// Attributes in source order.
    pub attributes: Vec<AttributeInstance>,
}

impl AttributeGroup {
    /// Creates a group from its attributes.
    #[must_use]
    pub fn new(attributes: Vec<AttributeInstance>) -> Self {
        Self { attributes }
    }
}

/// A property statement. One statement may declare several properties
/// (`private $a, $b;`), all sharing the same attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    /// Declared property names without the `$` sigil.
    pub names: Vec<String>,
    /// Attribute groups attached to the statement.
    pub attribute_groups: Vec<AttributeGroup>,
    /// Location of the statement.
    pub span: Span,
}

impl PropertyDeclaration {
    /// Creates a single-name property statement.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            names: vec![name.into()],
            attribute_groups: Vec::new(),
            span,
        }
    }

    /// Adds another name to the statement.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Adds an attribute in its own group.
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeInstance) -> Self {
        self.attribute_groups
            .push(AttributeGroup::new(vec![attribute]));
        self
    }
}

/// A method declared in a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    /// Method name.
    pub name: String,
    /// Declared return type as written, if any.
    pub return_type: Option<String>,
    /// Attribute groups attached to the method.
    pub attribute_groups: Vec<AttributeGroup>,
    /// Location of the declaration.
    pub span: Span,
}

impl MethodDeclaration {
    /// Creates a method declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: Option<&str>, span: Span) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.map(String::from),
            attribute_groups: Vec::new(),
            span,
        }
    }
}

/// A named class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    /// Short class name as declared.
    pub name: String,
    /// Attribute groups attached to the class.
    pub attribute_groups: Vec<AttributeGroup>,
    /// Property statements in source order.
    pub properties: Vec<PropertyDeclaration>,
    /// Methods in source order.
    pub methods: Vec<MethodDeclaration>,
    /// Location of the declaration.
    pub span: Span,
}

impl ClassDeclaration {
    /// Creates an empty class declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            attribute_groups: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            span,
        }
    }

    /// Adds a class-level attribute in its own group.
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeInstance) -> Self {
        self.attribute_groups
            .push(AttributeGroup::new(vec![attribute]));
        self
    }

    /// Adds a property statement.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDeclaration) -> Self {
        self.properties.push(property);
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }
}

/// Callee of a function call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// Statically named free function, leading `\` removed.
    Named(String),
    /// Call through a variable or any other computed callee.
    Dynamic,
}

/// A free function call expression, e.g. `dump($x)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// Callee.
    pub target: CallTarget,
    /// Location of the call expression.
    pub span: Span,
}

impl FunctionCall {
    /// Creates a call to a named function.
    #[must_use]
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self {
            target: CallTarget::Named(name.into()),
            span,
        }
    }

    /// Creates a call through a computed callee.
    #[must_use]
    pub fn dynamic(span: Span) -> Self {
        Self {
            target: CallTarget::Dynamic,
            span,
        }
    }
}

/// Kind of node a rule subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// Class declarations.
    ClassDeclaration,
    /// Free function call expressions.
    FreeFunctionCall,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClassDeclaration => write!(f, "class-declaration"),
            Self::FreeFunctionCall => write!(f, "free-function-call"),
        }
    }
}

/// Owned node of a lowered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A class declaration.
    Class(ClassDeclaration),
    /// A free function call.
    Call(FunctionCall),
}

impl Node {
    /// Borrows this node for rule evaluation.
    #[must_use]
    pub fn as_ast(&self) -> AstNode<'_> {
        match self {
            Self::Class(class) => AstNode::Class(class),
            Self::Call(call) => AstNode::Call(call),
        }
    }
}

/// Borrowed node handed to [`Rule::evaluate`](crate::Rule::evaluate).
#[derive(Debug, Clone, Copy)]
pub enum AstNode<'a> {
    /// A class declaration.
    Class(&'a ClassDeclaration),
    /// A free function call.
    Call(&'a FunctionCall),
}

impl AstNode<'_> {
    /// Returns the kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Class(_) => NodeKind::ClassDeclaration,
            Self::Call(_) => NodeKind::FreeFunctionCall,
        }
    }
}

/// Result of lowering one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// Nodes in source (pre-order) order.
    pub nodes: Vec<Node>,
}

impl SourceFile {
    /// Creates an empty file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node.
    #[must_use]
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Iterates over class declarations.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDeclaration> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Class(class) => Some(class),
            Node::Call(_) => None,
        })
    }

    /// Iterates over function calls.
    pub fn calls(&self) -> impl Iterator<Item = &FunctionCall> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Call(call) => Some(call),
            Node::Class(_) => None,
        })
    }
}
