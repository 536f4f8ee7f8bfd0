//! Integration test: analyzer over a fixture tree with an in-memory parser.
//!
//! Fixture files under `tests/fixtures/tree/` use a line format:
//! `entity <Name>`, `plain <Name>` or `call <function>`.

use orm_lint_core::entity::ENTITY;
use orm_lint_core::model::{AttributeInstance, CallTarget, ClassDeclaration, FunctionCall, Node, Span};
use orm_lint_core::{
    is_entity, AnalysisScope, Analyzer, AnalyzerError, AstNode, Config, Diagnostic, NodeKind,
    ParseError, Rule, SourceFile, SourceParser,
};
use std::path::{Path, PathBuf};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tree")
}

struct DeclParser;

impl SourceParser for DeclParser {
    fn language_id(&self) -> &'static str {
        "decl"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["decl"]
    }

    fn parse(&self, source: &str) -> Result<SourceFile, ParseError> {
        let mut file = SourceFile::new();
        for (index, line) in source.lines().enumerate() {
            let span = Span::new(index + 1, 1, 0, line.len());
            let node = match line.split_once(' ') {
                Some(("entity", name)) => Node::Class(
                    ClassDeclaration::new(name, span).with_attribute(AttributeInstance::new(ENTITY)),
                ),
                Some(("plain", name)) => Node::Class(ClassDeclaration::new(name, span)),
                Some(("call", name)) => Node::Call(FunctionCall::named(name, span)),
                _ => {
                    return Err(ParseError::Syntax {
                        line: index + 1,
                        column: 1,
                    })
                }
            };
            file.nodes.push(node);
        }
        Ok(file)
    }
}

struct EntityMarker;

impl Rule for EntityMarker {
    fn name(&self) -> &'static str {
        "entity-marker"
    }
    fn code(&self) -> &'static str {
        "T001"
    }
    fn trigger_kind(&self) -> NodeKind {
        NodeKind::ClassDeclaration
    }
    fn evaluate(&self, node: AstNode<'_>, scope: &AnalysisScope<'_>) -> Vec<Diagnostic> {
        match node {
            AstNode::Class(class) if is_entity(class) => vec![Diagnostic::new(
                self.code(),
                self.name(),
                scope.location(class.span),
                format!("entity {}", class.name),
            )],
            _ => Vec::new(),
        }
    }
}

struct NoDump;

impl Rule for NoDump {
    fn name(&self) -> &'static str {
        "no-dump"
    }
    fn code(&self) -> &'static str {
        "T002"
    }
    fn trigger_kind(&self) -> NodeKind {
        NodeKind::FreeFunctionCall
    }
    fn evaluate(&self, node: AstNode<'_>, scope: &AnalysisScope<'_>) -> Vec<Diagnostic> {
        match node {
            AstNode::Call(call) if matches!(&call.target, CallTarget::Named(n) if n == "dump" || n == "dd") => {
                vec![Diagnostic::new(self.code(), self.name(), scope.location(call.span), "debug call")]
            }
            _ => Vec::new(),
        }
    }
}

fn analyzer(config: Config) -> Analyzer {
    Analyzer::builder()
        .root(fixture_root())
        .config(config)
        .parser(DeclParser)
        .rule(EntityMarker)
        .rule(NoDump)
        .exclude("build/**")
        .build()
        .expect("analyzer should build")
}

fn summary(diagnostics: &[Diagnostic]) -> Vec<(String, usize, &str)> {
    diagnostics
        .iter()
        .map(|d| {
            (
                d.location.file.to_string_lossy().replace('\\', "/"),
                d.location.line,
                d.code.as_str(),
            )
        })
        .collect()
}

#[test]
fn analyzes_tree_in_sorted_order() {
    let result = analyzer(Config::default()).analyze().unwrap();

    assert_eq!(
        summary(&result.diagnostics),
        vec![
            ("src/form.decl".to_string(), 2, "T002"),
            ("src/user.decl".to_string(), 1, "T001"),
            ("src/user.decl".to_string(), 2, "T002"),
        ]
    );
    // form.decl and user.decl; broken.decl is skipped, vendor and build excluded.
    assert_eq!(result.files_checked, 2);
}

#[test]
fn disabled_rule_is_not_dispatched() {
    let config = Config::parse("[rules.no-dump]\nenabled = false\n").unwrap();
    let analyzer = analyzer(config);

    assert_eq!(analyzer.rule_count(), 1);
    assert_eq!(analyzer.rules_for(NodeKind::FreeFunctionCall).count(), 0);

    let result = analyzer.analyze().unwrap();
    assert!(result.diagnostics.iter().all(|d| d.code == "T001"));
}

#[test]
fn config_excludes_apply() {
    let config = Config::parse("[analyzer]\nexclude = [\"src/form.decl\"]\n").unwrap();
    let result = analyzer(config).analyze().unwrap();

    assert!(result
        .diagnostics
        .iter()
        .all(|d| d.location.file != Path::new("src/form.decl")));
}

#[test]
fn parse_failure_aborts_when_requested() {
    let err = Analyzer::builder()
        .root(fixture_root())
        .parser(DeclParser)
        .rule(NoDump)
        .fail_on_parse_error(true)
        .build()
        .unwrap()
        .analyze()
        .unwrap_err();

    match err {
        AnalyzerError::Parse { path, message } => {
            assert!(path.ends_with("src/broken.decl"));
            assert!(message.contains("1:1"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn check_source_needs_a_parser() {
    let analyzer = analyzer(Config::default());
    let err = analyzer
        .check_source(Path::new("notes.md"), "call dump\n")
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::NoParser(_)));

    let diagnostics = analyzer
        .check_source(&fixture_root().join("inline.DECL"), "call dd\n")
        .unwrap();
    assert_eq!(summary(&diagnostics), vec![("inline.DECL".to_string(), 1, "T002")]);
}

#[test]
fn repeated_runs_are_identical() {
    let analyzer = analyzer(Config::default());
    let first = analyzer.analyze().unwrap();
    let second = analyzer.analyze().unwrap();
    assert_eq!(first.diagnostics, second.diagnostics);
}
