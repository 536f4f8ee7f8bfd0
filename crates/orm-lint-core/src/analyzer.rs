//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::AnalysisScope;
use crate::model::{NodeKind, SourceFile};
use crate::parser::{ParserBox, SourceParser};
use crate::rule::{Rule, RuleBox};
use crate::types::{Diagnostic, LintResult};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// No registered parser handles the file's extension.
    #[error("No parser registered for {0}")]
    NoParser(PathBuf),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory traversal error.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    parsers: Vec<ParserBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules to the analyzer.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Adds a source parser.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// Rules disabled in the configuration are dropped here, and the
    /// remaining rules are indexed by the node kind they observe.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.clone());

        let exclude_globs = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let rules: Vec<RuleBox> = self
            .rules
            .into_iter()
            .filter(|rule| {
                let enabled = config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        let mut dispatch: BTreeMap<NodeKind, Vec<usize>> = BTreeMap::new();
        for (index, rule) in rules.iter().enumerate() {
            dispatch.entry(rule.trigger_kind()).or_default().push(index);
        }

        Ok(Analyzer {
            root,
            rules,
            dispatch,
            parsers: self.parsers,
            exclude_globs,
            respect_gitignore: config.analyzer.respect_gitignore,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    /// Node kind -> indices into `rules`, in registration order.
    dispatch: BTreeMap<NodeKind, Vec<usize>>,
    parsers: Vec<ParserBox>,
    exclude_globs: Vec<glob::Pattern>,
    respect_gitignore: bool,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of active rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active rules interested in a node kind.
    pub fn rules_for(&self, kind: NodeKind) -> impl Iterator<Item = &dyn Rule> {
        self.dispatch
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|&index| self.rules[index].as_ref())
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file
    /// fails to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            match self.check_file(file_path) {
                Ok(diagnostics) => {
                    result.diagnostics.extend(diagnostics);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} diagnostics in {} files",
            result.diagnostics.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Reads a file from disk and checks it.
    ///
    /// A file that is not valid UTF-8 is reported as a parse failure.
    fn check_file(&self, path: &Path) -> Result<Vec<Diagnostic>, AnalyzerError> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        })?;
        self.check_source(path, &content)
    }

    /// Parses in-memory source and evaluates all rules against it.
    ///
    /// The parser is chosen by the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser handles the file or parsing fails.
    pub fn check_source(&self, path: &Path, content: &str) -> Result<Vec<Diagnostic>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let parser = self
            .parser_for(path)
            .ok_or_else(|| AnalyzerError::NoParser(path.to_path_buf()))?;

        let file = parser.parse(content).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let scope = AnalysisScope::new(path, content, &self.root);
        Ok(self.evaluate(&file, &scope))
    }

    /// Runs the interested rules over every node of a lowered file.
    ///
    /// Diagnostics come out in node order, then rule registration order.
    #[must_use]
    pub fn evaluate(&self, file: &SourceFile, scope: &AnalysisScope<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for node in &file.nodes {
            let node = node.as_ast();
            for rule in self.rules_for(node.kind()) {
                diagnostics.extend(rule.evaluate(node, scope));
            }
        }

        diagnostics
    }

    fn parser_for(&self, path: &Path) -> Option<&dyn SourceParser> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        self.parsers
            .iter()
            .find(|p| p.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .map(AsRef::as_ref)
    }

    /// Discovers all source files handled by a registered parser.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.parsers.is_empty() {
            warn!("No parsers registered, nothing to analyze");
            return Ok(Vec::new());
        }

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .standard_filters(self.respect_gitignore)
            .hidden(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || self.parser_for(path).is_none() {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    ///
    /// Patterns are matched against the path relative to the root and
    /// against each of its parent directories, so `**/migrations` excludes
    /// everything below a `migrations` directory.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);

        relative
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .any(|p| {
                let path_str = p.to_string_lossy();
                self.exclude_globs.iter().any(|g| g.matches(&path_str))
            })
    }
}
