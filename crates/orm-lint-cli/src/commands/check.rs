//! Check command implementation.

use anyhow::{Context, Result};
use orm_lint_core::{Analyzer, Config, RuleBox};
use orm_lint_php::PhpParser;
use orm_lint_rules::{rule_by_name, rules_from_config, RULE_NAMES};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Options of the check command besides the path.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run.
    pub rules_filter: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Abort on the first file that fails to parse.
    pub fail_on_parse_error: bool,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;

    let rules = match &options.rules_filter {
        Some(filter) => filter_rules(filter, &config),
        None => rules_from_config(&config),
    };

    let analyzer = Analyzer::builder()
        .root(path)
        .config(config)
        .parser(PhpParser::new())
        .rules(rules)
        .excludes(options.exclude.iter().cloned())
        .fail_on_parse_error(options.fail_on_parse_error)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root())?;

    // Exit with error code if there are diagnostics
    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Loads and validates the resolved configuration.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    let config = match source {
        ConfigSource::Default => Config::default(),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    config
        .validate(RULE_NAMES)
        .context("Invalid configuration")?;

    Ok(config)
}

fn filter_rules(filter: &str, config: &Config) -> Vec<RuleBox> {
    let mut rules: Vec<RuleBox> = Vec::new();

    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match rule_by_name(name, config) {
            Some(rule) if rules.iter().any(|r| r.name() == rule.name()) => {}
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }

    rules
}
