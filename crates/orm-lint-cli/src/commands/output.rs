//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use orm_lint_core::{Diagnostic, DiagnosticReport, LintResult};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is used to read sources for the `pretty` format.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for diagnostic in &result.diagnostics {
        println!("{}", diagnostic.format());
    }

    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let summary_color = if result.has_errors() {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s) in {} file(s)\x1b[0m",
        summary_color,
        result.diagnostics.len(),
        result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for diagnostic in &result.diagnostics {
        println!("{diagnostic}");
    }
}

fn print_pretty(result: &LintResult, root: &Path) {
    for diagnostic in &result.diagnostics {
        println!("{:?}", pretty_report(diagnostic, root));
    }

    print_summary(result);
}

/// Builds a miette report, attaching the file source when it can be read.
fn pretty_report(diagnostic: &Diagnostic, root: &Path) -> Report {
    let report = Report::new(DiagnosticReport::from(diagnostic));
    let file = &diagnostic.location.file;

    match std::fs::read_to_string(root.join(file)) {
        Ok(content) => {
            report.with_source_code(NamedSource::new(file.display().to_string(), content))
        }
        Err(e) => {
            tracing::debug!("No source for {}: {}", file.display(), e);
            report
        }
    }
}
