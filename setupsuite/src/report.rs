//! Terminal rendering of parser diagnostics and validation issues

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use setupsuite_config::Document;
use setupsuite_core::config::{Severity, ValidationIssue};
use std::io::IsTerminal;

/// Print every diagnostic of `doc` with a source snippet to stderr.
pub fn diagnostics(doc: &Document) -> std::io::Result<()> {
    let name = doc.path.display().to_string();
    let color = std::io::stderr().is_terminal();

    for diagnostic in &doc.parsed.diagnostics {
        let config = Config::default()
            .with_index_type(IndexType::Byte)
            .with_color(color);
        let span = diagnostic.location.start..diagnostic.location.end;
        Report::build(ReportKind::Warning, (name.as_str(), span.clone()))
            .with_config(config)
            .with_code(diagnostic.kind.code())
            .with_message(&diagnostic.message)
            .with_label(
                Label::new((name.as_str(), span))
                    .with_message(format!("line {}", diagnostic.location.line))
                    .with_color(Color::Yellow),
            )
            .finish()
            .eprint((name.as_str(), Source::from(doc.source.as_str())))?;
    }
    Ok(())
}

/// Print validation issues; returns the number of errors among them.
pub fn issues(issues: &[ValidationIssue]) -> usize {
    let mut errors = 0;
    for issue in issues {
        match issue.severity {
            Severity::Error => {
                errors += 1;
                eprintln!("❌ {}", issue);
            }
            Severity::Warning => eprintln!("⚠️  {}", issue),
        }
    }
    errors
}
