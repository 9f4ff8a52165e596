//! Diagnostic rendering using ariadne.
//!
//! Converts a pipeline [`Diagnostic`] into an ariadne [`Report`] pointing into
//! the command line, or into a JSON failure object when the output is piped
//! or the user explicitly asks for it.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use cmdlang_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for results and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or pick from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warn => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics for one command line in pretty (ariadne) format to stderr.
///
/// Diagnostics with a span underline the offending part of `line`. Resolution
/// and validation failures carry no span and print as a standalone message.
pub(crate) fn render_diagnostics_pretty(line: &str, source_name: &str, diagnostics: &[Diagnostic]) {
    let config = Config::default()
        .with_compact(true)
        .with_index_type(IndexType::Byte);
    // Trailing column so end-of-input spans have a character to point at.
    let padded = format!("{line} ");
    let mut cache = (source_name, Source::from(padded.as_str()));

    for diag in diagnostics {
        let Some(span) = diag.span else {
            eprintln!("{}[{}]: {}", diag.severity, diag.id, diag.message);
            if let Some(note) = context_note(diag) {
                eprintln!("  = note: {note}");
            }
            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
            continue;
        };

        // Empty spans are widened to one column.
        let start = span.start.min(line.len());
        let end = span.end.min(line.len()).max(start);
        let range = if start == end {
            start..end + 1
        } else {
            start..end
        };

        let mut builder = Report::build(report_kind(&diag.severity), (source_name, range.clone()))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config)
            .with_label(
                Label::new((source_name, range))
                    .with_message(label_message(diag))
                    .with_color(severity_color(&diag.severity)),
            );

        if let Some(rules) = diag.context.as_ref().and_then(|c| c.get("rules")) {
            builder = builder.with_note(format!("while parsing {rules}"));
        }
        if let Some(explanation) = diag.explain() {
            builder = builder.with_help(explanation);
        }

        builder.finish().eprint(&mut cache).ok();
    }
}

/// Label for the underlined span: the expected token set for grammar errors,
/// otherwise the diagnostic message.
fn label_message(diag: &Diagnostic) -> String {
    match diag.context.as_ref().and_then(|c| c.get("expected")) {
        Some(expected) => format!("expected {expected}"),
        None => diag.message.clone(),
    }
}

fn context_note(diag: &Diagnostic) -> Option<String> {
    let ctx = diag.context.as_ref().filter(|c| !c.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

// ── JSON rendering ──────────────────────────────────────────────────────

/// Render diagnostics as a JSON failure object to stdout.
pub(crate) fn render_diagnostics_json(line: &str, diagnostics: &[Diagnostic]) {
    let out = serde_json::json!({
        "success": false,
        "error": "assembly_failed",
        "input": line,
        "diagnostics": diagnostics,
    });
    println!("{out:#}");
}

// ── Unified entry point ─────────────────────────────────────────────────

/// Render diagnostics in the given format.
///
/// - `Pretty` → coloured output to stderr.
/// - `Json`   → JSON object to stdout.
pub(crate) fn render_diagnostics(
    line: &str,
    source_name: &str,
    diagnostics: &[Diagnostic],
    format: Format,
) {
    match format {
        Format::Pretty => render_diagnostics_pretty(line, source_name, diagnostics),
        Format::Json => render_diagnostics_json(line, diagnostics),
    }
}
