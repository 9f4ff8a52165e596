//! Diagnostics for the cmdlang command language.
//!
//! Provides [`Diagnostic`], [`Severity`], and [`Span`] types used to report
//! failures from the lexer, parser, resolver, and command constructors, plus
//! [`caret_lines`] for a plain-text pointer under the offending input.
//! Diagnostic codes are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error: the command cannot be assembled.
    Error,
    /// Warning: the command was assembled but may not do what was meant.
    Warn,
    /// Informational note.
    Info,
}

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Width of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A diagnostic message produced while assembling a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"CMD2001"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the source input that this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Attach machine-readable context metadata (builder pattern).
    ///
    /// Keys are short descriptors like `"found"`, `"expected"`, `"rules"`.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    match id {
        codes::UNEXPECTED_CHARACTER => Some(
            "The input contains a character that does not start any token. Commands may only \
             contain letters, digits, spaces, double-quoted text, and the symbols / : + -.",
        ),
        codes::UNTERMINATED_STRING => Some(
            "A double-quoted text value was opened but never closed. Add the closing quote \
             before the end of the line.",
        ),
        codes::UNEXPECTED_TOKEN => Some(
            "The command is made of valid tokens, but they are not in an order the grammar \
             accepts. A command is an imperative word, then parameters, then /options.",
        ),
        codes::UNKNOWN_COMMAND => Some(
            "No known command starts with the typed imperative. Use `help` to list commands.",
        ),
        codes::AMBIGUOUS_COMMAND => Some(
            "The typed imperative is a prefix of more than one known command. Type more \
             characters to pick exactly one.",
        ),
        codes::INVALID_COMMAND_SHAPE => Some(
            "The command was recognized, but its parameters or options do not match what \
             that command expects (for example, a missing index or an unexpected option).",
        ),
        _ => None,
    }
}

/// Render `input` followed by a caret line pointing at `span`.
///
/// The caret run is as wide as the spanned text, and at least one caret so
/// that zero-width spans (end of input) stay visible. Columns are counted in
/// characters, not bytes. Spans past the end of `input` are clamped.
pub fn caret_lines(input: &str, span: Span) -> String {
    let start = clamp_to_boundary(input, span.start);
    let end = clamp_to_boundary(input, span.end).max(start);
    let column = input[..start].chars().count();
    let width = input[start..end].chars().count().max(1);
    format!("{input}\n{}{}", " ".repeat(column), "^".repeat(width))
}

fn clamp_to_boundary(input: &str, offset: usize) -> usize {
    let mut p = offset.min(input.len());
    while !input.is_char_boundary(p) {
        p -= 1;
    }
    p
}
