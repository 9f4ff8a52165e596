use std::collections::BTreeMap;

use serde::Serialize;

use crate::dispatch::{ResolutionError, ValidationError};
use crate::grammar::diag::{Diagnostic, Span, caret_lines, codes};
use crate::grammar::lexer::{LexerError, LexerErrorKind};
use crate::grammar::parser::ParserError;
use crate::grammar::token::TokenKind;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Which pipeline stage rejected the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Tokenization failed.
    Lexer,
    /// The token stream did not match the grammar.
    Parser,
    /// The imperative matched no command, or several.
    Resolution,
    /// The selected command rejected its parameters or options.
    Validation,
}

/// Any failure that occurs before a command exists.
///
/// Nothing has been executed when one of these is returned; the caller can
/// ask the user to fix the line and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    /// See [`LexerError`].
    #[error(transparent)]
    Lexer(#[from] LexerError),
    /// See [`ParserError`].
    #[error(transparent)]
    Parser(#[from] ParserError),
    /// See [`ResolutionError`].
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AssemblyError {
    /// Stage discriminant.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssemblyError::Lexer(_) => ErrorKind::Lexer,
            AssemblyError::Parser(_) => ErrorKind::Parser,
            AssemblyError::Resolution(_) => ErrorKind::Resolution,
            AssemblyError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Whether the line itself was not understood (lexer or parser failure).
    pub fn is_syntax(&self) -> bool {
        matches!(self.kind(), ErrorKind::Lexer | ErrorKind::Parser)
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            AssemblyError::Lexer(e) => match e.kind {
                LexerErrorKind::UnexpectedCharacter => codes::UNEXPECTED_CHARACTER,
                LexerErrorKind::UnterminatedString => codes::UNTERMINATED_STRING,
            },
            AssemblyError::Parser(_) => codes::UNEXPECTED_TOKEN,
            AssemblyError::Resolution(ResolutionError::Unknown { .. }) => codes::UNKNOWN_COMMAND,
            AssemblyError::Resolution(ResolutionError::Ambiguous { .. }) => {
                codes::AMBIGUOUS_COMMAND
            }
            AssemblyError::Validation(_) => codes::INVALID_COMMAND_SHAPE,
        }
    }

    /// The source line, when the failing stage saw it.
    pub fn input(&self) -> Option<&str> {
        match self {
            AssemblyError::Lexer(e) => Some(&e.input),
            AssemblyError::Parser(e) => Some(&e.input),
            AssemblyError::Resolution(_) | AssemblyError::Validation(_) => None,
        }
    }

    /// Byte span of the offending input, when known.
    pub fn span(&self) -> Option<Span> {
        match self {
            AssemblyError::Lexer(e) => Some(e.span),
            AssemblyError::Parser(e) => Some(e.span),
            AssemblyError::Resolution(_) | AssemblyError::Validation(_) => None,
        }
    }

    /// Short message without location details.
    pub fn message(&self) -> String {
        match self {
            AssemblyError::Lexer(e) => format!("{}: `{}`", e.kind, e.fragment),
            AssemblyError::Parser(e) if e.found == TokenKind::Terminal => {
                "unexpected end of input".to_owned()
            }
            AssemblyError::Parser(e) => format!("unexpected {} `{}`", e.found, e.found_literal),
            AssemblyError::Resolution(e) => e.to_string(),
            AssemblyError::Validation(e) => e.to_string(),
        }
    }

    /// Structured diagnostic for JSON output or rich rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.message(), self.span());
        match self {
            AssemblyError::Lexer(e) => diag.with_context(ctx!("fragment" => e.fragment.clone())),
            AssemblyError::Parser(e) => diag.with_context(ctx!(
                "expected" => e.expected_list(),
                "found" => e.found.to_string(),
                "rules" => e.rule_path(),
            )),
            AssemblyError::Resolution(ResolutionError::Unknown { imperative }) => {
                diag.with_context(ctx!("imperative" => imperative.clone()))
            }
            AssemblyError::Resolution(ResolutionError::Ambiguous {
                imperative,
                candidates,
            }) => diag.with_context(ctx!(
                "imperative" => imperative.clone(),
                "candidates" => candidates.join(", "),
            )),
            AssemblyError::Validation(e) => diag.with_context(ctx!("command" => e.command)),
        }
    }

    /// Multi-line, human-readable report.
    ///
    /// ```text
    /// error[CMD2001]: unexpected Colon `:`
    /// test :
    ///      ^
    /// rule: command > parameter_list > parameter > text
    /// expected: Text | Word, found: Colon
    /// ```
    pub fn report(&self) -> String {
        let mut out = format!("error[{}]: {}", self.code(), self.message());
        if let (Some(input), Some(span)) = (self.input(), self.span()) {
            out.push('\n');
            out.push_str(&caret_lines(input, span));
        }
        if let AssemblyError::Parser(e) = self {
            out.push_str(&format!(
                "\nrule: {}\nexpected: {}, found: {}",
                e.rule_path(),
                e.expected_list(),
                e.found
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn parser_report_has_caret_rule_path_and_sets() {
        let err = parse("test :").unwrap_err();
        assert_eq!(
            err.report(),
            "error[CMD2001]: unexpected Colon `:`\n\
             test :\n     ^\n\
             rule: command > parameter_list > parameter > text\n\
             expected: Text | Word, found: Colon"
        );
    }

    #[test]
    fn lexer_report_underlines_fragment() {
        let err = parse(r#"add "Al"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexer);
        assert_eq!(
            err.report(),
            "error[CMD1002]: unterminated string: `\"Al`\nadd \"Al\n    ^^^"
        );
    }

    #[test]
    fn end_of_input_message() {
        let err = parse("").unwrap_err();
        assert_eq!(err.message(), "unexpected end of input");
        assert!(err.is_syntax());
    }

    #[test]
    fn resolution_diagnostic_has_no_span() {
        let err = AssemblyError::from(ResolutionError::Ambiguous {
            imperative: "e".into(),
            candidates: vec!["edit", "exit"],
        });
        let d = err.to_diagnostic();
        assert_eq!(d.id, codes::AMBIGUOUS_COMMAND);
        assert!(d.span.is_none());
        assert_eq!(d.context.unwrap()["candidates"], "edit, exit");
        assert!(!err.is_syntax());
    }

    #[test]
    fn validation_report_is_single_line() {
        let err = AssemblyError::from(ValidationError::new("delete", "expects exactly one INDEX"));
        assert_eq!(
            err.report(),
            "error[CMD4001]: invalid `delete` command: expects exactly one INDEX"
        );
    }
}
