//! Shared test helpers for `cmdlang_core` integration tests.

#![allow(unreachable_pub)]

use cmdlang_core::{
    AssemblyError, BareCommand, ParameterKind, ParserError, TokenKind, parse, tokenize,
};

/// Parse a line that is expected to be valid.
#[allow(dead_code)]
pub fn bare(input: &str) -> BareCommand {
    parse(input).unwrap_or_else(|e| panic!("failed to parse {input:?}:\n{}", e.report()))
}

/// Parse a line that is expected to fail in the parser.
#[allow(dead_code)]
pub fn parser_error(input: &str) -> ParserError {
    match parse(input) {
        Err(AssemblyError::Parser(e)) => e,
        other => panic!("expected a parser error for {input:?}, got {other:?}"),
    }
}

/// Parameters as `(kind, value)` pairs.
#[allow(dead_code)]
pub fn params(bare: &BareCommand) -> Vec<(ParameterKind, &str)> {
    bare.parameters()
        .iter()
        .map(|p| (p.kind, p.value.as_str()))
        .collect()
}

/// Token kinds of a line that is expected to lex.
#[allow(dead_code)]
pub fn token_kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .unwrap_or_else(|e| panic!("failed to tokenize {input:?}: {e}"))
        .tokens()
        .iter()
        .map(|t| t.kind)
        .collect()
}
