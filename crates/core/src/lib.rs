//! cmdlang core library.
//!
//! Turns one line of user input into a strongly-typed command: the
//! [`grammar`] module tokenizes and parses the line, [`command`] flattens the
//! syntax tree into a [`BareCommand`], and [`dispatch`] resolves the
//! imperative against a static binding table and runs the matching
//! constructor. The main entry points are [`parse`] and [`assemble`].

#![warn(missing_docs)]

/// Bare command value, builder, and AST extraction.
pub mod command;
/// Binding table, decoder, and the built-in command set.
pub mod dispatch;
/// The umbrella error type for every pipeline stage.
pub mod error;
/// Command-line grammar: tokens, lexer, parser, AST.
pub mod grammar;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Grammar
pub use grammar::lexer::{LexerError, LexerErrorKind, tokenize};
pub use grammar::parser::{ParserError, parse_tokens};
pub use grammar::token::{Token, TokenKind, TokenisedCommand};

// Bare command
pub use command::{BareCommand, BareCommandBuilder, Parameter, ParameterKind, extract};

// Dispatch
pub use dispatch::{
    Binding, BindingTable, BuiltinCommand, Decoder, ResolutionError, ValidationError,
    builtin_table,
};

// Errors and diagnostics
pub use error::{AssemblyError, ErrorKind};
pub use grammar::diag::{Diagnostic, Severity, Span, codes};

// Configuration (re-exported from the config crate)
pub use cmdlang_config::{DecoderConfig, MatchRule};

/// Tokenize, parse, and extract one command line.
pub fn parse(text: &str) -> Result<BareCommand, AssemblyError> {
    let tokens = tokenize(text)?;
    let tree = parse_tokens(&tokens)?;
    Ok(extract(&tree))
}

/// Parse one command line and decode it with `decoder`.
pub fn assemble<C: 'static>(text: &str, decoder: &Decoder<C>) -> Result<C, AssemblyError> {
    let bare = parse(text)?;
    decoder.decode(&bare)
}
