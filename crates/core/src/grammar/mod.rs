/// Command-line abstract syntax tree types.
pub mod ast;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// JSON serialization helpers for tokens and the AST.
pub mod dump;
/// Lexer: tokenizes a command line into a stream of borrowed tokens.
pub mod lexer;
/// LL(1) recursive-descent parser: converts tokens into an AST.
pub mod parser;
/// Token taxonomy and the tokenised command.
pub mod token;
