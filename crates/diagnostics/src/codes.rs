//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. Codes are grouped by pipeline stage: `CMD1xxx` lexer,
//! `CMD2xxx` parser, `CMD3xxx` resolver, `CMD4xxx` command validation.

/// A character that starts no token.
pub const UNEXPECTED_CHARACTER: &str = "CMD1001";
/// A quoted text run that reaches end of input without a closing quote.
pub const UNTERMINATED_STRING: &str = "CMD1002";
/// A token that the grammar does not allow at this position.
pub const UNEXPECTED_TOKEN: &str = "CMD2001";
/// An imperative that matches no known command.
pub const UNKNOWN_COMMAND: &str = "CMD3001";
/// An imperative that matches more than one known command.
pub const AMBIGUOUS_COMMAND: &str = "CMD3002";
/// A well-formed command whose parameters or options do not fit its shape.
pub const INVALID_COMMAND_SHAPE: &str = "CMD4001";

/// Every known code, in numeric order.
pub const ALL: &[&str] = &[
    UNEXPECTED_CHARACTER,
    UNTERMINATED_STRING,
    UNEXPECTED_TOKEN,
    UNKNOWN_COMMAND,
    AMBIGUOUS_COMMAND,
    INVALID_COMMAND_SHAPE,
];
