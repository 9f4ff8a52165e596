use super::ast::Command;
use super::token::TokenisedCommand;

/// Serialize an AST to a pretty-printed JSON string.
pub fn to_pretty_json(command: &Command<'_>) -> String {
    serde_json::to_string_pretty(command).expect("Command serialization cannot fail")
}

/// Serialize a token stream to a pretty-printed JSON array.
pub fn tokens_to_pretty_json(tokens: &TokenisedCommand<'_>) -> String {
    serde_json::to_string_pretty(tokens.tokens()).expect("Token serialization cannot fail")
}
