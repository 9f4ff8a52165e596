use serde::Serialize;

use super::diag::Span;

/// Classification of a lexer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// A run of ASCII letters and digits.
    Word,
    /// A double-quoted run of characters (quotes not included in the literal).
    Text,
    /// `/`: introduces an option.
    Slash,
    /// `:`: separates an option name from its value.
    Colon,
    /// `+`: marks an additive parameter.
    Plus,
    /// `-`: marks a subtractive parameter.
    Minus,
    /// End of input. Always the last token of a stream.
    Terminal,
}

impl TokenKind {
    /// Whether `self` is one of `kinds`.
    pub fn is_any(self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Word => "Word",
            TokenKind::Text => "Text",
            TokenKind::Slash => "Slash",
            TokenKind::Colon => "Colon",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Terminal => "Terminal",
        };
        f.write_str(name)
    }
}

/// A token that borrows its literal directly from the source input.
///
/// For [`TokenKind::Text`] the literal is the content between the quotes
/// while `span` covers the quotes too; for every other kind
/// `literal == &input[span.start..span.end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// The classification of this token.
    pub kind: TokenKind,
    /// Borrowed slice of the source input for this token.
    pub literal: &'a str,
    /// Byte span of the token in the source input.
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Create a token.
    pub fn new(kind: TokenKind, literal: &'a str, span: Span) -> Self {
        Self {
            kind,
            literal,
            span,
        }
    }
}

/// The source input together with its token stream.
///
/// The stream always ends in exactly one [`TokenKind::Terminal`] token, even
/// for empty input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenisedCommand<'a> {
    input: &'a str,
    tokens: Vec<Token<'a>>,
}

impl<'a> TokenisedCommand<'a> {
    /// Wrap a token stream. `tokens` must end in a single terminal token.
    pub(crate) fn new(input: &'a str, tokens: Vec<Token<'a>>) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Terminal),
            "token stream must end in Terminal"
        );
        Self { input, tokens }
    }

    /// The original input string.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// All tokens, in source order, including the trailing terminal.
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Token at `index`, clamped to the terminal token past the end.
    pub fn get(&self, index: usize) -> Token<'a> {
        let last = self.tokens.len() - 1;
        self.tokens[index.min(last)]
    }

    /// Number of tokens, including the terminal.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream holds only the terminal token.
    pub fn is_empty(&self) -> bool {
        self.tokens.len() == 1
    }
}
