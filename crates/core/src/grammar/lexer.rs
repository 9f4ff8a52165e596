use super::diag::Span;
use super::token::{Token, TokenKind, TokenisedCommand};

/// Why tokenization stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorKind {
    /// A character that starts no token.
    UnexpectedCharacter,
    /// A `"` that is never closed.
    UnterminatedString,
}

impl std::fmt::Display for LexerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexerErrorKind::UnexpectedCharacter => write!(f, "unexpected character"),
            LexerErrorKind::UnterminatedString => write!(f, "unterminated string"),
        }
    }
}

/// A tokenization failure, fixed at the first offending character.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: `{fragment}` at {}..{}", .span.start, .span.end)]
pub struct LexerError {
    /// What went wrong.
    pub kind: LexerErrorKind,
    /// The full original input.
    pub input: String,
    /// The offending substring.
    pub fragment: String,
    /// Byte span of `fragment` in `input`.
    pub span: Span,
}

impl LexerError {
    fn new(kind: LexerErrorKind, input: &str, span: Span) -> Self {
        Self {
            kind,
            input: input.to_owned(),
            fragment: input[span.start..span.end].to_owned(),
            span,
        }
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

fn single_char_kind(b: u8) -> Option<TokenKind> {
    match b {
        b'/' => Some(TokenKind::Slash),
        b':' => Some(TokenKind::Colon),
        b'+' => Some(TokenKind::Plus),
        b'-' => Some(TokenKind::Minus),
        _ => None,
    }
}

/// Tokenize a command line.
///
/// Scans left to right: runs of `[A-Za-z0-9]` become [`TokenKind::Word`],
/// `"..."` becomes [`TokenKind::Text`] with the quotes stripped from the
/// literal, `/ : + -` are single-character tokens, and spaces are skipped.
/// A zero-width [`TokenKind::Terminal`] at `input.len()` is always appended.
///
/// Every token's literal borrows from `input`.
///
/// # Safety of byte-level scanning
///
/// All token-start tests operate on ASCII values. UTF-8 lead and
/// continuation bytes are `>= 0x80`, so they never match; a non-ASCII
/// character is reported whole as [`LexerErrorKind::UnexpectedCharacter`].
pub fn tokenize(input: &str) -> Result<TokenisedCommand<'_>, LexerError> {
    let mut toks = Vec::new();
    let b = input.as_bytes();
    let mut i = 0usize;
    while i < b.len() {
        let c = b[i];
        let start = i;
        if c == b' ' {
            i += 1;
        } else if is_word_byte(c) {
            i += 1;
            while i < b.len() && is_word_byte(b[i]) {
                i += 1;
            }
            toks.push(Token::new(
                TokenKind::Word,
                &input[start..i],
                Span::new(start, i),
            ));
        } else if c == b'"' {
            // Text run: everything up to the next quote, no escapes.
            let Some(offset) = input[start + 1..].find('"') else {
                return Err(LexerError::new(
                    LexerErrorKind::UnterminatedString,
                    input,
                    Span::new(start, input.len()),
                ));
            };
            let close = start + 1 + offset;
            i = close + 1;
            toks.push(Token::new(
                TokenKind::Text,
                &input[start + 1..close],
                Span::new(start, i),
            ));
        } else if let Some(kind) = single_char_kind(c) {
            i += 1;
            toks.push(Token::new(kind, &input[start..i], Span::new(start, i)));
        } else {
            let width = input[start..].chars().next().map_or(1, char::len_utf8);
            return Err(LexerError::new(
                LexerErrorKind::UnexpectedCharacter,
                input,
                Span::new(start, start + width),
            ));
        }
    }
    toks.push(Token::new(
        TokenKind::Terminal,
        &input[input.len()..],
        Span::empty(input.len()),
    ));
    tracing::debug!(tokens = toks.len(), "tokenized command line");
    Ok(TokenisedCommand::new(input, toks))
}
