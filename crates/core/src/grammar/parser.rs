use super::{
    ast::{
        Command, Imperative, NamedOption, OptionList, OptionName, OptionValue, Parameter,
        ParameterList, Text, Word,
    },
    diag::Span,
    token::{Token, TokenKind, TokenisedCommand},
};

// ─── Production names and lookahead sets ────────────────────────────────────

const COMMAND: &str = "command";
const IMPERATIVE: &str = "imperative";
const PARAMETER_LIST: &str = "parameter_list";
const PARAMETER: &str = "parameter";
const OPTION_LIST: &str = "option_list";
const OPTION: &str = "option";
const TEXT: &str = "text";
const WORD: &str = "word";

const FIRST_TEXT: &[TokenKind] = &[TokenKind::Text, TokenKind::Word];
const FIRST_WORD: &[TokenKind] = &[TokenKind::Word];
const FOLLOW_PARAMETER_LIST: &[TokenKind] = &[TokenKind::Slash, TokenKind::Terminal];
const OPTION_LIST_LOOKAHEAD: &[TokenKind] = &[TokenKind::Slash, TokenKind::Terminal];
const END: &[TokenKind] = &[TokenKind::Terminal];

// ─── Errors ─────────────────────────────────────────────────────────────────

/// The lookahead token did not belong to the set the grammar expected.
///
/// `rules` is filled as the failure unwinds through the productions, so it
/// holds the innermost production first. Use [`ParserError::rule_path`] for
/// the outermost-first reading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected {found} `{found_literal}` at {}..{}; expected {}", .span.start, .span.end, join_kinds(.expected))]
pub struct ParserError {
    /// The full original input.
    pub input: String,
    /// Kind of the offending token.
    pub found: TokenKind,
    /// Literal of the offending token (empty for the terminal).
    pub found_literal: String,
    /// Byte span of the offending token.
    pub span: Span,
    /// Token kinds that would have been accepted.
    pub expected: Vec<TokenKind>,
    /// Productions active at the failure, innermost first.
    pub rules: Vec<&'static str>,
}

impl ParserError {
    fn unexpected(input: &str, found: Token<'_>, expected: &[TokenKind]) -> Self {
        Self {
            input: input.to_owned(),
            found: found.kind,
            found_literal: found.literal.to_owned(),
            span: found.span,
            expected: expected.to_vec(),
            rules: Vec::new(),
        }
    }

    /// Record that the failure unwound through production `rule`.
    fn within(mut self, rule: &'static str) -> Self {
        self.rules.push(rule);
        self
    }

    /// Production path from the root to the failing production, e.g.
    /// `command > option_list > option > word`.
    pub fn rule_path(&self) -> String {
        self.rules
            .iter()
            .rev()
            .copied()
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// Expected token kinds joined with `" | "`.
    pub fn expected_list(&self) -> String {
        join_kinds(&self.expected)
    }
}

fn join_kinds(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

type PResult<T> = Result<T, ParserError>;

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse a token stream into the root [`Command`] node.
///
/// Consumes tokens strictly left to right with one token of lookahead and
/// never backtracks; the first mismatch aborts.
pub fn parse_tokens<'a>(tokens: &TokenisedCommand<'a>) -> Result<Command<'a>, ParserError> {
    let command = Parser::new(tokens).command()?;
    tracing::debug!(
        imperative = command.imperative.0.value(),
        parameters = command.parameters.0.len(),
        options = command.options.0.len(),
        "parsed command"
    );
    Ok(command)
}

// ─── Parser Implementation ─────────────────────────────────────────────────

struct Parser<'t, 'a> {
    tokens: &'t TokenisedCommand<'a>,
    pos: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t TokenisedCommand<'a>) -> Self {
        Self { tokens, pos: 0 }
    }

    // ── Token navigation ────────────────────────────────────────────────

    fn peek(&self) -> Token<'a> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Token<'a> {
        let tok = self.peek();
        if tok.kind != TokenKind::Terminal {
            self.pos += 1;
        }
        tok
    }

    /// Consume the lookahead if it is one of `kinds`, otherwise fail.
    fn expect(&mut self, kinds: &[TokenKind]) -> PResult<Token<'a>> {
        let tok = self.peek();
        if tok.kind.is_any(kinds) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kinds))
        }
    }

    fn unexpected(&self, expected: &[TokenKind]) -> ParserError {
        ParserError::unexpected(self.tokens.input(), self.peek(), expected)
    }

    /// Run production `name`, tagging any failure with it on the way out.
    fn rule<T>(
        &mut self,
        name: &'static str,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        f(self).map_err(|e| e.within(name))
    }

    // ── Productions ─────────────────────────────────────────────────────

    // command → imperative parameter_list option_list TERMINAL
    fn command(&mut self) -> PResult<Command<'a>> {
        self.rule(COMMAND, |p| {
            let imperative = p.imperative()?;
            let parameters = p.parameter_list()?;
            let options = p.option_list()?;
            p.expect(END)?;
            Ok(Command {
                imperative,
                parameters,
                options,
            })
        })
    }

    // imperative → word
    fn imperative(&mut self) -> PResult<Imperative<'a>> {
        self.rule(IMPERATIVE, |p| Ok(Imperative(p.word()?)))
    }

    // parameter_list → parameter*
    fn parameter_list(&mut self) -> PResult<ParameterList<'a>> {
        self.rule(PARAMETER_LIST, |p| {
            let mut params = Vec::new();
            while !p.peek().kind.is_any(FOLLOW_PARAMETER_LIST) {
                params.push(p.parameter()?);
            }
            Ok(ParameterList(params))
        })
    }

    // parameter → text | PLUS text | MINUS text
    fn parameter(&mut self) -> PResult<Parameter<'a>> {
        self.rule(PARAMETER, |p| match p.peek().kind {
            TokenKind::Plus => {
                p.advance();
                Ok(Parameter::Additive(p.text()?))
            }
            TokenKind::Minus => {
                p.advance();
                Ok(Parameter::Subtractive(p.text()?))
            }
            _ => Ok(Parameter::Normal(p.text()?)),
        })
    }

    // option_list → (SLASH option)*
    fn option_list(&mut self) -> PResult<OptionList<'a>> {
        self.rule(OPTION_LIST, |p| {
            let mut options = Vec::new();
            loop {
                match p.peek().kind {
                    TokenKind::Slash => {
                        p.advance();
                        options.push(p.option()?);
                    }
                    TokenKind::Terminal => break,
                    _ => return Err(p.unexpected(OPTION_LIST_LOOKAHEAD)),
                }
            }
            Ok(OptionList(options))
        })
    }

    // option → word (COLON text)?
    fn option(&mut self) -> PResult<NamedOption<'a>> {
        self.rule(OPTION, |p| {
            let name = OptionName(p.word()?);
            let value = if p.peek().kind == TokenKind::Colon {
                p.advance();
                Some(OptionValue(p.text()?))
            } else {
                None
            };
            Ok(NamedOption { name, value })
        })
    }

    // text → TEXT | WORD
    fn text(&mut self) -> PResult<Text<'a>> {
        self.rule(TEXT, |p| Ok(Text(p.expect(FIRST_TEXT)?)))
    }

    // word → WORD
    fn word(&mut self) -> PResult<Word<'a>> {
        self.rule(WORD, |p| Ok(Word(p.expect(FIRST_WORD)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::lexer::tokenize;

    fn parse(input: &str) -> PResult<Command<'_>> {
        parse_tokens(&tokenize(input).unwrap())
    }

    #[test]
    fn imperative_only() {
        let c = parse("list").unwrap();
        assert_eq!(c.imperative.0.value(), "list");
        assert!(c.parameters.0.is_empty());
        assert!(c.options.0.is_empty());
    }

    #[test]
    fn parameter_markers_select_variant() {
        let c = parse("edit 1 +friend -colleague").unwrap();
        assert!(
            matches!(&c.parameters.0[0], Parameter::Normal(t) if t.value() == "1")
        );
        assert!(
            matches!(&c.parameters.0[1], Parameter::Additive(t) if t.value() == "friend")
        );
        assert!(
            matches!(&c.parameters.0[2], Parameter::Subtractive(t) if t.value() == "colleague")
        );
    }

    #[test]
    fn quoted_parameter_is_text() {
        let c = parse(r#"find "John Doe""#).unwrap();
        assert_eq!(c.parameters.0[0].text().value(), "John Doe");
        assert_eq!(c.parameters.0[0].text().0.kind, TokenKind::Text);
    }

    #[test]
    fn options_with_and_without_values() {
        let c = parse(r#"add Bob /phone:"555 1234" /vip"#).unwrap();
        assert_eq!(c.options.0.len(), 2);
        assert_eq!(c.options.0[0].name.0.value(), "phone");
        assert_eq!(
            c.options.0[0].value.as_ref().map(|v| v.0.value()),
            Some("555 1234")
        );
        assert_eq!(c.options.0[1].name.0.value(), "vip");
        assert!(c.options.0[1].value.is_none());
    }

    #[test]
    fn empty_input_fails_in_imperative() {
        let err = parse("").unwrap_err();
        assert_eq!(err.found, TokenKind::Terminal);
        assert_eq!(err.expected, [TokenKind::Word]);
        assert_eq!(err.rule_path(), "command > imperative > word");
    }

    #[test]
    fn stray_colon_fails_in_text() {
        let err = parse("test :").unwrap_err();
        assert_eq!(err.found, TokenKind::Colon);
        assert_eq!(err.expected, [TokenKind::Text, TokenKind::Word]);
        assert_eq!(err.span, Span::new(5, 6));
        assert_eq!(
            err.rule_path(),
            "command > parameter_list > parameter > text"
        );
    }

    #[test]
    fn rules_are_stored_innermost_first() {
        let err = parse("test :").unwrap_err();
        assert_eq!(err.rules, [TEXT, PARAMETER, PARAMETER_LIST, COMMAND]);
    }

    #[test]
    fn slash_without_name_fails_in_word() {
        let err = parse("test /:").unwrap_err();
        assert_eq!(err.found, TokenKind::Colon);
        assert_eq!(err.rule_path(), "command > option_list > option > word");
    }

    #[test]
    fn trailing_colon_fails_in_text() {
        let err = parse("test /opt:").unwrap_err();
        assert_eq!(err.found, TokenKind::Terminal);
        assert_eq!(err.rule_path(), "command > option_list > option > text");
    }

    #[test]
    fn parameter_after_option_fails_in_option_list() {
        let err = parse("test /opt value").unwrap_err();
        assert_eq!(err.found, TokenKind::Word);
        assert_eq!(err.found_literal, "value");
        assert_eq!(err.expected, [TokenKind::Slash, TokenKind::Terminal]);
        assert_eq!(err.rule_path(), "command > option_list");
    }

    #[test]
    fn dangling_marker_fails_in_text() {
        let err = parse("edit 1 +").unwrap_err();
        assert_eq!(err.found, TokenKind::Terminal);
        assert_eq!(
            err.rule_path(),
            "command > parameter_list > parameter > text"
        );
    }

    #[test]
    fn error_display_lists_expected_kinds() {
        let err = parse("test :").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected Colon `:` at 5..6; expected Text | Word"
        );
    }
}
