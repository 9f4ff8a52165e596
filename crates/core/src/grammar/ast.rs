use serde::Serialize;

use super::diag::Span;
use super::token::Token;

/// Root of the syntax tree: one command line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Command<'a> {
    /// The leading command word.
    pub imperative: Imperative<'a>,
    /// Positional parameters, in source order.
    pub parameters: ParameterList<'a>,
    /// `/name[:value]` options, in source order.
    pub options: OptionList<'a>,
}

/// The leading word naming the command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Imperative<'a>(pub Word<'a>);

/// Ordered positional parameters.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ParameterList<'a>(pub Vec<Parameter<'a>>);

/// A positional parameter, optionally marked `+` or `-`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "text")]
pub enum Parameter<'a> {
    /// Unmarked parameter.
    Normal(Text<'a>),
    /// `+text` parameter.
    Additive(Text<'a>),
    /// `-text` parameter.
    Subtractive(Text<'a>),
}

impl<'a> Parameter<'a> {
    /// The parameter's text, whatever its marker.
    pub fn text(&self) -> &Text<'a> {
        match self {
            Parameter::Normal(t) | Parameter::Additive(t) | Parameter::Subtractive(t) => t,
        }
    }
}

/// Ordered `/name[:value]` options.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct OptionList<'a>(pub Vec<NamedOption<'a>>);

/// One `/name` or `/name:value` option.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NamedOption<'a> {
    /// The option name.
    pub name: OptionName<'a>,
    /// The value after `:`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<OptionValue<'a>>,
}

/// Name part of an option.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OptionName<'a>(pub Word<'a>);

/// Value part of an option.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OptionValue<'a>(pub Text<'a>);

/// A quoted text or a bare word used as text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Text<'a>(pub Token<'a>);

/// A bare word.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Word<'a>(pub Token<'a>);

impl<'a> Text<'a> {
    /// The text content (quotes stripped).
    pub fn value(&self) -> &'a str {
        self.0.literal
    }
}

impl<'a> Word<'a> {
    /// The word itself.
    pub fn value(&self) -> &'a str {
        self.0.literal
    }
}

/// A borrowed view of any node in the tree.
///
/// `Command::nodes` yields these in depth-first source order, which is the
/// order the extractor relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'n, 'a> {
    /// The root.
    Command(&'n Command<'a>),
    /// The imperative.
    Imperative(&'n Imperative<'a>),
    /// The parameter list.
    ParameterList(&'n ParameterList<'a>),
    /// One parameter.
    Parameter(&'n Parameter<'a>),
    /// The option list.
    OptionList(&'n OptionList<'a>),
    /// One option.
    Option(&'n NamedOption<'a>),
    /// An option name.
    OptionName(&'n OptionName<'a>),
    /// An option value.
    OptionValue(&'n OptionValue<'a>),
    /// A text leaf.
    Text(&'n Text<'a>),
    /// A word leaf.
    Word(&'n Word<'a>),
}

impl<'a> Command<'a> {
    /// All nodes of the tree in depth-first, source order, root first.
    pub fn nodes(&self) -> Vec<Node<'_, 'a>> {
        let mut out = vec![
            Node::Command(self),
            Node::Imperative(&self.imperative),
            Node::Word(&self.imperative.0),
            Node::ParameterList(&self.parameters),
        ];
        for p in &self.parameters.0 {
            out.push(Node::Parameter(p));
            out.push(Node::Text(p.text()));
        }
        out.push(Node::OptionList(&self.options));
        for o in &self.options.0 {
            out.push(Node::Option(o));
            out.push(Node::OptionName(&o.name));
            out.push(Node::Word(&o.name.0));
            if let Some(v) = &o.value {
                out.push(Node::OptionValue(v));
                out.push(Node::Text(&v.0));
            }
        }
        out
    }
}

impl Node<'_, '_> {
    /// Source span covered by this node's words and texts.
    ///
    /// Markers (`+`, `-`, `/`, `:`) are not part of the tree, so a parameter
    /// spans its text and an option spans its name through its value. Empty
    /// lists have no span.
    pub fn span(&self) -> Option<Span> {
        match self {
            Node::Command(c) => {
                let imperative = c.imperative.0.0.span;
                let end = Node::OptionList(&c.options)
                    .span()
                    .or_else(|| Node::ParameterList(&c.parameters).span())
                    .map_or(imperative.end, |s| s.end);
                Some(Span::new(imperative.start, end))
            }
            Node::Imperative(i) => Some(i.0.0.span),
            Node::ParameterList(l) => {
                let first = l.0.first()?.text().0.span;
                let last = l.0.last()?.text().0.span;
                Some(Span::new(first.start, last.end))
            }
            Node::Parameter(p) => Some(p.text().0.span),
            Node::OptionList(l) => {
                let first = Node::Option(l.0.first()?).span()?;
                let last = Node::Option(l.0.last()?).span()?;
                Some(Span::new(first.start, last.end))
            }
            Node::Option(o) => {
                let name = o.name.0.0.span;
                let end = o.value.as_ref().map_or(name.end, |v| v.0.0.span.end);
                Some(Span::new(name.start, end))
            }
            Node::OptionName(n) => Some(n.0.0.span),
            Node::OptionValue(v) => Some(v.0.0.span),
            Node::Text(t) => Some(t.0.span),
            Node::Word(w) => Some(w.0.span),
        }
    }
}
