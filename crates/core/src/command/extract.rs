use super::bare::{BareCommand, BareCommandBuilder, ParameterKind};
use crate::grammar::ast::{self, Node};

/// Flatten a syntax tree into a [`BareCommand`].
///
/// A single fold over [`ast::Command::nodes`]; node order is source order and
/// becomes the builder's insertion order. Never fails on a tree produced by
/// the parser.
pub fn extract(command: &ast::Command<'_>) -> BareCommand {
    command
        .nodes()
        .into_iter()
        .fold(BareCommand::builder(), visit)
        .build()
}

fn visit(acc: BareCommandBuilder, node: Node<'_, '_>) -> BareCommandBuilder {
    match node {
        Node::Imperative(imperative) => acc.imperative(imperative.0.value()),
        Node::Parameter(parameter) => {
            let kind = match parameter {
                ast::Parameter::Normal(_) => ParameterKind::Normal,
                ast::Parameter::Additive(_) => ParameterKind::Additive,
                ast::Parameter::Subtractive(_) => ParameterKind::Subtractive,
            };
            tracing::trace!(?kind, value = parameter.text().value(), "parameter");
            acc.parameter(kind, parameter.text().value())
        }
        Node::Option(option) => {
            let name = option.name.0.value();
            tracing::trace!(
                name,
                value = option.value.as_ref().map(|v| v.0.value()),
                "option"
            );
            match &option.value {
                Some(value) => acc.option_value(name, value.0.value()),
                None => acc.flag(name),
            }
        }
        // Structural and leaf nodes are covered by their parents above.
        Node::Command(_)
        | Node::ParameterList(_)
        | Node::OptionList(_)
        | Node::OptionName(_)
        | Node::OptionValue(_)
        | Node::Text(_)
        | Node::Word(_) => acc,
    }
}
