use std::collections::BTreeMap;

use serde::Serialize;

/// How a positional parameter was marked in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParameterKind {
    /// No marker.
    Normal,
    /// `+` marker.
    Additive,
    /// `-` marker.
    Subtractive,
}

/// One positional parameter of a bare command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Marker the parameter was written with.
    pub kind: ParameterKind,
    /// Parameter text, quotes stripped.
    pub value: String,
}

impl Parameter {
    /// Create a parameter.
    pub fn new(kind: ParameterKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// A parsed command line, detached from its source text.
///
/// Holds the imperative, the positional parameters in source order, and the
/// named options. An option key mapping to an empty list is a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BareCommand {
    imperative: String,
    parameters: Vec<Parameter>,
    options: BTreeMap<String, Vec<String>>,
}

impl BareCommand {
    /// Start building a bare command.
    pub fn builder() -> BareCommandBuilder {
        BareCommandBuilder::default()
    }

    /// The command word as typed.
    pub fn imperative(&self) -> &str {
        &self.imperative
    }

    /// Parameter at `index` (0-based), or `None` past the end.
    pub fn parameter(&self, index: usize) -> Option<&Parameter> {
        self.parameters.get(index)
    }

    /// All parameters in source order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// First value given for option `key`. `None` when absent or a flag.
    pub fn option_first_value(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value given for option `key`, in encounter order. A flag yields
    /// an empty slice; an absent option yields `None`.
    pub fn option_all_values(&self, key: &str) -> Option<&[String]> {
        self.options.get(key).map(Vec::as_slice)
    }

    /// Whether option `key` was given at all.
    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Option names in sorted order.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }
}

/// Accumulator for a [`BareCommand`].
///
/// Consumes and returns `self` at every step so it can be threaded through a
/// fold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BareCommandBuilder {
    imperative: String,
    parameters: Vec<Parameter>,
    options: BTreeMap<String, Vec<String>>,
}

impl BareCommandBuilder {
    /// Set the imperative.
    pub fn imperative(mut self, imperative: impl Into<String>) -> Self {
        self.imperative = imperative.into();
        self
    }

    /// Append a parameter.
    pub fn parameter(mut self, kind: ParameterKind, value: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(kind, value));
        self
    }

    /// Append a value under option `name`.
    pub fn option_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Register option `name` without adding a value.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.options.entry(name.into()).or_default();
        self
    }

    /// Finish building.
    pub fn build(self) -> BareCommand {
        BareCommand {
            imperative: self.imperative,
            parameters: self.parameters,
            options: self.options,
        }
    }
}
