use crate::command::BareCommand;

/// A command constructor rejected a well-formed bare command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid `{command}` command: {message}")]
pub struct ValidationError {
    /// Keyword of the command whose constructor failed.
    pub command: &'static str,
    /// What was wrong with the parameters or options.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `command`.
    pub fn new(command: &'static str, message: impl Into<String>) -> Self {
        Self {
            command,
            message: message.into(),
        }
    }
}

/// The typed imperative did not select exactly one binding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// No keyword matched.
    #[error("unknown command `{imperative}`")]
    Unknown {
        /// The imperative as typed.
        imperative: String,
    },
    /// More than one keyword matched.
    #[error("ambiguous command `{imperative}`: could be {}", .candidates.join(", "))]
    Ambiguous {
        /// The imperative as typed.
        imperative: String,
        /// Every matching keyword, in table order.
        candidates: Vec<&'static str>,
    },
}

impl ResolutionError {
    /// The imperative that failed to resolve.
    pub fn imperative(&self) -> &str {
        match self {
            ResolutionError::Unknown { imperative }
            | ResolutionError::Ambiguous { imperative, .. } => imperative,
        }
    }
}

/// Builds an executable command from a bare command.
pub type Constructor<C> = fn(&BareCommand) -> Result<C, ValidationError>;

/// A keyword paired with the constructor for its command.
pub struct Binding<C: 'static> {
    /// The full command keyword.
    pub keyword: &'static str,
    /// Constructor invoked once the keyword is selected.
    pub construct: Constructor<C>,
}

impl<C: 'static> Binding<C> {
    /// Pair `keyword` with `construct`.
    pub const fn new(keyword: &'static str, construct: Constructor<C>) -> Self {
        Self { keyword, construct }
    }
}

impl<C: 'static> Clone for Binding<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: 'static> Copy for Binding<C> {}

impl<C: 'static> std::fmt::Debug for Binding<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("keyword", &self.keyword)
            .finish_non_exhaustive()
    }
}

/// A fixed, read-only set of bindings.
pub struct BindingTable<C: 'static> {
    bindings: &'static [Binding<C>],
}

impl<C: 'static> BindingTable<C> {
    /// Wrap a static binding slice.
    pub const fn new(bindings: &'static [Binding<C>]) -> Self {
        Self { bindings }
    }

    /// Every keyword, in table order.
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(|b| b.keyword)
    }

    /// Every binding whose keyword satisfies `predicate`, in table order.
    pub fn all_matches(&self, predicate: impl Fn(&str) -> bool) -> Vec<Binding<C>> {
        self.bindings
            .iter()
            .filter(|b| predicate(b.keyword))
            .copied()
            .collect()
    }

    /// The single binding whose keyword satisfies `predicate`.
    ///
    /// `imperative` is only used to describe the failure.
    pub fn resolve_exact(
        &self,
        imperative: &str,
        predicate: impl Fn(&str) -> bool,
    ) -> Result<Binding<C>, ResolutionError> {
        let matches = self.all_matches(predicate);
        match matches.as_slice() {
            [only] => Ok(*only),
            [] => Err(ResolutionError::Unknown {
                imperative: imperative.to_owned(),
            }),
            many => Err(ResolutionError::Ambiguous {
                imperative: imperative.to_owned(),
                candidates: many.iter().map(|b| b.keyword).collect(),
            }),
        }
    }
}

impl<C: 'static> Clone for BindingTable<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: 'static> Copy for BindingTable<C> {}

impl<C: 'static> std::fmt::Debug for BindingTable<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.keywords()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword_of(bare: &BareCommand) -> Result<String, ValidationError> {
        Ok(bare.imperative().to_owned())
    }

    static TABLE: [Binding<String>; 3] = [
        Binding::new("edit", keyword_of),
        Binding::new("exit", keyword_of),
        Binding::new("find", keyword_of),
    ];

    #[test]
    fn all_matches_keeps_table_order() {
        let table = BindingTable::new(&TABLE);
        let found: Vec<_> = table
            .all_matches(|k| k.starts_with('e'))
            .iter()
            .map(|b| b.keyword)
            .collect();
        assert_eq!(found, ["edit", "exit"]);
    }

    #[test]
    fn resolve_exact_single_match() {
        let table = BindingTable::new(&TABLE);
        let b = table.resolve_exact("fi", |k| k.starts_with("fi")).unwrap();
        assert_eq!(b.keyword, "find");
    }

    #[test]
    fn resolve_exact_no_match() {
        let table = BindingTable::new(&TABLE);
        let err = table.resolve_exact("zap", |k| k == "zap").unwrap_err();
        assert_eq!(
            err,
            ResolutionError::Unknown {
                imperative: "zap".into()
            }
        );
        assert_eq!(err.to_string(), "unknown command `zap`");
    }

    #[test]
    fn resolve_exact_many_matches() {
        let table = BindingTable::new(&TABLE);
        let err = table.resolve_exact("e", |k| k.starts_with('e')).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ambiguous command `e`: could be edit, exit"
        );
        assert_eq!(err.imperative(), "e");
    }

    #[test]
    fn debug_lists_keywords() {
        let table = BindingTable::new(&TABLE);
        assert_eq!(format!("{table:?}"), r#"["edit", "exit", "find"]"#);
    }
}
