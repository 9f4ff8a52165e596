use cmdlang_config::{DecoderConfig, MatchRule};

use super::binding::{Binding, BindingTable, ResolutionError};
use crate::command::BareCommand;
use crate::error::AssemblyError;

/// Maps a bare command's imperative to one binding and builds its command.
///
/// By default a binding matches when its keyword starts with the typed
/// imperative, so `del` selects `delete` and `e` is ambiguous between `edit`
/// and `exit`. See [`DecoderConfig`] for the alternatives.
pub struct Decoder<C: 'static> {
    table: BindingTable<C>,
    config: DecoderConfig,
}

impl<C: 'static> Decoder<C> {
    /// Decoder over `table` with the default (prefix) configuration.
    pub fn new(table: BindingTable<C>) -> Self {
        Self::with_config(table, DecoderConfig::default())
    }

    /// Decoder over `table` with an explicit configuration.
    pub fn with_config(table: BindingTable<C>, config: DecoderConfig) -> Self {
        Self { table, config }
    }

    /// The binding table.
    pub fn table(&self) -> &BindingTable<C> {
        &self.table
    }

    /// The active configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Keywords the typed imperative would match, in table order.
    pub fn candidates(&self, typed: &str) -> Vec<&'static str> {
        let rule = self.config.rule_for(typed);
        self.table
            .all_matches(|keyword| rule.matches(typed, keyword))
            .iter()
            .map(|b| b.keyword)
            .collect()
    }

    /// Select the one binding for `bare`'s imperative.
    pub fn resolve(&self, bare: &BareCommand) -> Result<Binding<C>, ResolutionError> {
        let typed = bare.imperative();
        let rule = self.config.rule_for(typed);
        let resolved = match self
            .table
            .resolve_exact(typed, |keyword| rule.matches(typed, keyword))
        {
            Err(ambiguous @ ResolutionError::Ambiguous { .. }) if self.config.prefer_exact => self
                .table
                .resolve_exact(typed, |keyword| MatchRule::Exact.matches(typed, keyword))
                .map_err(|_| ambiguous),
            other => other,
        };
        match &resolved {
            Ok(binding) => {
                tracing::debug!(typed, keyword = binding.keyword, %rule, "resolved command")
            }
            Err(e) => tracing::debug!(typed, %rule, error = %e, "command did not resolve"),
        }
        resolved
    }

    /// Resolve `bare` and run the selected constructor on it.
    ///
    /// A constructor's [`ValidationError`](super::binding::ValidationError) is
    /// passed through unchanged.
    pub fn decode(&self, bare: &BareCommand) -> Result<C, AssemblyError> {
        let binding = self.resolve(bare)?;
        Ok((binding.construct)(bare)?)
    }
}

impl<C: 'static> std::fmt::Debug for Decoder<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("table", &self.table)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::binding::ValidationError;

    fn echo(bare: &BareCommand) -> Result<&'static str, ValidationError> {
        match bare.imperative() {
            "" => Err(ValidationError::new("echo", "empty")),
            _ => Ok("ok"),
        }
    }

    fn reject(_: &BareCommand) -> Result<&'static str, ValidationError> {
        Err(ValidationError::new("list", "takes no parameters"))
    }

    static TABLE: [Binding<&'static str>; 3] = [
        Binding::new("list", reject),
        Binding::new("listall", echo),
        Binding::new("load", echo),
    ];

    fn bare(imperative: &str) -> BareCommand {
        BareCommand::builder().imperative(imperative).build()
    }

    #[test]
    fn prefix_match_is_ambiguous_by_default() {
        let d = Decoder::new(BindingTable::new(&TABLE));
        let err = d.resolve(&bare("list")).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::Ambiguous {
                imperative: "list".into(),
                candidates: vec!["list", "listall"],
            }
        );
    }

    #[test]
    fn prefer_exact_breaks_ties() {
        let config = DecoderConfig {
            prefer_exact: true,
            ..DecoderConfig::default()
        };
        let d = Decoder::with_config(BindingTable::new(&TABLE), config);
        assert_eq!(d.resolve(&bare("list")).unwrap().keyword, "list");
        // Without an exact keyword the original ambiguity is reported.
        let err = d.resolve(&bare("l")).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::Ambiguous {
                imperative: "l".into(),
                candidates: vec!["list", "listall", "load"],
            }
        );
    }

    #[test]
    fn exact_rule_disables_prefixes() {
        let d = Decoder::with_config(BindingTable::new(&TABLE), DecoderConfig::exact());
        assert!(matches!(
            d.resolve(&bare("lo")),
            Err(ResolutionError::Unknown { .. })
        ));
        assert_eq!(d.resolve(&bare("load")).unwrap().keyword, "load");
    }

    #[test]
    fn min_prefix_len_requires_longer_prefixes() {
        let config = DecoderConfig {
            min_prefix_len: 3,
            ..DecoderConfig::default()
        };
        let d = Decoder::with_config(BindingTable::new(&TABLE), config);
        assert!(matches!(
            d.resolve(&bare("lo")),
            Err(ResolutionError::Unknown { .. })
        ));
        assert_eq!(d.resolve(&bare("loa")).unwrap().keyword, "load");
    }

    #[test]
    fn candidates_lists_matches() {
        let d = Decoder::new(BindingTable::new(&TABLE));
        assert_eq!(d.candidates("li"), ["list", "listall"]);
        assert!(d.candidates("x").is_empty());
    }

    #[test]
    fn decode_propagates_validation_error() {
        let config = DecoderConfig {
            prefer_exact: true,
            ..DecoderConfig::default()
        };
        let d = Decoder::with_config(BindingTable::new(&TABLE), config);
        let err = d.decode(&bare("list")).unwrap_err();
        assert_eq!(
            err,
            AssemblyError::Validation(ValidationError::new("list", "takes no parameters"))
        );
    }

    #[test]
    fn decode_runs_constructor() {
        let d = Decoder::new(BindingTable::new(&TABLE));
        assert_eq!(d.decode(&bare("lo")).unwrap(), "ok");
    }
}
