//! Decoder configuration for the cmdlang command language.
//!
//! A [`DecoderConfig`] controls how a typed imperative is matched against the
//! keywords of a binding table. The default configuration is prefix matching,
//! so `del` resolves to `delete` while `e` is ambiguous between `edit` and
//! `exit`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating a decoder configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON deserialization failed.
    #[error("invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value is out of its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// How a typed imperative is compared with a binding keyword.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchRule {
    /// The keyword starts with the typed imperative.
    #[default]
    Prefix,
    /// The keyword equals the typed imperative.
    Exact,
}

impl MatchRule {
    /// Whether `keyword` is selected by `typed` under this rule.
    pub fn matches(self, typed: &str, keyword: &str) -> bool {
        match self {
            MatchRule::Prefix => keyword.starts_with(typed),
            MatchRule::Exact => keyword == typed,
        }
    }
}

impl std::fmt::Display for MatchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchRule::Prefix => write!(f, "prefix"),
            MatchRule::Exact => write!(f, "exact"),
        }
    }
}

/// Configuration for resolving imperatives against a binding table.
///
/// # Example
/// ```
/// let config = cmdlang_config::load_config_from_str(r#"{ "match_rule": "exact" }"#).unwrap();
/// assert_eq!(config.match_rule, cmdlang_config::MatchRule::Exact);
/// assert!(!config.prefer_exact);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Rule used to compare the typed imperative with each keyword.
    pub match_rule: MatchRule,
    /// When several keywords match by prefix and one of them equals the typed
    /// imperative, pick that one instead of reporting ambiguity.
    pub prefer_exact: bool,
    /// Typed imperatives shorter than this only match keywords exactly, even
    /// under [`MatchRule::Prefix`].
    pub min_prefix_len: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            match_rule: MatchRule::Prefix,
            prefer_exact: false,
            min_prefix_len: 1,
        }
    }
}

impl DecoderConfig {
    /// Configuration that only accepts full keywords.
    pub fn exact() -> Self {
        Self {
            match_rule: MatchRule::Exact,
            ..Self::default()
        }
    }

    /// Effective rule for a typed imperative, taking `min_prefix_len` into account.
    pub fn rule_for(&self, typed: &str) -> MatchRule {
        if typed.chars().count() < self.min_prefix_len {
            MatchRule::Exact
        } else {
            self.match_rule
        }
    }
}

/// Parse and validate a decoder configuration from a JSON string.
///
/// Missing fields take their defaults; unknown fields are rejected.
pub fn load_config_from_str(s: &str) -> Result<DecoderConfig, ConfigError> {
    let config: DecoderConfig = serde_json::from_str(s)?;

    if config.min_prefix_len == 0 {
        return Err(ConfigError::InvalidField {
            field: "min_prefix_len".into(),
            reason: "must be at least 1".into(),
        });
    }

    Ok(config)
}

/// Read, parse, and validate a decoder configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<DecoderConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&text)
}
