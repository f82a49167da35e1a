use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog key for configuration errors.
///
/// Each kind owns one message template per locale; see
/// [`Catalog::render_error`](crate::catalog::Catalog::render_error).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigErrorKind {
    MissingLabel,
    MissingRuleString,
    MalformedInlineRule,
    UnknownRule,
    InvalidArgumentStructure,
    MissingCatalogMessage,
    Load,
}

impl ConfigErrorKind {
    pub const ALL: [ConfigErrorKind; 7] = [
        ConfigErrorKind::MissingLabel,
        ConfigErrorKind::MissingRuleString,
        ConfigErrorKind::MalformedInlineRule,
        ConfigErrorKind::UnknownRule,
        ConfigErrorKind::InvalidArgumentStructure,
        ConfigErrorKind::MissingCatalogMessage,
        ConfigErrorKind::Load,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigErrorKind::MissingLabel => "missing_label",
            ConfigErrorKind::MissingRuleString => "missing_rule_string",
            ConfigErrorKind::MalformedInlineRule => "malformed_inline_rule",
            ConfigErrorKind::UnknownRule => "unknown_rule",
            ConfigErrorKind::InvalidArgumentStructure => "invalid_argument_structure",
            ConfigErrorKind::MissingCatalogMessage => "missing_catalog_message",
            ConfigErrorKind::Load => "load",
        }
    }
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller mistake in a rule declaration or in the validator configuration.
///
/// These abort the whole run. Per-field validation failures are never
/// reported through this type; they end up in
/// [`ValidationResult::errors`](crate::types::ValidationResult::errors).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Required element index [0] or key ['label'] missing for field {field}")]
    MissingLabel { field: String },

    #[error("Required element index [1] or key ['rules'] missing for field {field}")]
    MissingRuleString { field: String },

    #[error("Required structure is 'fieldName' => 'rule1|rule2|...|ruleN' (field {field})")]
    MalformedInlineRule { field: String },

    #[error("Invalid validation rule {rule}")]
    UnknownRule { rule: String },

    #[error("The rule {rule} requires structure {structure}")]
    InvalidArgumentStructure {
        rule: String,
        structure: &'static str,
    },

    #[error("Validator message not found for {kind} in locale {locale}")]
    MissingCatalogMessage {
        kind: ConfigErrorKind,
        locale: String,
    },

    #[error("Failed to load rule set: {message}")]
    Load { message: String },
}

impl ConfigError {
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            ConfigError::MissingLabel { .. } => ConfigErrorKind::MissingLabel,
            ConfigError::MissingRuleString { .. } => ConfigErrorKind::MissingRuleString,
            ConfigError::MalformedInlineRule { .. } => ConfigErrorKind::MalformedInlineRule,
            ConfigError::UnknownRule { .. } => ConfigErrorKind::UnknownRule,
            ConfigError::InvalidArgumentStructure { .. } => {
                ConfigErrorKind::InvalidArgumentStructure
            }
            ConfigError::MissingCatalogMessage { .. } => ConfigErrorKind::MissingCatalogMessage,
            ConfigError::Load { .. } => ConfigErrorKind::Load,
        }
    }

    /// Placeholder values used when rendering this error through a catalog.
    pub(crate) fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            ConfigError::MissingLabel { field }
            | ConfigError::MissingRuleString { field }
            | ConfigError::MalformedInlineRule { field } => vec![(":field", field.clone())],
            ConfigError::UnknownRule { rule } => vec![(":rule", rule.clone())],
            ConfigError::InvalidArgumentStructure { rule, structure } => vec![
                (":rule", rule.clone()),
                (":structure", (*structure).to_string()),
            ],
            ConfigError::MissingCatalogMessage { kind, locale } => vec![
                (":kind", kind.as_str().to_string()),
                (":locale", locale.clone()),
            ],
            ConfigError::Load { message } => vec![(":message", message.clone())],
        }
    }

    pub(crate) fn invalid_argument(rule: &str, structure: &'static str) -> Self {
        ConfigError::InvalidArgumentStructure {
            rule: rule.to_string(),
            structure,
        }
    }
}

/// Serialization error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SerializeError {
    pub message: String,
}
