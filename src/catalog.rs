//! Per-locale message catalogs and placeholder substitution.
//!
//! Two catalogs live side by side:
//!
//! - validation messages, keyed by rule name (`"max"`) or negated rule name
//!   (`"!matchWith"`); a key missing from the current locale falls back to
//!   the default locale and then to the built-in English template;
//! - configuration-error messages, keyed by [`ConfigErrorKind`], with the
//!   same fallback order. Looking one up for an explicit locale through
//!   [`Catalog::error_template`] does not fall back.
//!
//! Templates use named placeholders (`:fieldName`, `:length`, `:min`,
//! `:max`, `:otherField`) replaced literally. Unknown placeholders stay in
//! the output verbatim.

use crate::error::{ConfigError, ConfigErrorKind};
use indexmap::IndexMap;
use std::collections::HashMap;

pub const DEFAULT_LOCALE: &str = "en";

/// Placeholder values keyed by the exact placeholder text (`":min"`).
pub type Attributes = IndexMap<String, String>;

/// Built-in English validation messages.
pub static DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("required", "The field :fieldName is required."),
    (
        "requiredWhenEmpty",
        "The field :fieldName is required when the field :otherField is empty.",
    ),
    (
        "max",
        "Maximum length of the field :fieldName characters should be :length.",
    ),
    (
        "min",
        "Minimum length of the field :fieldName characters should be :length.",
    ),
    (
        "between",
        "The field :fieldName should contain at least :min and no more than :max characters.",
    ),
    ("email", "The field :fieldName should be valid email."),
    ("ip", "The field :fieldName should be valid IP address."),
    ("url", "The field :fieldName should be valid url."),
    ("int", "The field :fieldName should be of type integer."),
    ("string", "The field :fieldName should be of type string."),
    ("float", "The field :fieldName should be of type float."),
    ("array", "The field :fieldName should be of type array."),
    (
        "regexp",
        "The field :fieldName should contain valid regular expression.",
    ),
    (
        "macAddress",
        "The field :fieldName should contain valid mac address.",
    ),
    (
        "matchWith",
        "The field :fieldName's value should match with value of the field :otherField.",
    ),
    (
        "!matchWith",
        "The field :fieldName's value should not match with value of the field :otherField.",
    ),
];

fn default_error_template(kind: ConfigErrorKind) -> &'static str {
    match kind {
        ConfigErrorKind::MissingLabel => {
            "Required element index [0] or key ['label'] missing for field :field"
        }
        ConfigErrorKind::MissingRuleString => {
            "Required element index [1] or key ['rules'] missing for field :field"
        }
        ConfigErrorKind::MalformedInlineRule => {
            "Required structure is 'fieldName' => 'rule1|rule2|...|ruleN' (field :field)"
        }
        ConfigErrorKind::UnknownRule => "Invalid validation rule :rule",
        ConfigErrorKind::InvalidArgumentStructure => "The rule :rule requires structure :structure",
        ConfigErrorKind::MissingCatalogMessage => {
            "Validator message not found for :kind in locale :locale"
        }
        ConfigErrorKind::Load => "Failed to load rule set: :message",
    }
}

/// Replaces each placeholder key with its value, in insertion order.
pub fn substitute<'a, I>(template: &str, attributes: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    attributes
        .into_iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(key, value)
        })
}

#[derive(Clone, Debug)]
pub struct Catalog {
    locale: String,
    messages: HashMap<String, HashMap<String, String>>,
    error_messages: HashMap<String, HashMap<ConfigErrorKind, String>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            messages: HashMap::new(),
            error_messages: HashMap::new(),
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// Replaces the validation message table of `locale`.
    pub fn set_messages<K, V, I>(&mut self, locale: impl Into<String>, messages: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let table = messages
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.messages.insert(locale.into(), table);
    }

    /// Overrides a single validation message in `locale`.
    pub fn set_message(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.messages
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
    }

    /// Replaces the configuration-error message table of `locale`.
    pub fn set_error_messages<V, I>(&mut self, locale: impl Into<String>, messages: I)
    where
        V: Into<String>,
        I: IntoIterator<Item = (ConfigErrorKind, V)>,
    {
        let table = messages.into_iter().map(|(k, v)| (k, v.into())).collect();
        self.error_messages.insert(locale.into(), table);
    }

    /// Template for a validation message key under the current locale.
    pub fn template(&self, key: &str) -> Option<&str> {
        let lookup = |locale: &str| {
            self.messages
                .get(locale)
                .and_then(|table| table.get(key))
                .map(String::as_str)
        };

        lookup(&self.locale)
            .or_else(|| lookup(DEFAULT_LOCALE))
            .or_else(|| {
                DEFAULT_MESSAGES
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| *v)
            })
    }

    /// Builds the error message for a failed rule.
    ///
    /// `key` is the rule name, `!`-prefixed when the rule was negated. When
    /// no template exists the key itself is the message.
    pub fn resolve(&self, key: &str, attributes: &Attributes) -> String {
        match self.template(key) {
            Some(template) => substitute(
                template,
                attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ),
            None => key.to_string(),
        }
    }

    /// Configuration-error template registered for `locale`.
    ///
    /// No fallback across locales: the built-in English text only answers
    /// for the default locale.
    pub fn error_template(
        &self,
        kind: ConfigErrorKind,
        locale: &str,
    ) -> Result<&str, ConfigError> {
        self.error_override(kind, locale)
            .or_else(|| (locale == DEFAULT_LOCALE).then(|| default_error_template(kind)))
            .ok_or_else(|| ConfigError::MissingCatalogMessage {
                kind,
                locale: locale.to_string(),
            })
    }

    /// Localized text of a configuration error under the current locale.
    ///
    /// Falls back to the default locale's override and then to the built-in
    /// English text.
    pub fn render_error(&self, error: &ConfigError) -> String {
        let kind = error.kind();
        let template = self
            .error_override(kind, &self.locale)
            .or_else(|| self.error_override(kind, DEFAULT_LOCALE))
            .unwrap_or_else(|| default_error_template(kind));

        let attributes = error.attributes();
        substitute(template, attributes.iter().map(|(k, v)| (*k, v.as_str())))
    }

    fn error_override(&self, kind: ConfigErrorKind, locale: &str) -> Option<&str> {
        self.error_messages
            .get(locale)
            .and_then(|table| table.get(&kind))
            .map(String::as_str)
    }
}
