//! Closed enumerations used throughout the rule engine.
//!
//! Built-in rules form a closed set dispatched through [`BuiltinRule`].
//! Custom rules are open and live in the [`registry`](crate::registry).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type declared by the last type rule in a chain.
///
/// Length and range rules (`min`, `max`, `between`) read it to decide
/// whether to count characters, count elements, or compare numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    #[default]
    String,
    Int,
    Float,
    Array,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Array => "array",
        };
        f.write_str(s)
    }
}

/// Built-in rules. Always present and always resolved before custom rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinRule {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "requiredWhenEmpty")]
    RequiredWhenEmpty,
    #[serde(rename = "macAddress")]
    MacAddress,
    #[serde(rename = "regexp")]
    Regexp,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "ip")]
    Ip,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "matchWith")]
    MatchWith,
}

impl BuiltinRule {
    pub const ALL: [BuiltinRule; 15] = [
        BuiltinRule::Required,
        BuiltinRule::RequiredWhenEmpty,
        BuiltinRule::MacAddress,
        BuiltinRule::Regexp,
        BuiltinRule::Url,
        BuiltinRule::Ip,
        BuiltinRule::Float,
        BuiltinRule::Email,
        BuiltinRule::String,
        BuiltinRule::Int,
        BuiltinRule::Array,
        BuiltinRule::Max,
        BuiltinRule::Min,
        BuiltinRule::Between,
        BuiltinRule::MatchWith,
    ];

    /// Looks up a built-in by its rule name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinRule::Required => "required",
            BuiltinRule::RequiredWhenEmpty => "requiredWhenEmpty",
            BuiltinRule::MacAddress => "macAddress",
            BuiltinRule::Regexp => "regexp",
            BuiltinRule::Url => "url",
            BuiltinRule::Ip => "ip",
            BuiltinRule::Float => "float",
            BuiltinRule::Email => "email",
            BuiltinRule::String => "string",
            BuiltinRule::Int => "int",
            BuiltinRule::Array => "array",
            BuiltinRule::Max => "max",
            BuiltinRule::Min => "min",
            BuiltinRule::Between => "between",
            BuiltinRule::MatchWith => "matchWith",
        }
    }

    /// The Type Context this rule declares as a side effect, if any.
    ///
    /// The format rules (`macAddress`, `regexp`, `url`, `ip`, `email`) also
    /// reset the context to `string`.
    pub fn declared_type(self) -> Option<ValueType> {
        match self {
            BuiltinRule::String
            | BuiltinRule::MacAddress
            | BuiltinRule::Regexp
            | BuiltinRule::Url
            | BuiltinRule::Ip
            | BuiltinRule::Email => Some(ValueType::String),
            BuiltinRule::Int => Some(ValueType::Int),
            BuiltinRule::Float => Some(ValueType::Float),
            BuiltinRule::Array => Some(ValueType::Array),
            _ => None,
        }
    }
}

impl fmt::Display for BuiltinRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
