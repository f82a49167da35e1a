use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Rule declarations ──────────────────────────────────────────────────────

/// A rule chain as written in a declaration: either one `|`-joined string
/// or a list of individual rule tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleChain {
    Joined(String),
    List(Vec<String>),
}

impl RuleChain {
    /// Splits the chain into raw rule tokens, in declared order.
    ///
    /// Tokens are not trimmed or filtered: an empty token (`"a||b"`) is kept
    /// and later rejected as an unknown rule.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            RuleChain::Joined(s) => s.split('|').map(str::to_string).collect(),
            RuleChain::List(items) => items
                .iter()
                .flat_map(|item| item.split('|'))
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RuleChain::Joined(s) => s.is_empty(),
            RuleChain::List(items) => items.iter().all(|s| s.is_empty()),
        }
    }
}

impl From<&str> for RuleChain {
    fn from(s: &str) -> Self {
        RuleChain::Joined(s.to_string())
    }
}

impl From<String> for RuleChain {
    fn from(s: String) -> Self {
        RuleChain::Joined(s)
    }
}

/// Structured declaration keyed by name. Index keys `"0"` and `"1"` are
/// accepted as aliases for `label` and `rules`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedDeclaration {
    #[serde(default, alias = "0", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, alias = "1", skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleChain>,
}

/// One field's declaration, in any of the accepted shapes.
///
/// ```text
/// email: "required|email"                          # Inline
/// email: ["E-mail", "required|email"]              # Indexed
/// email: { label: "E-mail", rules: "required" }    # Keyed
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleDeclaration {
    Inline(String),
    Indexed(Vec<String>),
    Keyed(KeyedDeclaration),
}

impl RuleDeclaration {
    pub fn inline(rules: impl Into<String>) -> Self {
        RuleDeclaration::Inline(rules.into())
    }

    pub fn labeled(label: impl Into<String>, rules: impl Into<RuleChain>) -> Self {
        RuleDeclaration::Keyed(KeyedDeclaration {
            label: Some(label.into()),
            rules: Some(rules.into()),
        })
    }
}

impl From<&str> for RuleDeclaration {
    fn from(s: &str) -> Self {
        RuleDeclaration::Inline(s.to_string())
    }
}

/// Ordered map of field name to declaration. Fields are validated in
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    pub fields: IndexMap<String, RuleDeclaration>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field declaration, keeping the original position
    /// of a replaced field.
    pub fn with(mut self, field: impl Into<String>, decl: impl Into<RuleDeclaration>) -> Self {
        self.insert(field, decl);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, decl: impl Into<RuleDeclaration>) {
        self.fields.insert(field.into(), decl.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl<K, D> FromIterator<(K, D)> for RuleSet
where
    K: Into<String>,
    D: Into<RuleDeclaration>,
{
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for (field, decl) in iter {
            set.insert(field, decl);
        }
        set
    }
}

/// A declaration after normalization: resolved label and raw rule tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRules {
    pub field: String,
    pub label: String,
    pub chain: Vec<String>,
}

// ─── Parsed rule token ──────────────────────────────────────────────────────

/// One rule token after parsing, e.g. `!between:[1,10]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedRule {
    pub name: String,
    pub argument: Option<String>,
    pub negated: bool,
}

impl ParsedRule {
    /// Catalog key: the rule name, prefixed with `!` when negated.
    pub fn message_key(&self) -> String {
        if self.negated {
            format!("!{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

// ─── Validation result ──────────────────────────────────────────────────────

/// Outcome of one validation run.
///
/// `errors` holds at most one message per field: the message of the first
/// failing rule. `values` holds the (possibly trimmed) value each field had
/// when its rules ran, including fields that failed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: IndexMap<String, String>,
    pub values: IndexMap<String, Value>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}
