//! Declarative field validation with rule chains and localized messages.
//!
//! Each field gets a label and an ordered chain of rule tokens such as
//! `required|int|between:[18,99]`. A run evaluates every declared field
//! against a [`ValueSource`], stops each chain at its first failing rule, and
//! collects at most one localized message per field:
//!
//! ```text
//! RuleSet ─ normalize ─▶ FieldRules ─ evaluate_field ─▶ FieldOutcome ─▶ ValidationResult
//!                                         ▲
//!                      Settings (custom rules, message catalogs)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use rulechain::RuleSet;
//! use serde_json::json;
//!
//! let rules = RuleSet::new()
//!     .with("f_name", "required")
//!     .with("ip_address", "ip");
//! let source = json!({ "ip_address": "192.168.103.1" });
//!
//! let result = rulechain::validate(&rules, &source).expect("well-formed rules");
//! assert!(!result.is_valid());
//! assert_eq!(result.error("f_name"), Some("The field F Name is required."));
//! assert_eq!(result.error("ip_address"), None);
//! ```
//!
//! # Rule tokens
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `name` | run rule `name` |
//! | `name:arg` | run rule `name` with argument `arg`; `[`/`]` in `arg` are ignored |
//! | `!name` | fail when rule `name` accepts the value |
//! | `!trim` | do not trim this field's value (not a rule) |
//!
//! `string`, `int`, `float` and `array` set the Type Context that later
//! `min`, `max` and `between` rules in the same chain compare under:
//! element count for `array`, numeric value for `int`/`float`, character
//! count otherwise.

pub mod catalog;
pub mod enums;
pub mod error;
pub mod evaluate;
pub mod parse;
pub mod primitives;
pub mod registry;
pub mod serialize;
pub mod settings;
pub mod types;
pub mod validate;

pub use error::*;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use evaluate::ValueSource;
pub use parse::{parse_rule, parse_rule_set};
pub use serialize::serialize;
pub use settings::Settings;
pub use validate::{Validatable, Validator, validate, validate_with};

/// Convenience entry point composing parse → validate.
///
/// Parses `rules` as a YAML (or JSON) rule set and validates `source`
/// against it with the process-wide settings.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the rule set cannot be loaded, a declaration
/// is malformed, or a chain names an unknown rule or malformed argument.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
///
/// let rules = r#"
/// email: "requiredWhenEmpty:[username]"
/// username: "requiredWhenEmpty:[email]"
/// "#;
///
/// let result = rulechain::load(rules, &json!({})).expect("valid rule set");
/// assert_eq!(
///     result.error("email"),
///     Some("The field Email is required when the field Username is empty.")
/// );
/// ```
pub fn load<S>(rules: &str, source: &S) -> Result<ValidationResult, ConfigError>
where
    S: ValueSource + ?Sized,
{
    let rule_set = parse::parse_rule_set(rules)?;
    validate::validate(&rule_set, source)
}
