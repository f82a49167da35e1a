use crate::error::ConfigError;
use crate::primitives::humanize;
use crate::types::{FieldRules, ParsedRule, RuleChain, RuleDeclaration, RuleSet};

/// Marks a rule as negated when it prefixes the rule name.
pub const NEGATION_MARKER: char = '!';

/// Pseudo-rule that disables trimming for the whole chain.
pub const NO_TRIM_TOKEN: &str = "!trim";

/// Parses one rule token into name, argument and negation flag.
///
/// The token is split on the first `:`. Square brackets in the argument are
/// cosmetic and removed, so `between:[1,10]` and `between:1,10` are the
/// same rule. Negation is read from the rule name, so `!between:[1,10]`
/// negates `between`.
pub fn parse_rule(token: &str) -> ParsedRule {
    let (name, argument) = match token.split_once(':') {
        Some((name, arg)) => (name, Some(arg.replace(['[', ']'], ""))),
        None => (token, None),
    };

    match name.strip_prefix(NEGATION_MARKER) {
        Some(stripped) => ParsedRule {
            name: stripped.to_string(),
            argument,
            negated: true,
        },
        None => ParsedRule {
            name: name.to_string(),
            argument,
            negated: false,
        },
    }
}

/// Resolves one declaration into its label and rule tokens.
///
/// Inline declarations derive the label from the field name
/// (`first_name` → `First Name`).
pub fn normalize_declaration(
    field: &str,
    decl: &RuleDeclaration,
) -> Result<FieldRules, ConfigError> {
    let missing_label = || ConfigError::MissingLabel {
        field: field.to_string(),
    };
    let missing_rules = || ConfigError::MissingRuleString {
        field: field.to_string(),
    };

    let (label, chain) = match decl {
        RuleDeclaration::Inline(rules) => {
            if rules.is_empty() {
                return Err(ConfigError::MalformedInlineRule {
                    field: field.to_string(),
                });
            }
            (humanize(field), RuleChain::Joined(rules.clone()).tokens())
        }
        RuleDeclaration::Indexed(items) => {
            let label = items
                .first()
                .filter(|s| !s.is_empty())
                .ok_or_else(missing_label)?;
            let rules = items
                .get(1)
                .filter(|s| !s.is_empty())
                .ok_or_else(missing_rules)?;
            (label.clone(), RuleChain::Joined(rules.clone()).tokens())
        }
        RuleDeclaration::Keyed(keyed) => {
            let label = keyed
                .label
                .as_ref()
                .filter(|s| !s.is_empty())
                .ok_or_else(missing_label)?;
            let rules = keyed
                .rules
                .as_ref()
                .filter(|r| !r.is_empty())
                .ok_or_else(missing_rules)?;
            (label.clone(), rules.tokens())
        }
    };

    Ok(FieldRules {
        field: field.to_string(),
        label,
        chain,
    })
}

/// Normalizes every declaration in a rule set, in declaration order.
///
/// Stops at the first malformed declaration; no field is evaluated when this
/// fails.
pub fn normalize(rules: &RuleSet) -> Result<Vec<FieldRules>, ConfigError> {
    rules
        .fields
        .iter()
        .map(|(field, decl)| normalize_declaration(field, decl))
        .collect()
}

/// Parses a rule set from YAML text.
///
/// JSON is accepted too, since it is valid YAML. The document root must be a
/// mapping from field name to declaration. Declaration order is kept.
pub fn parse_rule_set(input: &str) -> Result<RuleSet, ConfigError> {
    if input.trim().is_empty() {
        return Err(load_error("empty input"));
    }

    let value: serde_json::Value =
        serde_saphyr::from_str(input).map_err(|e| load_error(&e.to_string()))?;
    rule_set_from_value(value)
}

/// Parses a rule set from JSON text.
pub fn parse_rule_set_json(input: &str) -> Result<RuleSet, ConfigError> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| load_error(&e.to_string()))?;
    rule_set_from_value(value)
}

fn rule_set_from_value(value: serde_json::Value) -> Result<RuleSet, ConfigError> {
    if !value.is_object() {
        return Err(load_error("rule set root must be a mapping"));
    }
    serde_json::from_value(value).map_err(|e| load_error(&e.to_string()))
}

fn load_error(message: &str) -> ConfigError {
    ConfigError::Load {
        message: message.to_string(),
    }
}
