//! [`RuleSet`] → YAML / JSON serialization.
//!
//! Output parses back with [`parse_rule_set`](crate::parse::parse_rule_set)
//! into an equal rule set, field order included.

use crate::error::SerializeError;
use crate::types::RuleSet;

/// Serialize a rule set to a YAML string.
pub fn serialize(rules: &RuleSet) -> Result<String, SerializeError> {
    // Convert to serde_json::Value first for consistent field ordering
    let value = serde_json::to_value(rules).map_err(|e| SerializeError {
        message: format!("failed to convert rule set to JSON value: {}", e),
    })?;

    serde_saphyr::to_string(&value).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })
}

/// Serialize a rule set to pretty-printed JSON.
pub fn serialize_json(rules: &RuleSet) -> Result<String, SerializeError> {
    serde_json::to_string_pretty(rules).map_err(|e| SerializeError {
        message: format!("failed to serialize to JSON: {}", e),
    })
}
