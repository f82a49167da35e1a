//! Rule-chain evaluation for a single field.
//!
//! A chain runs left to right against one value and stops at the first
//! failing rule. Two pieces of state are threaded through the chain in a
//! [`ChainState`]: the Type Context, set by type rules and read by
//! `min`/`max`/`between`, and the placeholder attributes later used to
//! render the error message. Both start fresh for every field.

use crate::catalog::Attributes;
use crate::enums::{BuiltinRule, ValueType};
use crate::error::ConfigError;
use crate::parse::{NO_TRIM_TOKEN, parse_rule};
use crate::primitives::{
    humanize, is_email, is_empty, is_float, is_int, is_ip, is_mac_address, is_regex, is_url,
    measure, trim_value, value_to_string,
};
use crate::registry::ResolvedRule;
use crate::settings::Settings;
use crate::types::{FieldRules, ParsedRule};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

// ─── ValueSource ────────────────────────────────────────────────────────────

/// Supplies raw field values by exact field name.
///
/// A missing field must read as [`Value::Null`], never as an error.
/// `matchWith` and `requiredWhenEmpty` read other fields through the same
/// source.
pub trait ValueSource {
    fn get(&self, field: &str) -> Value;
}

impl ValueSource for HashMap<String, Value> {
    fn get(&self, field: &str) -> Value {
        HashMap::get(self, field).cloned().unwrap_or(Value::Null)
    }
}

impl ValueSource for HashMap<String, String> {
    fn get(&self, field: &str) -> Value {
        HashMap::get(self, field)
            .map(|s| Value::String(s.clone()))
            .unwrap_or(Value::Null)
    }
}

impl ValueSource for BTreeMap<String, Value> {
    fn get(&self, field: &str) -> Value {
        BTreeMap::get(self, field).cloned().unwrap_or(Value::Null)
    }
}

impl ValueSource for IndexMap<String, Value> {
    fn get(&self, field: &str) -> Value {
        IndexMap::get(self, field).cloned().unwrap_or(Value::Null)
    }
}

impl ValueSource for serde_json::Map<String, Value> {
    fn get(&self, field: &str) -> Value {
        serde_json::Map::get(self, field)
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// A JSON object is read by key; any other value reads as empty.
impl ValueSource for Value {
    fn get(&self, field: &str) -> Value {
        self.as_object()
            .and_then(|map| map.get(field))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

impl<T: ValueSource + ?Sized> ValueSource for &T {
    fn get(&self, field: &str) -> Value {
        (**self).get(field)
    }
}

// ─── Chain state ────────────────────────────────────────────────────────────

/// Mutable state of one field's chain evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChainState {
    /// Type Context. Starts as `string`.
    pub value_type: ValueType,
    /// Whether values read for this field (and for `matchWith`) are trimmed.
    pub trim: bool,
    /// Message placeholders filled by the rules run so far. Not cleared
    /// between rules of the same chain.
    pub attributes: Attributes,
}

impl ChainState {
    pub fn new(trim: bool) -> Self {
        Self {
            value_type: ValueType::String,
            trim,
            attributes: Attributes::new(),
        }
    }

    fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        self.attributes.insert(key.to_string(), value.into());
    }
}

// ─── Field outcome ──────────────────────────────────────────────────────────

/// Result of evaluating one field's chain.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldOutcome {
    pub field: String,
    /// Value seen by the last rule that ran. `None` if no rule ran.
    pub value: Option<Value>,
    /// Rendered message of the failing rule.
    pub error: Option<String>,
    /// Catalog key of the failing rule (`"max"`, `"!matchWith"`).
    pub failed_rule: Option<String>,
}

impl FieldOutcome {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

// ─── Chain evaluation ───────────────────────────────────────────────────────

/// Evaluates one field's rule chain against `source`.
///
/// The value is trimmed unless the chain contains `!trim`. Rules run in
/// declared order; the first rule whose (possibly negated) outcome is a
/// failure produces the field's only error and ends the chain.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownRule`] when a token names no built-in or
/// registered rule, and [`ConfigError::InvalidArgumentStructure`] when a
/// rule's argument is missing or malformed. Both are raised at the rule's
/// position in the chain, before that rule looks at the value.
pub fn evaluate_field(
    rules: &FieldRules,
    source: &dyn ValueSource,
    settings: &Settings,
) -> Result<FieldOutcome, ConfigError> {
    let trim = !rules.chain.iter().any(|token| token == NO_TRIM_TOKEN);
    let raw = source.get(&rules.field);
    let value = if trim { trim_value(raw) } else { raw };

    let mut state = ChainState::new(trim);
    let mut outcome = FieldOutcome {
        field: rules.field.clone(),
        value: None,
        error: None,
        failed_rule: None,
    };

    for token in &rules.chain {
        if token == NO_TRIM_TOKEN {
            continue;
        }

        let rule = parse_rule(token);
        let resolved = settings.rules.resolve(&rule.name)?;

        outcome.value = Some(value.clone());
        let accepted = apply_rule(&resolved, &rule, &value, &mut state, source)?;
        let failed = if rule.negated { accepted } else { !accepted };

        tracing::trace!(
            field = %rules.field,
            rule = %rule.name,
            negated = rule.negated,
            value_type = %state.value_type,
            accepted,
            "rule evaluated"
        );

        if failed {
            state.set_attribute(":fieldName", rules.label.clone());
            let key = rule.message_key();
            outcome.error = Some(settings.catalog.resolve(&key, &state.attributes));
            outcome.failed_rule = Some(key);
            break;
        }
    }

    Ok(outcome)
}

/// Runs one resolved rule and reports whether the value is acceptable.
///
/// Negation is not applied here; `true` always means the predicate itself
/// accepted the value.
pub fn apply_rule(
    resolved: &ResolvedRule,
    rule: &ParsedRule,
    value: &Value,
    state: &mut ChainState,
    source: &dyn ValueSource,
) -> Result<bool, ConfigError> {
    match resolved {
        ResolvedRule::Builtin(builtin) => {
            apply_builtin(*builtin, value, rule.argument.as_deref(), state, source)
        }
        ResolvedRule::Custom(predicate) => Ok(predicate(value, rule.argument.as_deref())),
    }
}

/// Runs a built-in rule.
///
/// Type rules update `state.value_type` whether or not they accept the
/// value.
pub fn apply_builtin(
    rule: BuiltinRule,
    value: &Value,
    argument: Option<&str>,
    state: &mut ChainState,
    source: &dyn ValueSource,
) -> Result<bool, ConfigError> {
    if let Some(declared) = rule.declared_type() {
        state.value_type = declared;
    }

    let accepted = match rule {
        BuiltinRule::Required => !is_empty(value),
        BuiltinRule::RequiredWhenEmpty => {
            let other = field_argument(rule, argument)?;
            state.set_attribute(":otherField", humanize(other));
            if is_empty(&source.get(other)) {
                !is_empty(value)
            } else {
                true
            }
        }
        BuiltinRule::MacAddress => format_check(value, is_mac_address),
        BuiltinRule::Regexp => format_check(value, is_regex),
        BuiltinRule::Url => format_check(value, is_url),
        BuiltinRule::Ip => format_check(value, is_ip),
        BuiltinRule::Email => format_check(value, is_email),
        BuiltinRule::Float => is_float(value) || is_empty(value),
        BuiltinRule::Int => is_int(value) || is_empty(value),
        BuiltinRule::String => value.is_string() || is_empty(value),
        BuiltinRule::Array => value.is_array() || is_empty(value),
        BuiltinRule::Max => {
            let (text, bound) = bound_argument(rule, argument)?;
            state.set_attribute(":length", text);
            measure(value, state.value_type) <= bound
        }
        BuiltinRule::Min => {
            let (text, bound) = bound_argument(rule, argument)?;
            state.set_attribute(":length", text);
            measure(value, state.value_type) >= bound
        }
        BuiltinRule::Between => {
            let (min, max) = range_argument(argument)?;
            state.set_attribute(":min", min.0);
            state.set_attribute(":max", max.0);
            let measured = measure(value, state.value_type);
            measured >= min.1 && measured <= max.1
        }
        BuiltinRule::MatchWith => {
            let other = field_argument(rule, argument)?;
            state.set_attribute(":otherField", other);
            let other_value = source.get(other);
            let other_value = if state.trim {
                trim_value(other_value)
            } else {
                other_value
            };
            value_to_string(value) == value_to_string(&other_value)
        }
    };

    Ok(accepted)
}

/// Format rules accept empty values; presence is `required`'s job.
fn format_check(value: &Value, check: fn(&str) -> bool) -> bool {
    if is_empty(value) {
        return true;
    }
    match value {
        Value::Array(_) | Value::Object(_) => false,
        scalar => check(&value_to_string(scalar)),
    }
}

fn field_argument(rule: BuiltinRule, argument: Option<&str>) -> Result<&str, ConfigError> {
    argument
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ConfigError::invalid_argument(rule.name(), "fieldName"))
}

type Bound = (String, f64);

fn bound_argument(rule: BuiltinRule, argument: Option<&str>) -> Result<Bound, ConfigError> {
    let text = argument
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ConfigError::invalid_argument(rule.name(), "number"))?;
    let bound = parse_bound(text)
        .ok_or_else(|| ConfigError::invalid_argument(rule.name(), "number"))?;
    Ok((text.to_string(), bound))
}

/// Parses `"min,max"`. Anything after a second comma is ignored.
fn range_argument(argument: Option<&str>) -> Result<(Bound, Bound), ConfigError> {
    let malformed = || ConfigError::invalid_argument(BuiltinRule::Between.name(), "min,max");

    let argument = argument.ok_or_else(malformed)?;
    if !argument.contains(',') {
        return Err(malformed());
    }

    let mut parts = argument.split(',').map(str::trim);
    let min = parts.next().ok_or_else(malformed)?;
    let max = parts.next().ok_or_else(malformed)?;
    let min_value = parse_bound(min).ok_or_else(malformed)?;
    let max_value = parse_bound(max).ok_or_else(malformed)?;

    Ok(((min.to_string(), min_value), (max.to_string(), max_value)))
}

fn parse_bound(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|f| f.is_finite())
}
