//! Value primitives shared by the rule predicates.
//!
//! Everything here is a pure function over [`serde_json::Value`]: emptiness,
//! trimming, label derivation, numeric coercion, and the format checks behind
//! the built-in format rules.

use crate::enums::ValueType;
use regex::Regex;
use serde_json::Value;
use std::net::IpAddr;
use std::sync::LazyLock;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$").unwrap()
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/?#@]+(?:@[^\s/?#]+)?(?:[/?#][^\s]*)?$").unwrap()
});

static MAC_COLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}$").unwrap());

static MAC_HYPHEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{2}(?:-[0-9A-Fa-f]{2}){5}$").unwrap());

static MAC_DOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{4}(?:\.[0-9A-Fa-f]{4}){2}$").unwrap());

static INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?(?:0|[1-9][0-9]*)$").unwrap());

static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap()
});

static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
});

// ─── Emptiness and trimming ─────────────────────────────────────────────────

/// A value is empty when it is null, an empty string, or an empty
/// collection. Numbers and booleans are never empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Strips leading and trailing whitespace from string values.
/// Other values are returned unchanged.
pub fn trim_value(value: Value) -> Value {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() == s.len() {
                Value::String(s)
            } else {
                Value::String(trimmed.to_string())
            }
        }
        other => other,
    }
}

/// Textual form of a scalar, used for equality and character counting.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

// ─── Labels ─────────────────────────────────────────────────────────────────

/// Derives a display label from a field name: underscores become spaces and
/// each word is capitalized (`ip_address` → `Ip Address`).
pub fn humanize(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut at_word_start = true;
    for c in field.chars() {
        let c = if c == '_' { ' ' } else { c };
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

// ─── Numeric coercion ───────────────────────────────────────────────────────

/// Lenient float coercion: numbers as-is, strings by their leading numeric
/// prefix (`"12abc"` → 12), anything unparseable as 0.
pub fn coerce_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => LEADING_NUMBER_RE
            .find(s.trim_start())
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|f| f.is_finite())
            .unwrap_or(0.0),
        Value::Null => 0.0,
        Value::Array(items) => f64::from(u8::from(!items.is_empty())),
        Value::Object(map) => f64::from(u8::from(!map.is_empty())),
    }
}

/// Lenient integer coercion: [`coerce_float`] truncated toward zero.
pub fn coerce_int(value: &Value) -> i64 {
    if let Some(i) = value.as_i64() {
        return i;
    }
    // `as` saturates at the i64 bounds.
    coerce_float(value).trunc() as i64
}

/// Number of elements. Scalars count as one, empty values as zero.
pub fn element_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        v if is_empty(v) => 0,
        _ => 1,
    }
}

/// Character length of the textual form.
pub fn char_length(value: &Value) -> usize {
    value_to_string(value).chars().count()
}

/// The quantity that length and range rules compare, under the given
/// Type Context.
pub fn measure(value: &Value, value_type: ValueType) -> f64 {
    match value_type {
        ValueType::Array => element_count(value) as f64,
        ValueType::Int => coerce_int(value) as f64,
        ValueType::Float => coerce_float(value),
        ValueType::String => char_length(value) as f64,
    }
}

// ─── Format checks ──────────────────────────────────────────────────────────

pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Absolute URL with a scheme and an authority (`https://host/path`).
pub fn is_url(s: &str) -> bool {
    URL_RE.is_match(s)
}

/// IPv4 or IPv6 address.
pub fn is_ip(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

/// MAC address in colon (`01:23:45:67:89:ab`), hyphen (`01-23-45-67-89-ab`)
/// or dot (`0123.4567.89ab`) notation.
pub fn is_mac_address(s: &str) -> bool {
    MAC_COLON_RE.is_match(s) || MAC_HYPHEN_RE.is_match(s) || MAC_DOT_RE.is_match(s)
}

/// The value compiles as a regular expression.
pub fn is_regex(s: &str) -> bool {
    Regex::new(s).is_ok()
}

/// Whole integer without leading zeros, within the `i64` range.
/// Surrounding whitespace is ignored. A float with no fractional part
/// (`5.0`) counts as an integer.
pub fn is_int(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n
            .as_f64()
            .is_some_and(|f| f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64),
        Value::String(s) => {
            let s = s.trim();
            INT_RE.is_match(s) && s.parse::<i64>().is_ok()
        }
        _ => false,
    }
}

/// Decimal or scientific notation float. Surrounding whitespace is ignored.
pub fn is_float(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => {
            let s = s.trim();
            FLOAT_RE.is_match(s) && s.parse::<f64>().is_ok_and(f64::is_finite)
        }
        _ => false,
    }
}
