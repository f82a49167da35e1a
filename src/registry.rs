//! Registry of custom rule predicates.
//!
//! Rule names resolve built-ins first: a custom rule registered under a
//! built-in name (`email`, `max`, ...) is stored but never dispatched.

use crate::enums::BuiltinRule;
use crate::error::ConfigError;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A custom predicate. Receives the field value and the rule argument (if
/// any) and returns `true` when the value is acceptable.
pub type Predicate = Arc<dyn Fn(&Value, Option<&str>) -> bool + Send + Sync>;

/// Where a rule name resolved to.
#[derive(Clone)]
pub enum ResolvedRule {
    Builtin(BuiltinRule),
    Custom(Predicate),
}

impl fmt::Debug for ResolvedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedRule::Builtin(rule) => f.debug_tuple("Builtin").field(rule).finish(),
            ResolvedRule::Custom(_) => f.debug_tuple("Custom").field(&"<fn>").finish(),
        }
    }
}

#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Predicate>,
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.rules.keys().collect();
        names.sort();
        f.debug_struct("RuleRegistry").field("rules", &names).finish()
    }
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a custom rule.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&Value, Option<&str>) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        if BuiltinRule::from_name(&name).is_some() {
            tracing::warn!(rule = %name, "custom rule shadowed by built-in rule of the same name");
        }
        self.rules.insert(name, Arc::new(predicate));
    }

    /// Whether a custom rule with this name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Returns the custom predicate registered under `name`.
    pub fn get(&self, name: &str) -> Option<Predicate> {
        self.rules.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Resolves a rule name: built-ins first, then custom rules.
    pub fn resolve(&self, name: &str) -> Result<ResolvedRule, ConfigError> {
        if let Some(builtin) = BuiltinRule::from_name(name) {
            return Ok(ResolvedRule::Builtin(builtin));
        }
        self.get(name)
            .map(ResolvedRule::Custom)
            .ok_or_else(|| ConfigError::UnknownRule {
                rule: name.to_string(),
            })
    }
}
