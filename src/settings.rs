//! Validator settings: custom rules, message catalogs and the auto-validate
//! hook.
//!
//! A [`Settings`] value can be built and passed to
//! [`Validator::with_settings`](crate::validate::Validator::with_settings)
//! directly. The free functions in this module edit a process-wide copy
//! instead, which [`Validator::new`](crate::validate::Validator::new) reads.
//!
//! Each run works on an immutable snapshot taken when it starts, so edits
//! made while a run is in progress only affect later runs. Edits are
//! expected during start-up, before validation traffic begins.

use crate::catalog::Catalog;
use crate::error::ConfigErrorKind;
use crate::registry::RuleRegistry;
use crate::types::ValidationResult;
use crate::validate::Validatable;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Called after a run of a [`Validatable`] whose `auto_validate()` is true
/// and whose result is invalid.
pub type AutoValidateHook = Arc<dyn Fn(&ValidationResult, &dyn Validatable) + Send + Sync>;

#[derive(Clone, Default)]
pub struct Settings {
    pub rules: RuleRegistry,
    pub catalog: Catalog,
    pub auto_validate: Option<AutoValidateHook>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("rules", &self.rules)
            .field("catalog", &self.catalog)
            .field("auto_validate", &self.auto_validate.is_some())
            .finish()
    }
}

static GLOBAL: LazyLock<RwLock<Arc<Settings>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Settings::default())));

/// The current process-wide settings.
pub fn snapshot() -> Arc<Settings> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Applies `edit` to a copy of the process-wide settings and publishes it.
/// Snapshots already handed out are unaffected.
pub fn configure(edit: impl FnOnce(&mut Settings)) {
    let mut guard = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    let mut next = Settings::clone(&guard);
    edit(&mut next);
    *guard = Arc::new(next);
}

/// Restores the built-in defaults.
///
/// This is the one way registered custom rules leave the process-wide
/// registry. Catalog overrides and the hook are dropped as well. Meant for
/// test isolation or a full re-initialization before any run starts.
pub fn reset() {
    configure(|settings| *settings = Settings::default());
}

pub fn register_rule<F>(name: impl Into<String>, predicate: F)
where
    F: Fn(&Value, Option<&str>) -> bool + Send + Sync + 'static,
{
    let name = name.into();
    configure(move |settings| settings.rules.register(name, predicate));
}

pub fn has_rule(name: &str) -> bool {
    snapshot().rules.has(name)
}

pub fn set_locale(locale: impl Into<String>) {
    let locale = locale.into();
    configure(move |settings| settings.catalog.set_locale(locale));
}

pub fn locale() -> String {
    snapshot().catalog.locale().to_string()
}

pub fn set_messages<K, V, I>(locale: impl Into<String>, messages: I)
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    let locale = locale.into();
    let table: Vec<(String, String)> = messages
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    configure(move |settings| settings.catalog.set_messages(locale, table));
}

pub fn set_error_messages<V, I>(locale: impl Into<String>, messages: I)
where
    V: Into<String>,
    I: IntoIterator<Item = (ConfigErrorKind, V)>,
{
    let locale = locale.into();
    let table: Vec<(ConfigErrorKind, String)> =
        messages.into_iter().map(|(k, v)| (k, v.into())).collect();
    configure(move |settings| settings.catalog.set_error_messages(locale, table));
}

pub fn set_auto_validate_hook<F>(hook: F)
where
    F: Fn(&ValidationResult, &dyn Validatable) + Send + Sync + 'static,
{
    let hook: AutoValidateHook = Arc::new(hook);
    configure(move |settings| settings.auto_validate = Some(hook));
}

pub fn clear_auto_validate_hook() {
    configure(|settings| settings.auto_validate = None);
}
