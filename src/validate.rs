//! Validation runs over a whole rule set.
//!
//! Every declaration is normalized before any field is evaluated, so a
//! malformed declaration anywhere in the set aborts the run up front. Fields
//! are then evaluated independently in declaration order.

use crate::error::ConfigError;
use crate::evaluate::{ValueSource, evaluate_field};
use crate::parse::normalize;
use crate::settings::{self, Settings};
use crate::types::{KeyedDeclaration, RuleChain, RuleDeclaration, RuleSet, ValidationResult};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::{Arc, LazyLock};

/// An object that carries its own validation rules.
pub trait Validatable {
    fn validation_rules(&self) -> RuleSet;

    /// Whether the auto-validate hook should fire when validation fails.
    fn auto_validate(&self) -> bool {
        false
    }
}

/// Validates `source` against `rules` using the process-wide settings.
///
/// # Errors
///
/// Returns the first [`ConfigError`] found in the declarations or raised
/// while evaluating a chain. Field-level validation failures are reported
/// in the returned [`ValidationResult`] instead.
pub fn validate<S>(rules: &RuleSet, source: &S) -> Result<ValidationResult, ConfigError>
where
    S: ValueSource + ?Sized,
{
    validate_with(rules, source, &settings::snapshot())
}

/// Validates `source` against `rules` using explicit settings.
pub fn validate_with<S>(
    rules: &RuleSet,
    source: &S,
    settings: &Settings,
) -> Result<ValidationResult, ConfigError>
where
    S: ValueSource + ?Sized,
{
    let fields = normalize(rules)?;
    tracing::debug!(
        fields = fields.len(),
        locale = settings.catalog.locale(),
        "validation run started"
    );

    let mut result = ValidationResult::default();
    for field in &fields {
        let outcome = evaluate_field(field, &source, settings)?;
        if let Some(value) = outcome.value {
            result.values.insert(outcome.field.clone(), value);
        }
        if let Some(message) = outcome.error {
            result.errors.insert(outcome.field, message);
        }
    }

    tracing::debug!(
        fields = fields.len(),
        failed = result.errors.len(),
        "validation run finished"
    );
    Ok(result)
}

/// Stateful front end: declare rules, run, then query the outcome.
///
/// ```rust
/// use rulechain::Validator;
/// use serde_json::json;
///
/// let source = json!({ "first_name": "Jon", "age": "35" });
/// let mut validator = Validator::new(source)
///     .add_rule("first_name", "First name", ["required", "max:20"])
///     .add_rule("age", "Age", ["int", "between:[18,99]"]);
///
/// validator.run().expect("rules are well-formed");
/// assert!(validator.is_valid());
/// ```
pub struct Validator<S> {
    source: S,
    rules: RuleSet,
    settings: Option<Arc<Settings>>,
    result: Option<ValidationResult>,
}

static NO_RESULT: LazyLock<ValidationResult> = LazyLock::new(ValidationResult::default);

impl<S: ValueSource> Validator<S> {
    /// A validator that snapshots the process-wide settings on each run.
    pub fn new(source: S) -> Self {
        Self {
            source,
            rules: RuleSet::new(),
            settings: None,
            result: None,
        }
    }

    /// A validator bound to explicit settings.
    pub fn with_settings(source: S, settings: impl Into<Arc<Settings>>) -> Self {
        Self {
            settings: Some(settings.into()),
            ..Self::new(source)
        }
    }

    /// Replaces all declarations.
    pub fn set_rules(mut self, rules: impl Into<RuleSet>) -> Self {
        self.rules = rules.into();
        self
    }

    /// Declares one field with an explicit label.
    pub fn add_rule<I, R>(
        mut self,
        field: impl Into<String>,
        label: impl Into<String>,
        rules: I,
    ) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let decl = RuleDeclaration::Keyed(KeyedDeclaration {
            label: Some(label.into()),
            rules: Some(RuleChain::List(rules.into_iter().map(Into::into).collect())),
        });
        self.rules.insert(field, decl);
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Runs the declared rules.
    ///
    /// The previous result is discarded first: after a run that fails with a
    /// [`ConfigError`] there is no result and [`is_valid`](Self::is_valid)
    /// is `false`.
    pub fn run(&mut self) -> Result<&ValidationResult, ConfigError> {
        self.result = None;
        let settings = self.current_settings();
        let result = validate_with(&self.rules, &self.source, &settings)?;
        Ok(&*self.result.insert(result))
    }

    /// Runs with rules taken from `validatable` when none were declared.
    ///
    /// Declared rules always win. When the validatable's rules are used, its
    /// auto-validate flag is honored: an invalid result is passed to the
    /// configured auto-validate hook, if any.
    pub fn run_validatable(
        &mut self,
        validatable: &dyn Validatable,
    ) -> Result<&ValidationResult, ConfigError> {
        self.result = None;
        let settings = self.current_settings();
        let mut auto_validate = false;
        if self.rules.is_empty() {
            self.rules = validatable.validation_rules();
            auto_validate = validatable.auto_validate();
        }

        let result = validate_with(&self.rules, &self.source, &settings)?;

        if auto_validate && !result.is_valid() {
            if let Some(hook) = &settings.auto_validate {
                tracing::debug!("invoking auto-validate hook");
                hook(&result, validatable);
            }
        }
        Ok(&*self.result.insert(result))
    }

    /// Result of the last completed run, if any.
    pub fn result(&self) -> Option<&ValidationResult> {
        self.result.as_ref()
    }

    /// `true` only after a completed run with no field errors.
    pub fn is_valid(&self) -> bool {
        self.result.as_ref().is_some_and(ValidationResult::is_valid)
    }

    /// Field errors of the last completed run; empty when there is none.
    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.last().errors
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.last().values
    }

    fn last(&self) -> &ValidationResult {
        self.result.as_ref().unwrap_or(&NO_RESULT)
    }

    fn current_settings(&self) -> Arc<Settings> {
        self.settings.clone().unwrap_or_else(settings::snapshot)
    }
}
