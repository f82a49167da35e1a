use super::common::*;
use rulechain::enums::{BuiltinRule, ValueType};
use rulechain::evaluate::{ChainState, apply_builtin};
use rulechain::primitives::coerce_int;
use rulechain::{ConfigError, Settings};
use serde_json::{Value, json};

// ─── Short-circuit ──────────────────────────────────────────────────────────

#[test]
fn chain_stops_at_first_failure() {
    let outcome = check_value("email", "required|email", json!("")).unwrap();
    assert_eq!(outcome.failed_rule.as_deref(), Some("required"));
    assert_eq!(
        outcome.error.as_deref(),
        Some("The field Email is required.")
    );
}

#[test]
fn later_rules_run_when_earlier_pass() {
    let outcome = check_value("email", "required|email", json!("not-an-email")).unwrap();
    assert_eq!(outcome.failed_rule.as_deref(), Some("email"));
    assert_eq!(
        outcome.error.as_deref(),
        Some("The field Email should be valid email.")
    );
}

#[test]
fn unknown_rule_after_failure_is_never_reached() {
    let outcome = check_value("name", "required|noSuchRule", json!("")).unwrap();
    assert_eq!(outcome.failed_rule.as_deref(), Some("required"));
}

#[test]
fn unknown_rule_fails_fast() {
    let err = check_value("name", "noSuchRule|required", json!("")).unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnknownRule {
            rule: "noSuchRule".to_string()
        }
    );
}

#[test]
fn empty_token_is_unknown_rule() {
    let err = check_value("name", "required||email", json!("x@y.io")).unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnknownRule {
            rule: String::new()
        }
    );
}

// ─── Type Context ───────────────────────────────────────────────────────────

#[test]
fn int_context_compares_numerically() {
    let outcome = check_value("age", "int|max:5", json!("7")).unwrap();
    assert_eq!(outcome.failed_rule.as_deref(), Some("max"));
    assert_eq!(
        outcome.error.as_deref(),
        Some("Maximum length of the field Age characters should be 5.")
    );

    assert_eq!(failed_rule("age", "int|max:50", json!("123")), Some("max".into()));
    assert_eq!(failed_rule("age", "max:50", json!("123")), None);
}

#[test]
fn default_context_counts_characters() {
    assert_eq!(failed_rule("code", "max:5", json!("123456")), Some("max".into()));
    assert_eq!(failed_rule("code", "max:5", json!("12345")), None);
    assert_eq!(failed_rule("code", "min:3", json!("héé")), None);
    assert_eq!(failed_rule("code", "min:4", json!("héé")), Some("min".into()));
}

#[test]
fn float_context_compares_fractions() {
    assert_eq!(failed_rule("w", "float|min:1.5", json!("1.25")), Some("min".into()));
    assert_eq!(failed_rule("w", "float|min:1.5", json!("1.5")), None);
    // int context truncates before comparing
    assert_eq!(failed_rule("w", "!int|min:2|max:2", json!("2.9")), None);
}

#[test]
fn array_context_counts_elements() {
    assert_eq!(
        failed_rule("tags", "array|max:2", json!(["a", "b", "c"])),
        Some("max".into())
    );
    assert_eq!(failed_rule("tags", "array|max:2", json!(["a", "b"])), None);
    assert_eq!(failed_rule("tags", "array|min:1", json!([])), Some("min".into()));
}

#[test]
fn type_is_set_even_when_type_rule_is_negated_away() {
    // `int` rejects "abcd", the negation turns that into a pass, and the
    // Type Context is now `int`: "abcd" coerces to 0.
    assert_eq!(failed_rule("v", "!int|max:3", json!("abcd")), None);
    assert_eq!(failed_rule("v", "max:3", json!("abcd")), Some("max".into()));
}

#[test]
fn latest_type_rule_wins() {
    assert_eq!(failed_rule("v", "int|string|max:2", json!("100")), Some("max".into()));
    assert_eq!(failed_rule("v", "string|int|max:200", json!("100")), None);
}

#[test]
fn format_rules_reset_context_to_string() {
    // `ip` declares string: "10.0.0.1" is 8 characters long.
    assert_eq!(failed_rule("v", "!int|ip|max:7", json!("10.0.0.1")), Some("max".into()));
}

#[test]
fn apply_builtin_updates_state_whatever_the_outcome() {
    let mut state = ChainState::new(true);
    let source = json!({});

    let accepted = apply_builtin(BuiltinRule::Float, &json!("nope"), None, &mut state, &source)
        .unwrap();
    assert!(!accepted);
    assert_eq!(state.value_type, ValueType::Float);

    let accepted = apply_builtin(BuiltinRule::Array, &json!([1]), None, &mut state, &source)
        .unwrap();
    assert!(accepted);
    assert_eq!(state.value_type, ValueType::Array);
}

// ─── between ────────────────────────────────────────────────────────────────

#[test]
fn between_is_inclusive_and_type_aware() {
    assert_eq!(failed_rule("n", "int|between:[1,10]", json!("5")), None);
    assert_eq!(failed_rule("n", "int|between:[1,10]", json!(10)), None);
    assert_eq!(
        failed_rule("n", "int|between:[1,10]", json!("11")),
        Some("between".into())
    );
    // characters: "11" has length 2
    assert_eq!(failed_rule("n", "between:[1,10]", json!("11")), None);
}

#[test]
fn between_message_fills_min_and_max() {
    let outcome = check_value("score", "int|between:[1, 10]", json!(0)).unwrap();
    assert_eq!(
        outcome.error.as_deref(),
        Some("The field Score should contain at least 1 and no more than 10 characters.")
    );
}

#[test]
fn between_without_comma_is_invalid_structure() {
    let err = check_value("n", "between:[5]", json!("3")).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidArgumentStructure {
            rule: "between".to_string(),
            structure: "min,max",
        }
    );
    assert_eq!(err.to_string(), "The rule between requires structure min,max");

    let err = check_value("n", "between", json!("3")).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidArgumentStructure { .. }));

    let err = check_value("n", "between:a,b", json!("3")).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidArgumentStructure { .. }));
}

#[test]
fn bound_rules_require_numeric_argument() {
    for rules in ["max", "max:", "min:abc"] {
        let err = check_value("n", rules, json!("3")).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidArgumentStructure { structure: "number", .. }),
            "{}: {:?}",
            rules,
            err
        );
    }
}

// ─── Presence ───────────────────────────────────────────────────────────────

#[test]
fn required_rejects_empty_values_only() {
    for empty in [json!(null), json!(""), json!("   "), json!([]), json!({})] {
        assert_eq!(
            failed_rule("v", "required", empty.clone()),
            Some("required".into()),
            "{:?}",
            empty
        );
    }
    for present in [json!("0"), json!(0), json!(false), json!(["x"])] {
        assert_eq!(failed_rule("v", "required", present.clone()), None, "{:?}", present);
    }
}

#[test]
fn required_when_empty_depends_on_other_field() {
    let source = json!({ "user_name": "jon" });
    let outcome = check("email", "requiredWhenEmpty:[user_name]", &source).unwrap();
    assert!(outcome.passed());

    let source = json!({ "user_name": "  " });
    let outcome = check("email", "requiredWhenEmpty:[user_name]", &source).unwrap();
    assert!(outcome.passed(), "other field is read raw, untrimmed");

    let source = json!({});
    let outcome = check("email", "requiredWhenEmpty:[user_name]", &source).unwrap();
    assert_eq!(
        outcome.error.as_deref(),
        Some("The field Email is required when the field User Name is empty.")
    );
}

#[test]
fn required_when_empty_needs_field_argument() {
    let err = check_value("email", "requiredWhenEmpty", json!("")).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidArgumentStructure {
            rule: "requiredWhenEmpty".to_string(),
            structure: "fieldName",
        }
    );
}

// ─── matchWith and negation ─────────────────────────────────────────────────

#[test]
fn match_with_compares_other_field() {
    let source = json!({ "password": "secret", "confirm": "secret" });
    assert!(check("confirm", "matchWith:password", &source).unwrap().passed());

    let source = json!({ "password": "secret", "confirm": "other" });
    let outcome = check("confirm", "matchWith:password", &source).unwrap();
    assert_eq!(
        outcome.error.as_deref(),
        Some("The field Confirm's value should match with value of the field password.")
    );
}

#[test]
fn negated_match_with_inverts_failure() {
    let same = json!({ "l_name": "Doe", "last_name": "Doe" });
    let outcome = check("l_name", "!matchWith:[last_name]", &same).unwrap();
    assert_eq!(outcome.failed_rule.as_deref(), Some("!matchWith"));
    assert_eq!(
        outcome.error.as_deref(),
        Some("The field L Name's value should not match with value of the field last_name.")
    );

    let different = json!({ "l_name": "Doe", "last_name": "Roe" });
    assert!(check("l_name", "!matchWith:[last_name]", &different).unwrap().passed());
}

#[test]
fn match_with_follows_own_trim_policy() {
    let source = json!({ "a": " abc ", "b": "abc  " });
    assert!(check("a", "matchWith:b", &source).unwrap().passed());
    assert!(!check("a", "matchWith:b|!trim", &source).unwrap().passed());
}

#[test]
fn negated_rule_without_template_falls_back_to_key() {
    let outcome = check_value("v", "!required", json!("x")).unwrap();
    assert_eq!(outcome.error.as_deref(), Some("!required"));
}

// ─── Trimming and recorded values ───────────────────────────────────────────

#[test]
fn values_are_trimmed_by_default() {
    let outcome = check_value("name", "required", json!("  Jon ")).unwrap();
    assert_eq!(outcome.value, Some(json!("Jon")));
}

#[test]
fn no_trim_token_keeps_whitespace_anywhere_in_chain() {
    let outcome = check_value("name", "required|!trim", json!("  Jon ")).unwrap();
    assert!(outcome.passed());
    assert_eq!(outcome.value, Some(json!("  Jon ")));

    assert_eq!(failed_rule("name", "!trim|max:3", json!(" Jon")), Some("max".into()));
    assert_eq!(failed_rule("name", "max:3", json!(" Jon")), None);
}

#[test]
fn whitespace_only_value_is_empty_after_trim() {
    assert_eq!(failed_rule("v", "required|!trim", json!("  ")), None);
}

#[test]
fn value_is_recorded_for_failing_field() {
    let outcome = check_value("age", "int", json!(" abc ")).unwrap();
    assert!(!outcome.passed());
    assert_eq!(outcome.value, Some(json!("abc")));
}

#[test]
fn chain_of_only_no_trim_records_nothing() {
    let outcome = check_value("age", "!trim", json!("x")).unwrap();
    assert!(outcome.passed());
    assert_eq!(outcome.value, None);
}

// ─── Formats ────────────────────────────────────────────────────────────────

#[test]
fn format_rules_accept_empty_values() {
    for rule in ["email", "url", "ip", "macAddress", "regexp", "int", "float", "string", "array"] {
        assert_eq!(failed_rule("v", rule, json!("")), None, "{}", rule);
        assert_eq!(failed_rule("v", rule, Value::Null), None, "{}", rule);
    }
}

#[test]
fn format_rules_check_their_format() {
    let cases: &[(&str, Value, bool)] = &[
        ("email", json!("jon.doe@example.com"), true),
        ("email", json!("jon.doe@localhost"), false),
        ("email", json!("jon doe@example.com"), false),
        ("url", json!("https://example.com/a?b=c"), true),
        ("url", json!("ftp://files.example.com"), true),
        ("url", json!("example.com"), false),
        ("ip", json!("192.168.103.1"), true),
        ("ip", json!("::1"), true),
        ("ip", json!("256.1.1.1"), false),
        ("ip", json!(35), false),
        ("macAddress", json!("01:23:45:67:89:ab"), true),
        ("macAddress", json!("01-23-45-67-89-AB"), true),
        ("macAddress", json!("0123.4567.89ab"), true),
        ("macAddress", json!("01:23-45:67:89:ab"), false),
        ("regexp", json!("^[a-z]+$"), true),
        ("regexp", json!("[a-z"), false),
        ("int", json!("42"), true),
        ("int", json!(" -7 "), true),
        ("int", json!("007"), false),
        ("int", json!("4.2"), false),
        ("int", json!(35), true),
        ("float", json!("4.2"), true),
        ("float", json!("1e3"), true),
        ("float", json!(".5"), true),
        ("float", json!("inf"), false),
        ("string", json!("abc"), true),
        ("string", json!(35), false),
        ("array", json!(["a"]), true),
        ("array", json!("a"), false),
    ];
    for (rule, value, ok) in cases {
        let failed = failed_rule("v", rule, value.clone());
        assert_eq!(failed.is_none(), *ok, "{} on {:?}", rule, value);
    }
}

// ─── Custom rules ───────────────────────────────────────────────────────────

fn settings_with_even_number() -> Settings {
    let mut settings = Settings::default();
    settings
        .rules
        .register("evenNumber", |value: &Value, _arg: Option<&str>| coerce_int(value) % 2 == 0);
    settings
}

#[test]
fn custom_rule_is_invoked_with_fallback_message() {
    let settings = settings_with_even_number();
    let source = json!({ "n": "3" });
    let outcome = check_with(&settings, "n", "evenNumber", &source).unwrap();
    assert_eq!(outcome.error.as_deref(), Some("evenNumber"));

    let source = json!({ "n": "4" });
    assert!(check_with(&settings, "n", "evenNumber", &source).unwrap().passed());
}

#[test]
fn custom_rule_obeys_negation() {
    let settings = settings_with_even_number();
    let source = json!({ "n": 4 });
    let outcome = check_with(&settings, "n", "!evenNumber", &source).unwrap();
    assert_eq!(outcome.failed_rule.as_deref(), Some("!evenNumber"));
    assert_eq!(outcome.error.as_deref(), Some("!evenNumber"));
}

#[test]
fn custom_rule_receives_argument() {
    let mut settings = Settings::default();
    settings.rules.register("startsWith", |value: &Value, arg: Option<&str>| {
        value
            .as_str()
            .zip(arg)
            .is_some_and(|(s, prefix)| s.starts_with(prefix))
    });
    let source = json!({ "code": "AB-123" });
    assert!(check_with(&settings, "code", "startsWith:AB", &source).unwrap().passed());
    assert!(!check_with(&settings, "code", "startsWith:[XY]", &source).unwrap().passed());
}

#[test]
fn custom_rule_message_uses_catalog() {
    let mut settings = settings_with_even_number();
    settings
        .catalog
        .set_message("en", "evenNumber", "The field :fieldName must be even, at most :length.");

    let source = json!({ "n": "3" });
    let outcome = check_with(&settings, "n", "max:10|evenNumber", &source).unwrap();
    // :length was filled by `max` earlier in the chain and is still set.
    assert_eq!(
        outcome.error.as_deref(),
        Some("The field N must be even, at most 10.")
    );
}

#[test]
fn builtin_wins_over_custom_rule_with_same_name() {
    let mut settings = Settings::default();
    settings.rules.register("email", |_: &Value, _: Option<&str>| false);
    let source = json!({ "email": "jon@example.com" });
    assert!(check_with(&settings, "email", "email", &source).unwrap().passed());
}

#[test]
fn placeholders_do_not_leak_between_fields() {
    let mut settings = Settings::default();
    settings
        .catalog
        .set_message("en", "required", "The field :fieldName is required (:length).");
    let source = json!({ "a": "abc" });

    let first = check_with(&settings, "a", "max:1", &source).unwrap();
    assert!(!first.passed());

    let second = check_with(&settings, "b", "required", &source).unwrap();
    assert_eq!(
        second.error.as_deref(),
        Some("The field B is required (:length).")
    );
}
