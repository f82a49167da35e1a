use proptest::prelude::*;
use rulechain::{RuleSet, Settings, validate_with};
use serde_json::{Value, json};

fn arb_rules() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("required"),
        Just("required|max:5"),
        Just("int|between:[18,99]"),
        Just("email"),
        Just("!matchWith:other"),
        Just("string|min:2|!trim"),
        Just("requiredWhenEmpty:other"),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i16>().prop_map(|i| json!(i)),
        "[ a-z0-9@.]{0,10}".prop_map(Value::String),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn repeated_runs_give_identical_results(
        rules in arb_rules(),
        value in arb_value(),
        other in arb_value(),
    ) {
        let rule_set = RuleSet::new().with("field", rules);
        let source = json!({ "field": value, "other": other });
        let settings = Settings::default();

        let first = validate_with(&rule_set, &source, &settings).unwrap();
        let second = validate_with(&rule_set, &source, &settings).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn at_most_one_error_per_declared_field(
        a in arb_rules(),
        b in arb_rules(),
        value in arb_value(),
    ) {
        let rule_set = RuleSet::new().with("field", a).with("other", b);
        let source = json!({ "field": value.clone(), "other": value });
        let result = validate_with(&rule_set, &source, &Settings::default()).unwrap();

        prop_assert!(result.errors.len() <= 2);
        prop_assert!(result.errors.keys().all(|k| k == "field" || k == "other"));
        prop_assert_eq!(result.is_valid(), result.errors.is_empty());
    }
}
