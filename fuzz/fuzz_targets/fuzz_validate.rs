#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rulechain::{RuleSet, Settings, validate_with};
use serde_json::{Value, json};

#[derive(Debug, Arbitrary)]
struct Input {
    rules: String,
    value: String,
    other: String,
}

fuzz_target!(|input: Input| {
    let rule_set = RuleSet::new().with("field", input.rules.as_str());
    let source = json!({ "field": input.value, "other": Value::String(input.other) });
    let settings = Settings::default();

    // Malformed chains must surface as configuration errors, never panics.
    if let Ok(result) = validate_with(&rule_set, &source, &settings) {
        assert!(result.errors.len() <= 1);
    }
});
