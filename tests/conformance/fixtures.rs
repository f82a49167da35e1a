use indexmap::IndexMap;
use rulechain::{RuleSet, Settings, validate_with};
use serde_json::Value;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    std::env::var("RULECHAIN_FIXTURES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

#[derive(Debug, serde::Deserialize)]
struct Case {
    name: String,
    rules: RuleSet,
    source: Value,
    expected: Expected,
}

#[derive(Debug, serde::Deserialize)]
struct Expected {
    valid: bool,
    #[serde(default)]
    errors: IndexMap<String, String>,
    #[serde(default)]
    values: Option<IndexMap<String, Value>>,
}

#[test]
fn validation_suite() {
    let path = fixtures_dir().join("validation.yaml");
    let content = std::fs::read_to_string(&path).unwrap();
    let raw: Value = serde_saphyr::from_str(&content).unwrap();
    let cases: Vec<Case> = serde_json::from_value(raw).unwrap();
    assert!(!cases.is_empty());

    let settings = Settings::default();
    let mut failures = Vec::new();

    for case in &cases {
        let result = match validate_with(&case.rules, &case.source, &settings) {
            Ok(result) => result,
            Err(e) => {
                failures.push(format!("{}: unexpected error {}", case.name, e));
                continue;
            }
        };

        if result.is_valid() != case.expected.valid {
            failures.push(format!(
                "{}: expected valid={}, got errors {:?}",
                case.name, case.expected.valid, result.errors
            ));
        }
        if result.errors != case.expected.errors {
            failures.push(format!(
                "{}: expected errors {:?}, got {:?}",
                case.name, case.expected.errors, result.errors
            ));
        }
        if let Some(values) = &case.expected.values {
            if &result.values != values {
                failures.push(format!(
                    "{}: expected values {:?}, got {:?}",
                    case.name, values, result.values
                ));
            }
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
