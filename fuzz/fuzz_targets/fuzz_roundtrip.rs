#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let rules = match rulechain::parse_rule_set(&s) {
        Ok(r) => r,
        Err(_) => return,
    };

    let yaml = match rulechain::serialize(&rules) {
        Ok(y) => y,
        Err(_) => return,
    };

    match rulechain::parse_rule_set(&yaml) {
        Ok(reparsed) => assert_eq!(reparsed, rules),
        Err(e) => panic!(
            "Roundtrip failure: {}\nSerialized YAML:\n{}",
            e,
            yaml.get(..500).unwrap_or(&yaml),
        ),
    }
});
