#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let rule = rulechain::parse_rule(&s);
    if let Some(argument) = &rule.argument {
        assert!(!argument.contains('[') && !argument.contains(']'));
    }
});
