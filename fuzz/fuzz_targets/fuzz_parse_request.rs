#![no_main]

use libfuzzer_sys::fuzz_target;

use fibmemo_cli::input::{parse_request, InputError};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    match parse_request(raw) {
        Ok(n) => {
            let trimmed = raw.trim();
            let digits = trimmed.trim_start_matches(['+', '-']);
            assert_eq!(digits.parse::<u64>().ok(), Some(n), "accepted {raw:?}");
            if trimmed.starts_with('-') {
                assert_eq!(n, 0, "negative accepted: {raw:?}");
            }
        }
        Err(InputError::Negative(input)) => assert!(input.starts_with('-')),
        Err(err) => assert!(!err.to_string().is_empty()),
    }
});
