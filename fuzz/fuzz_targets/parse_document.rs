#![no_main]
use libfuzzer_sys::fuzz_target;

use json_tree::{tokenize, Limits, Parser, Value};

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 can reach the library.
    if let Ok(s) = std::str::from_utf8(data) {
        // Any outcome is fine as long as nothing panics.
        let one_shot = Value::parse(s);

        // The two-stage path must agree with the one-shot helper.
        let staged = tokenize(s)
            .map_err(json_tree::Error::from)
            .and_then(|tokens| {
                Parser::new(&tokens, Limits::default())
                    .parse()
                    .map_err(json_tree::Error::from)
            });
        assert_eq!(one_shot, staged);
    }
});
