#![no_main]
use fromxml::XmlLexer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for token in XmlLexer::new(s) {
            if token.is_err() {
                break;
            }
        }
    }
});
