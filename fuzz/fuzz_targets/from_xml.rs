#![no_main]
use fromxml::{from_xml_bytes_with_config, CloseTagPolicy, Config, MixedContent};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = from_xml_bytes_with_config(data, Config::default());
    let strict = Config::default()
        .with_close_tags(CloseTagPolicy::Strict)
        .with_mixed_content(MixedContent::Ordered);
    let _ = from_xml_bytes_with_config(data, strict);
});
