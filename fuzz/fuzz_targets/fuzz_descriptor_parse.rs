#![no_main]

use libfuzzer_sys::fuzz_target;
use spriteloop_descriptor::{parse_legacy_int, Descriptor};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Parsing must never panic, and any accepted document must survive
        // a write/re-parse cycle
        if let Ok(doc) = Descriptor::parse(text) {
            let _ = Descriptor::parse(&doc.to_text());
        }
        let _ = parse_legacy_int(text);
    }
});
