#![no_main]

use libfuzzer_sys::fuzz_target;
use lapsewatch::source::parse_event_line;

fuzz_target!(|data: &[u8]| {
    // Parsing must never panic, whatever the line holds
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_event_line(input);
    }
});
