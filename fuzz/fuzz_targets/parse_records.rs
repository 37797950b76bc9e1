#![no_main]
use index_workloads::extract::{parse_generator_line, KeyPrefix};
use index_workloads::record::{Record, StrictLine};
use libfuzzer_sys::fuzz_target;

/// Trace line parsers must reject bad input with an error, never a panic.
/// A line that parses must also survive being written and parsed again.
fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(record) = Record::parse(line, 0) {
        let reparsed = Record::parse(&record.to_string(), 0).unwrap();
        assert_eq!(reparsed, record);
    }

    let _ = StrictLine::parse(line, 0);

    let prefix = KeyPrefix::Strip("user".to_string());
    let _ = parse_generator_line(line, 0, &prefix);
    let _ = parse_generator_line(line, 0, &KeyPrefix::Keep);
});
