#![no_main]
use libfuzzer_sys::fuzz_target;
use wadloxide::reader::{parse_bytes, ReadOptions, UnknownElementPolicy};

fuzz_target!(|data: &[u8]| {
    // Permissive and strict reading should never panic
    let _ = parse_bytes(data, &ReadOptions::default());
    let strict = ReadOptions::default().unknown_elements(UnknownElementPolicy::Reject);
    let _ = parse_bytes(data, &strict);
});
