#![no_main]
use libfuzzer_sys::fuzz_target;
use wadloxide::router::resolve_routes;
use wadloxide::{parse_str, to_string, WriteOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Whatever the reader accepts, the writer must emit something the
        // reader accepts too.
        if let Ok(app) = parse_str(s) {
            let output = to_string(&app, &WriteOptions::default());
            let again = parse_str(&output);
            assert!(again.is_ok(), "rewritten document rejected:\n{output}");
            if let Some(resources) = &app.resources {
                let _ = resolve_routes(resources);
            }
        }
    }
});
