#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(model) = pomxml::from_bytes(data) {
        let _ = pomxml::to_string(&model);
    }
});
