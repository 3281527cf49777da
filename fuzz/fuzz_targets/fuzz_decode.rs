#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Auto-detect decode (PNG, raw565) and probing must never panic
    let _ = surfpix::decode(data);
    let _ = surfpix::ImageInfo::from_bytes(data);
});
