#![no_main]
use libfuzzer_sys::fuzz_target;
use surfpix::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes is Rgb565Le, and raw565 is lossless for it
    let Ok(decoded) = decode(data) else {
        return;
    };
    assert_eq!(decoded.format(), PixelFormat::Rgb565Le);

    let raw = encode_raw(&decoded).expect("raw565 encode of a decoded surface");
    let Ok(again) = decode(&raw) else {
        // Raw containers under 16 bytes are rejected by design
        assert!(raw.len() < 16, "re-encoded raw565 failed to decode");
        return;
    };
    assert_eq!(decoded, again, "roundtrip pixel mismatch");

    // Scaling a decoded image down and back must keep its shape valid
    let half = convert(&decoded, Some(decoded.width().div_ceil(2)), None, None);
    if let Ok(half) = half {
        half.validate().expect("converted surface is valid");
    }
});
