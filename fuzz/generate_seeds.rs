#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // raw565 3x2: header + six LE pixels
    let mut raw = vec![3u8, 0, 2, 0];
    for px in [0xF800u16, 0x07E0, 0x001F, 0xFFFF, 0x0000, 0x8410] {
        raw.extend_from_slice(&px.to_le_bytes());
    }
    fs::write(format!("{dir}/raw_3x2.raw"), raw).unwrap();

    // Minimal PNG 1x1 8-bit grayscale (stored zlib block)
    let png: &[u8] = b"\x89PNG\r\n\x1a\n\
\x00\x00\x00\x0dIHDR\x00\x00\x00\x01\x00\x00\x00\x01\x08\x00\x00\x00\x00\x3a\x7e\x9b\x55\
\x00\x00\x00\x0aIDAT\x78\x9c\x63\x60\x00\x00\x00\x02\x00\x01\x48\xaf\xa4\x71\
\x00\x00\x00\x00IEND\xae\x42\x60\x82";
    fs::write(format!("{dir}/png_gray_1x1.png"), png).unwrap();

    // Same image with IHDR claiming 60000x60000 (valid CRC)
    let huge: &[u8] = b"\x89PNG\r\n\x1a\n\
\x00\x00\x00\x0dIHDR\x00\x00\xea\x60\x00\x00\xea\x60\x08\x00\x00\x00\x00\xa5\xb9\x2a\x9e\
\x00\x00\x00\x0aIDAT\x78\x9c\x63\x60\x00\x00\x00\x02\x00\x01\x48\xaf\xa4\x71\
\x00\x00\x00\x00IEND\xae\x42\x60\x82";
    fs::write(format!("{dir}/png_huge_ihdr.png"), huge).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"\x89PNG").unwrap();
    fs::write(format!("{dir}/raw_short_body.bin"), b"\x04\x00\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}
