#![cfg(feature = "png")]

use surfpix::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn gradient_888(w: u32, h: u32) -> Surface {
    let mut s = Surface::new(w, h, PixelFormat::Rgb888).unwrap();
    for y in 0..h {
        let row = s.row_mut(y).unwrap();
        for x in 0..w as usize {
            row[x * 3] = (x * 255 / w as usize) as u8;
            row[x * 3 + 1] = (y * 255 / h) as u8;
            row[x * 3 + 2] = ((x + y as usize) * 7) as u8;
        }
    }
    s
}

#[test]
fn raw565_roundtrip_is_lossless() {
    init_logging();
    let mut s = Surface::new(5, 4, PixelFormat::Rgb565Le).unwrap();
    for (i, b) in s.pixels_mut().iter_mut().enumerate() {
        *b = (i * 31 % 256) as u8;
    }

    let encoded = encode_raw(&s).unwrap();
    assert_eq!(encoded.len(), 4 + 5 * 4 * 2);

    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded, s);
}

#[test]
fn png_roundtrip_matches_565_quantization() {
    init_logging();
    let src = gradient_888(7, 5);
    let png = encode_png(&src, None, None).unwrap();
    assert_eq!(&png[..4], b"\x89PNG");

    let decoded = decode(&png).unwrap();
    assert_eq!(decoded.format(), PixelFormat::Rgb565Le);
    assert_eq!((decoded.width(), decoded.height()), (7, 5));
    for y in 0..5 {
        let row = src.row(y).unwrap();
        for x in 0..7 {
            let p = &row[x as usize * 3..x as usize * 3 + 3];
            let (r, g, b) = unpack_rgb565(decoded.pixel_565(x, y).unwrap());
            assert!(p[0] - r < 8 && p[1] - g < 4 && p[2] - b < 8, "pixel {x},{y}");
            assert_eq!(decoded.pixel_565(x, y), Some(pack_rgb565(p[0], p[1], p[2])));
        }
    }
}

#[test]
fn png_file_roundtrip_with_resize() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shot.png");

    let mut src = Surface::new(100, 50, PixelFormat::Rgb565Le).unwrap();
    src.fill_565(0xF81F).unwrap();
    encode_file(&src, &path, Some(50), None).unwrap();

    let info = ImageInfo::from_bytes(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(info.format, ImageFormat::Png);
    assert_eq!((info.width, info.height), (50, 25));

    let back = decode_file(&path).unwrap();
    assert_eq!((back.width(), back.height()), (50, 25));
    assert!(back.pixels().chunks_exact(2).all(|p| p == 0xF81Fu16.to_le_bytes()));
}

#[test]
fn raw_file_roundtrip() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cover.raw");

    let mut src = Surface::new(6, 3, PixelFormat::Rgb565Be).unwrap();
    src.fill_565(0x1357).unwrap();
    encode_raw_file(&src, &path).unwrap();

    let back = decode_file(&path).unwrap();
    assert_eq!(back.format(), PixelFormat::Rgb565Le);
    assert_eq!(back.pixel_565(5, 2), Some(0x1357));
}

#[test]
fn missing_file_is_io_error() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    match decode_file(dir.path().join("nope.png")) {
        Err(SurfaceError::Io(_)) => {}
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn encode_into_missing_directory_fails() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let src = gradient_888(2, 2);
    assert!(encode_file(&src, dir.path().join("no/such/dir.png"), None, None).is_err());
}

#[test]
fn convert_up_then_down_keeps_flat_color() {
    init_logging();
    let mut src = Surface::new(13, 9, PixelFormat::Rgb565Be).unwrap();
    src.fill_565(0x5AA5).unwrap();
    let up = convert(&src, Some(26), Some(18), None).unwrap();
    let down = convert(&up, Some(13), Some(9), None).unwrap();
    assert_eq!(down, src);
}

#[test]
fn decode_request_limits() {
    init_logging();
    let s = Surface::new(8, 8, PixelFormat::Rgb565Le).unwrap();
    let raw = encode_raw(&s).unwrap();
    let limits = Limits {
        max_pixels: Some(32),
        ..Default::default()
    };
    match DecodeRequest::new(&raw).with_limits(&limits).decode() {
        Err(SurfaceError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}
