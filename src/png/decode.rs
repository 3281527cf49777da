use alloc::vec::Vec;

use ::png::{BitDepth, ColorType, Decoder, Transformations};
use log::{debug, error};
use rgb::Rgb;

use super::png_error;
use crate::allocator::SurfaceAllocator;
use crate::error::SurfaceError;
use crate::limits::{Limits, check_dimensions};
use crate::pixel::{PixelFormat, pack_rgb565};
use crate::surface::{Surface, buffer_size};

/// Decode PNG bytes into a new `Rgb565Le` surface.
///
/// Alpha is dropped, grayscale is replicated to all three channels, and
/// palette, low-bit-depth and 16-bit images are normalized to 8-bit first.
/// Dimensions are checked against [`MAX_DIMENSION`](crate::MAX_DIMENSION)
/// before anything is allocated.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    allocator: &dyn SurfaceAllocator,
) -> Result<Surface, SurfaceError> {
    let mut decoder = Decoder::new(data);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(png_error)?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    check_dimensions(width, height).inspect_err(|e| error!("{e}"))?;

    let frame_len = reader.output_buffer_size();
    if let Some(limits) = limits {
        limits.check(width, height)?;
        let (_, surface_len) = buffer_size(width, height, PixelFormat::Rgb565Le)?;
        limits.check_memory(frame_len.saturating_add(surface_len))?;
    }

    let mut surface = Surface::new_in(width, height, PixelFormat::Rgb565Le, allocator)?;
    let mut buf = frame_buffer(frame_len)?;
    let frame = reader.next_frame(&mut buf).map_err(png_error)?;
    debug!(
        "decoded PNG {width}x{height} {:?}/{:?}",
        frame.color_type, frame.bit_depth
    );

    if frame.bit_depth != BitDepth::Eight {
        return Err(png_error(alloc::format!(
            "unexpected bit depth {:?}",
            frame.bit_depth
        )));
    }
    let (channels, to_rgb) = rgb8_reader(frame.color_type)?;
    let bytes = &buf[..frame.buffer_size()];
    for (dst, src) in surface
        .pixels_mut()
        .chunks_exact_mut(2)
        .zip(bytes.chunks_exact(channels))
    {
        let px = to_rgb(src);
        dst.copy_from_slice(&pack_rgb565(px.r, px.g, px.b).to_le_bytes());
    }
    Ok(surface)
}

fn frame_buffer(len: usize) -> Result<Vec<u8>, SurfaceError> {
    let mut buf = Vec::new();
    if buf.try_reserve_exact(len).is_err() {
        error!("PNG frame allocation failed ({len} bytes)");
        return Err(SurfaceError::AllocationFailure { bytes: len });
    }
    buf.resize(len, 0);
    Ok(buf)
}

type ToRgb = fn(&[u8]) -> Rgb<u8>;

/// Channel count and RGB extraction for one 8-bit decoded pixel.
fn rgb8_reader(color: ColorType) -> Result<(usize, ToRgb), SurfaceError> {
    let reader: (usize, ToRgb) = match color {
        ColorType::Rgb => (3, color_rgb),
        ColorType::Rgba => (4, color_rgb),
        ColorType::Grayscale => (1, gray_rgb),
        ColorType::GrayscaleAlpha => (2, gray_rgb),
        ColorType::Indexed => return Err(png_error("indexed PNG was not expanded")),
    };
    Ok(reader)
}

fn color_rgb(c: &[u8]) -> Rgb<u8> {
    Rgb {
        r: c[0],
        g: c[1],
        b: c[2],
    }
}

fn gray_rgb(c: &[u8]) -> Rgb<u8> {
    Rgb {
        r: c[0],
        g: c[0],
        b: c[0],
    }
}
