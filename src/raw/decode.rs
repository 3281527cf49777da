use log::{debug, error};

use super::HEADER_LEN;
use crate::allocator::SurfaceAllocator;
use crate::error::SurfaceError;
use crate::limits::Limits;
use crate::pixel::PixelFormat;
use crate::surface::Surface;

/// Read the (width, height) header.
pub(crate) fn parse_header(data: &[u8]) -> Result<(u32, u32), SurfaceError> {
    if data.len() < HEADER_LEN {
        return Err(SurfaceError::InputTooShort { len: data.len() });
    }
    let width = u16::from_le_bytes([data[0], data[1]]);
    let height = u16::from_le_bytes([data[2], data[3]]);
    Ok((u32::from(width), u32::from(height)))
}

/// Whether `data` is exactly a header plus `width * height` pixels.
pub(crate) fn is_raw565(data: &[u8]) -> bool {
    match parse_header(data) {
        Ok((width, height)) => expected_len(width, height) == data.len(),
        Err(_) => false,
    }
}

fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 2 + HEADER_LEN
}

/// Decode raw565 bytes into a new `Rgb565Le` surface; pixels are copied
/// verbatim.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    allocator: &dyn SurfaceAllocator,
) -> Result<Surface, SurfaceError> {
    let (width, height) = parse_header(data)?;
    if expected_len(width, height) != data.len() {
        error!(
            "Raw565 size mismatch: {width}x{height} needs {} bytes, got {}",
            expected_len(width, height),
            data.len()
        );
        return Err(SurfaceError::UnrecognizedFormat);
    }
    if let Some(limits) = limits {
        limits.check(width, height)?;
        limits.check_memory(data.len() - HEADER_LEN)?;
    }
    debug!("decoding raw565 {width}x{height}");

    let mut surface = Surface::new_in(width, height, PixelFormat::Rgb565Le, allocator)?;
    surface.pixels_mut().copy_from_slice(&data[HEADER_LEN..]);
    Ok(surface)
}
