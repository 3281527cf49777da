use alloc::borrow::Cow;
use alloc::vec::Vec;

use super::HEADER_LEN;
use crate::convert::convert;
use crate::error::SurfaceError;
use crate::pixel::PixelFormat;
use crate::surface::Surface;

/// Encode a surface as raw565, re-encoding to `Rgb565Le` first if needed.
pub(crate) fn encode(source: &Surface) -> Result<Vec<u8>, SurfaceError> {
    source.validate()?;
    let surface = if source.format() == PixelFormat::Rgb565Le {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(convert(source, None, None, Some(PixelFormat::Rgb565Le))?)
    };

    let pixels = surface.pixels();
    let mut out = Vec::with_capacity(HEADER_LEN + pixels.len());
    // Dimensions are capped at 4096 so they fit the u16 header fields.
    out.extend_from_slice(&(surface.width() as u16).to_le_bytes());
    out.extend_from_slice(&(surface.height() as u16).to_le_bytes());
    out.extend_from_slice(pixels);
    Ok(out)
}
