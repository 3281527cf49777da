//! Per-pixel color adjustments used behind menus and on cover art.
//!
//! Both operations return a new `Rgb565Le` surface; the source is left
//! untouched.

use crate::convert::convert;
use crate::error::SurfaceError;
use crate::pixel::PixelFormat;
use crate::surface::Surface;

/// Darken by dividing each 565 channel by `divisor`. A divisor of 0 or 1
/// returns an unchanged copy.
pub fn shade(source: &Surface, divisor: u16) -> Result<Surface, SurfaceError> {
    let d = divisor.max(1);
    map_565(source, |p| {
        let (r, g, b) = channels(p);
        join(r / d, g / d, b / d)
    })
}

/// Scale each 565 channel by the matching channel of `color` over its
/// maximum (31 for red and blue, 63 for green).
pub fn tint(source: &Surface, color: u16) -> Result<Surface, SurfaceError> {
    let (tr, tg, tb) = channels(color);
    map_565(source, |p| {
        let (r, g, b) = channels(p);
        join(r * tr / 31, g * tg / 63, b * tb / 31)
    })
}

fn map_565(source: &Surface, f: impl Fn(u16) -> u16) -> Result<Surface, SurfaceError> {
    let mut out = convert(source, None, None, Some(PixelFormat::Rgb565Le))?;
    for px in out.pixels_mut().chunks_exact_mut(2) {
        let p = u16::from_le_bytes([px[0], px[1]]);
        px.copy_from_slice(&f(p).to_le_bytes());
    }
    Ok(out)
}

#[inline]
fn channels(p: u16) -> (u16, u16, u16) {
    ((p >> 11) & 0x1F, (p >> 5) & 0x3F, p & 0x1F)
}

#[inline]
fn join(r: u16, g: u16, b: u16) -> u16 {
    ((r & 0x1F) << 11) | ((g & 0x3F) << 5) | (b & 0x1F)
}
