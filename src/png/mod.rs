//! PNG support on top of the `png` crate.
//!
//! Decoding flattens any PNG to 8-bit RGB and packs it into an `Rgb565Le`
//! surface. Encoding writes 8-bit RGB from an `Rgb888` surface.

mod decode;
mod encode;

pub(crate) use decode::decode;
pub(crate) use encode::write_rgb888;

fn png_error(e: impl core::fmt::Display) -> crate::error::SurfaceError {
    let msg = alloc::format!("{e}");
    log::error!("PNG decoding failed: {msg}");
    crate::error::SurfaceError::Png(msg)
}

fn encode_error(e: impl core::fmt::Display) -> crate::error::SurfaceError {
    let msg = alloc::format!("{e}");
    log::error!("PNG encoding failed: {msg}");
    crate::error::SurfaceError::Encode(msg)
}
