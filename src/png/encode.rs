use std::io::Write;

use ::png::{BitDepth, ColorType, Encoder};

use super::encode_error;
use crate::error::SurfaceError;
use crate::pixel::PixelFormat;
use crate::surface::Surface;

/// Write an `Rgb888` surface as an 8-bit RGB PNG.
pub(crate) fn write_rgb888<W: Write>(out: W, surface: &Surface) -> Result<(), SurfaceError> {
    if surface.format() != PixelFormat::Rgb888 {
        return Err(SurfaceError::UnsupportedFormat(alloc::format!(
            "PNG encoder needs Rgb888, got {:?}",
            surface.format()
        )));
    }
    let mut encoder = Encoder::new(out, surface.width(), surface.height());
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(encode_error)?;
    writer
        .write_image_data(surface.pixels())
        .map_err(encode_error)?;
    writer.finish().map_err(encode_error)
}
