use alloc::vec::Vec;

use crate::error::SurfaceError;
use crate::raw;
use crate::surface::Surface;

/// Encode a surface as a raw565 container (lossless for `Rgb565Le`).
pub fn encode_raw(source: &Surface) -> Result<Vec<u8>, SurfaceError> {
    raw::encode(source)
}

/// Write a surface to `path` as a raw565 container.
#[cfg(feature = "std")]
pub fn encode_raw_file(
    source: &Surface,
    path: impl AsRef<std::path::Path>,
) -> Result<(), SurfaceError> {
    let path = path.as_ref();
    let bytes = encode_raw(source)?;
    std::fs::write(path, bytes).inspect_err(|e| {
        log::error!("Unable to write image file '{}': {e}", path.display());
    })?;
    Ok(())
}

#[cfg(feature = "png")]
mod png_out {
    use alloc::borrow::Cow;
    use alloc::vec::Vec;
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::Path;

    use log::debug;

    use crate::convert::{convert, target_size};
    use crate::error::SurfaceError;
    use crate::pixel::PixelFormat;
    use crate::surface::Surface;

    /// Encode a surface as an 8-bit RGB PNG.
    ///
    /// `width`/`height` follow [`target_size`]: unspecified axes keep the
    /// source size or preserve its aspect ratio. Sources that are not
    /// already `Rgb888` at the target size go through a temporary converted
    /// surface, released before returning.
    pub fn encode_png(
        source: &Surface,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Vec<u8>, SurfaceError> {
        let rgb = prepare(source, width, height)?;
        let mut out = Vec::new();
        crate::png::write_rgb888(&mut out, &rgb)?;
        Ok(out)
    }

    /// [`encode_png`] straight to a file at `path`.
    pub fn encode_file(
        source: &Surface,
        path: impl AsRef<Path>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<(), SurfaceError> {
        let path = path.as_ref();
        let rgb = prepare(source, width, height)?;
        let file = File::create(path).inspect_err(|e| {
            log::error!("Unable to create image file '{}': {e}", path.display());
        })?;
        let mut out = BufWriter::new(file);
        crate::png::write_rgb888(&mut out, &rgb)?;
        out.flush()?;
        Ok(())
    }

    fn prepare(
        source: &Surface,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Cow<'_, Surface>, SurfaceError> {
        source.validate()?;
        let (width, height) = target_size(source.width(), source.height(), width, height);
        if source.format() == PixelFormat::Rgb888
            && source.width() == width
            && source.height() == height
        {
            return Ok(Cow::Borrowed(source));
        }
        debug!(
            "converting {}x{} {:?} to {width}x{height} Rgb888 for PNG",
            source.width(),
            source.height(),
            source.format()
        );
        let temp = convert(source, Some(width), Some(height), Some(PixelFormat::Rgb888))?;
        Ok(Cow::Owned(temp))
    }
}

#[cfg(feature = "png")]
pub use png_out::{encode_file, encode_png};
