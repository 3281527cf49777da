//! The owned pixel buffer at the center of the pipeline.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use log::error;

use crate::allocator::{Global, SurfaceAllocator};
use crate::blit::{palette_565, read_565_be, read_565_le, read_888};
use crate::error::SurfaceError;
use crate::limits::check_dimensions;
use crate::pixel::PixelFormat;

/// A rectangular pixel buffer with its format and optional palette.
///
/// The shape (width, height, format) is fixed at creation; only pixel and
/// palette contents change afterwards. Dropping the surface releases both
/// buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
    palette: Option<Box<[u8]>>,
}

impl Surface {
    /// Allocate a zero-filled surface on the general heap.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self, SurfaceError> {
        Self::new_in(width, height, format, &Global)
    }

    /// Allocate a zero-filled surface through `allocator`.
    ///
    /// Palette formats get a 256-entry palette allocated alongside the
    /// pixels. Either allocation failing yields
    /// [`SurfaceError::AllocationFailure`] and nothing is returned.
    pub fn new_in(
        width: u32,
        height: u32,
        format: PixelFormat,
        allocator: &dyn SurfaceAllocator,
    ) -> Result<Self, SurfaceError> {
        check_dimensions(width, height)?;
        let (stride, data_len) = buffer_size(width, height, format)?;
        let palette_len = format.palette_len();
        let total = data_len + palette_len;

        let data = allocate(allocator, data_len, total)?;
        let palette = if palette_len > 0 {
            Some(allocate(allocator, palette_len, total)?.into_boxed_slice())
        } else {
            None
        };

        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
            palette,
        })
    }

    /// Adopt existing buffers as a surface.
    ///
    /// `data` must hold exactly `height * stride` bytes and `palette` must be
    /// present (with 256 entries) iff `format` is palette-indexed.
    pub fn from_parts(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
        palette: Option<Vec<u8>>,
    ) -> Result<Self, SurfaceError> {
        let stride = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or(SurfaceError::DimensionsTooLarge { width, height })?;
        let surface = Self {
            width,
            height,
            stride,
            format,
            data,
            palette: palette.map(Vec::into_boxed_slice),
        };
        surface.validate()?;
        Ok(surface)
    }

    /// Check the geometry, buffer sizes and palette against the format.
    ///
    /// Every operation taking a surface runs this first.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        if self.data.is_empty() {
            return Err(invalid("empty pixel data".into()));
        }
        check_dimensions(self.width, self.height).inspect_err(|e| error!("{e}"))?;
        if self.stride != self.width as usize * self.format.bytes_per_pixel() {
            return Err(invalid(format!(
                "stride {} does not match {}x{:?}",
                self.stride, self.width, self.format
            )));
        }
        let expected = self.height as usize * self.stride;
        if self.data.len() != expected {
            return Err(invalid(format!(
                "pixel data is {} bytes, expected {expected}",
                self.data.len()
            )));
        }
        match (&self.palette, self.format.is_palette()) {
            (Some(p), true) if p.len() == self.format.palette_len() => Ok(()),
            (Some(p), true) => Err(invalid(format!(
                "palette is {} bytes, expected {}",
                p.len(),
                self.format.palette_len()
            ))),
            (None, true) => Err(invalid(format!("{:?} surface has no palette", self.format))),
            (Some(_), false) => Err(invalid(format!(
                "{:?} surface carries a palette",
                self.format
            ))),
            (None, false) => Ok(()),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Take the pixel buffer, dropping the palette.
    pub fn into_pixels(self) -> Vec<u8> {
        self.data
    }

    pub fn palette(&self) -> Option<&[u8]> {
        self.palette.as_deref()
    }

    pub fn palette_mut(&mut self) -> Option<&mut [u8]> {
        self.palette.as_deref_mut()
    }

    /// One row of pixel bytes, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let start = (y as usize).checked_mul(self.stride)?;
        self.data.get(start..start + self.stride)
    }

    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        let start = (y as usize).checked_mul(self.stride)?;
        self.data.get_mut(start..start + self.stride)
    }

    /// Read one pixel as a native 565 value, decoding through the palette
    /// and byte order the same way the blit engine does.
    ///
    /// Returns `None` out of bounds, or for `Pal888` (which the blit engine
    /// cannot read either).
    pub fn pixel_565(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        let x = x as usize;
        match self.format {
            PixelFormat::Rgb565Le => Some(read_565_le(row, x)),
            PixelFormat::Rgb565Be => Some(read_565_be(row, x)),
            PixelFormat::Rgb888 => Some(read_888(row, x)),
            PixelFormat::Pal565Le => Some(palette_565(self.palette()?, row[x], false)),
            PixelFormat::Pal565Be => Some(palette_565(self.palette()?, row[x], true)),
            PixelFormat::Pal888 => None,
        }
    }

    /// Fill every pixel of a packed surface with one 565 color.
    pub fn fill_565(&mut self, color: u16) -> Result<(), SurfaceError> {
        self.validate()?;
        match self.format {
            PixelFormat::Rgb565Le => fill_pattern(&mut self.data, &color.to_le_bytes()),
            PixelFormat::Rgb565Be => fill_pattern(&mut self.data, &color.to_be_bytes()),
            PixelFormat::Rgb888 => {
                let (r, g, b) = crate::pixel::unpack_rgb565(color);
                fill_pattern(&mut self.data, &[r, g, b]);
            }
            other => {
                return Err(SurfaceError::UnsupportedFormat(format!(
                    "cannot fill {other:?} with a color"
                )));
            }
        }
        Ok(())
    }
}

fn fill_pattern(data: &mut [u8], pattern: &[u8]) {
    for chunk in data.chunks_exact_mut(pattern.len()) {
        chunk.copy_from_slice(pattern);
    }
}

/// Row stride and pixel buffer length for the given shape.
pub(crate) fn buffer_size(
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<(usize, usize), SurfaceError> {
    let stride = (width as usize)
        .checked_mul(format.bytes_per_pixel())
        .ok_or(SurfaceError::DimensionsTooLarge { width, height })?;
    let len = stride
        .checked_mul(height as usize)
        .ok_or(SurfaceError::DimensionsTooLarge { width, height })?;
    Ok((stride, len))
}

fn allocate(
    allocator: &dyn SurfaceAllocator,
    len: usize,
    total: usize,
) -> Result<Vec<u8>, SurfaceError> {
    match allocator.allocate(len) {
        Some(buf) if buf.len() == len => Ok(buf),
        _ => {
            error!("Surface allocation failed ({total} bytes)");
            Err(SurfaceError::AllocationFailure { bytes: total })
        }
    }
}

fn invalid(msg: alloc::string::String) -> SurfaceError {
    error!("Invalid surface: {msg}");
    SurfaceError::InvalidSurface(msg)
}
