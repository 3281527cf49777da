//! [`imgref`] views of surfaces as typed RGB pixels.

use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::{ComponentBytes, Rgb};

use crate::convert::convert;
use crate::error::SurfaceError;
use crate::pixel::PixelFormat;
use crate::surface::Surface;

impl Surface {
    /// Copy the surface out as 8-bit RGB pixels (565 values expanded with
    /// zero low bits).
    pub fn to_imgvec(&self) -> Result<ImgVec<Rgb<u8>>, SurfaceError> {
        let rgb = convert(self, None, None, Some(PixelFormat::Rgb888))?;
        let pixels: Vec<Rgb<u8>> = rgb
            .pixels()
            .chunks_exact(3)
            .map(|c| Rgb {
                r: c[0],
                g: c[1],
                b: c[2],
            })
            .collect();
        Ok(ImgVec::new(
            pixels,
            self.width() as usize,
            self.height() as usize,
        ))
    }

    /// Build an `Rgb888` surface from typed RGB pixels.
    pub fn from_imgref(img: ImgRef<'_, Rgb<u8>>) -> Result<Self, SurfaceError> {
        let width = u32::try_from(img.width()).map_err(|_| too_large(&img))?;
        let height = u32::try_from(img.height()).map_err(|_| too_large(&img))?;
        let mut surface = Surface::new(width, height, PixelFormat::Rgb888)?;
        for (y, row) in img.rows().enumerate() {
            if let Some(dst) = surface.row_mut(y as u32) {
                dst.copy_from_slice(row.as_bytes());
            }
        }
        Ok(surface)
    }
}

fn too_large(img: &ImgRef<'_, Rgb<u8>>) -> SurfaceError {
    SurfaceError::DimensionsTooLarge {
        width: u32::try_from(img.width()).unwrap_or(u32::MAX),
        height: u32::try_from(img.height()).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn imgref_roundtrip_through_888() {
        let pixels = vec![
            Rgb { r: 0xF8, g: 0, b: 0 },
            Rgb { r: 0, g: 0xFC, b: 0 },
            Rgb { r: 0, g: 0, b: 0xF8 },
            Rgb {
                r: 0x80,
                g: 0x80,
                b: 0x80,
            },
        ];
        let img = ImgVec::new(pixels.clone(), 2, 2);
        let surface = Surface::from_imgref(img.as_ref()).unwrap();
        assert_eq!(surface.format(), PixelFormat::Rgb888);
        let back = surface.to_imgvec().unwrap();
        assert_eq!(back.buf().as_slice(), &pixels[..]);
    }

    #[test]
    fn imgvec_from_565_expands() {
        let mut s = Surface::new(1, 1, PixelFormat::Rgb565Le).unwrap();
        s.fill_565(0xFFFF).unwrap();
        let img = s.to_imgvec().unwrap();
        assert_eq!(img.buf()[0], Rgb { r: 0xF8, g: 0xFC, b: 0xF8 });
    }
}
