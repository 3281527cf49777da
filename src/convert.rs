//! Resize and re-encode surfaces into freshly allocated ones.

use log::warn;

use crate::allocator::{Global, SurfaceAllocator};
use crate::blit;
use crate::error::SurfaceError;
use crate::pixel::PixelFormat;
use crate::surface::Surface;

/// Resolve a requested output size against a source size.
///
/// `None` or `Some(0)` leaves that axis unspecified. With both unspecified
/// the source size is kept; with one unspecified it is derived from the
/// other so the aspect ratio is preserved, truncating toward zero.
pub fn target_size(
    source_width: u32,
    source_height: u32,
    width: Option<u32>,
    height: Option<u32>,
) -> (u32, u32) {
    let width = width.filter(|&w| w > 0);
    let height = height.filter(|&h| h > 0);
    match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (None, None) => (source_width, source_height),
        (None, Some(h)) => (derive(source_width, h, source_height), h),
        (Some(w), None) => (w, derive(source_height, w, source_width)),
    }
}

/// `other * given / source_given`, saturating at `u32::MAX`.
fn derive(other: u32, given: u32, source_given: u32) -> u32 {
    let v = u64::from(other) * u64::from(given) / u64::from(source_given.max(1));
    u32::try_from(v).unwrap_or(u32::MAX)
}

/// Produce a new surface of the requested size and format from `source`,
/// scaling with nearest-neighbor.
///
/// Size arguments follow [`target_size`]; `format` defaults to the source
/// format.
pub fn convert(
    source: &Surface,
    width: Option<u32>,
    height: Option<u32>,
    format: Option<PixelFormat>,
) -> Result<Surface, SurfaceError> {
    convert_in(source, width, height, format, &Global)
}

/// [`convert`] with the destination allocated through `allocator`.
pub fn convert_in(
    source: &Surface,
    width: Option<u32>,
    height: Option<u32>,
    format: Option<PixelFormat>,
    allocator: &dyn SurfaceAllocator,
) -> Result<Surface, SurfaceError> {
    source.validate()?;

    let (width, height) = target_size(source.width(), source.height(), width, height);
    let format = format.unwrap_or(source.format());

    let mut dest = Surface::new_in(width, height, format, allocator).inspect_err(|e| {
        warn!("Cannot allocate {width}x{height} {format:?} conversion target: {e}");
    })?;
    blit::copy(source, None, &mut dest, None, true)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(w: u32, h: u32, color: u16) -> Surface {
        let mut s = Surface::new(w, h, PixelFormat::Rgb565Le).unwrap();
        s.fill_565(color).unwrap();
        s
    }

    #[test]
    fn aspect_derivation() {
        assert_eq!(target_size(100, 50, Some(50), None), (50, 25));
        assert_eq!(target_size(100, 50, Some(50), Some(0)), (50, 25));
        assert_eq!(target_size(100, 50, None, Some(10)), (20, 10));
        assert_eq!(target_size(100, 50, None, None), (100, 50));
        assert_eq!(target_size(100, 50, Some(0), Some(0)), (100, 50));
        assert_eq!(target_size(100, 50, Some(7), Some(9)), (7, 9));
        // Truncates toward zero.
        assert_eq!(target_size(3, 3, Some(2), None), (2, 2));
        assert_eq!(target_size(320, 240, Some(100), None), (100, 75));
        assert_eq!(target_size(7, 3, Some(5), None), (5, 2));
    }

    #[test]
    fn keeps_size_and_format_by_default() {
        let src = flat(6, 4, 0x1234);
        let out = convert(&src, None, None, None).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn flat_color_survives_up_and_down() {
        let src = flat(5, 3, 0xF81F);
        let up = convert(&src, Some(10), Some(6), None).unwrap();
        assert_eq!((up.width(), up.height()), (10, 6));
        let down = convert(&up, Some(5), Some(3), None).unwrap();
        assert_eq!(down, src);
    }

    #[test]
    fn reformat_to_888() {
        let src = flat(4, 4, 0x07E0);
        let out = convert(&src, Some(2), None, Some(PixelFormat::Rgb888)).unwrap();
        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(out.format(), PixelFormat::Rgb888);
        assert!(out.pixels().chunks_exact(3).all(|p| p == [0, 0xFC, 0]));
    }

    #[test]
    fn degenerate_derived_size_fails() {
        let src = flat(100, 1, 0);
        assert!(matches!(
            convert(&src, Some(10), None, None),
            Err(SurfaceError::InvalidSurface(_))
        ));
    }

    #[test]
    fn allocation_failure_propagates() {
        struct Exhausted;
        impl SurfaceAllocator for Exhausted {
            fn allocate(&self, _len: usize) -> Option<alloc::vec::Vec<u8>> {
                None
            }
        }
        let src = flat(2, 2, 0);
        assert!(matches!(
            convert_in(&src, Some(4), Some(4), None, &Exhausted),
            Err(SurfaceError::AllocationFailure { .. })
        ));
    }
}
