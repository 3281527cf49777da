//! Blit engine: copy, scale and re-encode pixels between surfaces.
//!
//! Dispatch happens once per call on the (source, destination) format pair;
//! the per-pixel loop is monomorphized for each pair so the inner loop holds
//! no format branches. The engine never allocates. Its nearest-neighbor
//! column map lives in a fixed array on the stack.

use alloc::format;

use log::{debug, error};

use crate::error::SurfaceError;
use crate::limits::MAX_DIMENSION;
use crate::pixel::{PixelFormat, pack_rgb565, unpack_rgb565};
use crate::surface::Surface;

/// A sub-rectangle of a surface.
///
/// Accepted by [`copy`] for interface stability; the engine currently
/// always copies the full destination extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Fill `dest` from `source`, scaling with nearest-neighbor when `scale` is
/// set and re-encoding into `dest`'s format.
///
/// The copy extent is always the whole of `dest`; `source_rect` and
/// `dest_rect` are ignored. When both surfaces have the same dimensions,
/// `scale` has no effect. Without scaling, `source` must be at least as
/// large as `dest` in both axes.
///
/// Every error is detected before the first pixel is written.
pub fn copy(
    source: &Surface,
    source_rect: Option<Rect>,
    dest: &mut Surface,
    dest_rect: Option<Rect>,
    scale: bool,
) -> Result<(), SurfaceError> {
    blit(source, source_rect, dest, dest_rect, scale, None)
}

/// Like [`copy`], but source pixels whose packed 565 value equals `key` are
/// skipped, leaving the destination pixel untouched.
pub fn copy_with_transparency(
    source: &Surface,
    source_rect: Option<Rect>,
    dest: &mut Surface,
    dest_rect: Option<Rect>,
    scale: bool,
    key: u16,
) -> Result<(), SurfaceError> {
    blit(source, source_rect, dest, dest_rect, scale, Some(key))
}

fn blit(
    source: &Surface,
    _source_rect: Option<Rect>,
    dest: &mut Surface,
    _dest_rect: Option<Rect>,
    scale: bool,
    transparency: Option<u16>,
) -> Result<(), SurfaceError> {
    source.validate()?;
    dest.validate()?;

    let same_size = source.width() == dest.width() && source.height() == dest.height();
    let scale = scale && !same_size;

    if !scale && (dest.width() > source.width() || dest.height() > source.height()) {
        error!(
            "Unscaled copy of {}x{} into larger {}x{}",
            source.width(),
            source.height(),
            dest.width(),
            dest.height()
        );
        return Err(SurfaceError::RegionOutOfBounds {
            source_width: source.width(),
            source_height: source.height(),
            dest_width: dest.width(),
            dest_height: dest.height(),
        });
    }

    if !scale
        && transparency.is_none()
        && source.stride() == dest.stride()
        && source.format() == dest.format()
    {
        debug!(
            "blit fast path: {}x{} {:?}",
            dest.width(),
            dest.height(),
            dest.format()
        );
        let len = dest.height() as usize * dest.stride();
        dest.pixels_mut()[..len].copy_from_slice(&source.pixels()[..len]);
        if let (Some(src_pal), Some(dst_pal)) = (source.palette(), dest.palette_mut()) {
            dst_pal.copy_from_slice(src_pal);
        }
        return Ok(());
    }

    let plan = Plan::new(source, dest, scale, transparency);
    debug!(
        "blit general path: {}x{} {:?} -> {}x{} {:?} (scale={scale})",
        source.width(),
        source.height(),
        source.format(),
        dest.width(),
        dest.height(),
        dest.format()
    );

    match source.format() {
        PixelFormat::Rgb565Le => store(&plan, source, dest, read_565_le),
        PixelFormat::Rgb565Be => store(&plan, source, dest, read_565_be),
        PixelFormat::Rgb888 => store(&plan, source, dest, read_888),
        PixelFormat::Pal565Le => {
            let palette = source_palette(source)?;
            store(&plan, source, dest, |row: &[u8], x| {
                palette_565(palette, row[x], false)
            })
        }
        PixelFormat::Pal565Be => {
            let palette = source_palette(source)?;
            store(&plan, source, dest, |row: &[u8], x| {
                palette_565(palette, row[x], true)
            })
        }
        PixelFormat::Pal888 => Err(unsupported(format!(
            "cannot read {:?} source",
            source.format()
        ))),
    }
}

fn source_palette(source: &Surface) -> Result<&[u8], SurfaceError> {
    source.palette().ok_or_else(|| {
        error!("Palette source without palette");
        SurfaceError::InvalidSurface(format!("{:?} source has no palette", source.format()))
    })
}

/// Pick the destination encoder for an already chosen source reader.
fn store<F>(plan: &Plan, source: &Surface, dest: &mut Surface, fetch: F) -> Result<(), SurfaceError>
where
    F: Fn(&[u8], usize) -> u16,
{
    match dest.format() {
        PixelFormat::Rgb565Le => {
            plan.run(source, dest, fetch, |row: &mut [u8], x, pixel: u16| {
                row[x * 2..x * 2 + 2].copy_from_slice(&pixel.to_le_bytes());
            });
        }
        PixelFormat::Rgb565Be => {
            plan.run(source, dest, fetch, |row: &mut [u8], x, pixel: u16| {
                row[x * 2..x * 2 + 2].copy_from_slice(&pixel.to_be_bytes());
            });
        }
        PixelFormat::Rgb888 => {
            plan.run(source, dest, fetch, |row: &mut [u8], x, pixel: u16| {
                let (r, g, b) = unpack_rgb565(pixel);
                row[x * 3..x * 3 + 3].copy_from_slice(&[r, g, b]);
            });
        }
        other => {
            return Err(unsupported(format!("cannot write {other:?} destination")));
        }
    }
    Ok(())
}

/// Loop-invariant state of one general-path blit.
struct Plan {
    scale: bool,
    transparency: Option<u16>,
    source_height: u32,
    dest_width: usize,
    dest_height: u32,
    /// Source column for each destination column.
    x_map: [u16; MAX_DIMENSION as usize],
}

impl Plan {
    fn new(source: &Surface, dest: &Surface, scale: bool, transparency: Option<u16>) -> Self {
        let dest_width = dest.width() as usize;
        let mut x_map = [0u16; MAX_DIMENSION as usize];
        for (x, src_x) in x_map[..dest_width].iter_mut().enumerate() {
            *src_x = if scale {
                scaled_index(x as u32, source.width(), dest.width())
            } else {
                x as u16
            };
        }
        Self {
            scale,
            transparency,
            source_height: source.height(),
            dest_width,
            dest_height: dest.height(),
            x_map,
        }
    }

    fn run<F, S>(&self, source: &Surface, dest: &mut Surface, fetch: F, put: S)
    where
        F: Fn(&[u8], usize) -> u16,
        S: Fn(&mut [u8], usize, u16),
    {
        let src_stride = source.stride();
        let dst_stride = dest.stride();
        let src = source.pixels();
        let dst = dest.pixels_mut();
        let x_map = &self.x_map[..self.dest_width];

        for y in 0..self.dest_height {
            let src_y = if self.scale {
                scaled_index(y, self.source_height, self.dest_height) as usize
            } else {
                y as usize
            };
            let src_row = &src[src_y * src_stride..(src_y + 1) * src_stride];
            let dst_row = &mut dst[y as usize * dst_stride..(y as usize + 1) * dst_stride];
            for (x, &src_x) in x_map.iter().enumerate() {
                let pixel = fetch(src_row, src_x as usize);
                if self.transparency == Some(pixel) {
                    continue;
                }
                put(dst_row, x, pixel);
            }
        }
    }
}

/// `floor(i * src_len / dst_len)`; fits in `u16` because `src_len <= 4096`.
#[inline]
fn scaled_index(i: u32, src_len: u32, dst_len: u32) -> u16 {
    (u64::from(i) * u64::from(src_len) / u64::from(dst_len)) as u16
}

#[inline]
pub(crate) fn read_565_le(row: &[u8], x: usize) -> u16 {
    u16::from_le_bytes([row[x * 2], row[x * 2 + 1]])
}

#[inline]
pub(crate) fn read_565_be(row: &[u8], x: usize) -> u16 {
    u16::from_be_bytes([row[x * 2], row[x * 2 + 1]])
}

#[inline]
pub(crate) fn read_888(row: &[u8], x: usize) -> u16 {
    let p = &row[x * 3..x * 3 + 3];
    pack_rgb565(p[0], p[1], p[2])
}

/// Look up a 565 palette entry; entries are little-endian unless `big_endian`.
#[inline]
pub(crate) fn palette_565(palette: &[u8], index: u8, big_endian: bool) -> u16 {
    let i = usize::from(index) * 2;
    let bytes = [palette[i], palette[i + 1]];
    if big_endian {
        u16::from_be_bytes(bytes)
    } else {
        u16::from_le_bytes(bytes)
    }
}

fn unsupported(msg: alloc::string::String) -> SurfaceError {
    error!("Unsupported blit: {msg}");
    SurfaceError::UnsupportedFormat(msg)
}
